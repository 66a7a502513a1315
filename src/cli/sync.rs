use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{
    config::{SyncConfig, SyncOverrides},
    error,
    error::Result,
    info,
    spotify::SpotifyClient,
    success,
    sync::{self, Stage},
    types::SyncSummary,
    warning,
};

pub async fn sync(overrides: SyncOverrides) {
    let (config, client) = prepare(overrides).await;

    match run_pass(&client, &config).await {
        Ok(summary) => report(&summary),
        Err(e) => error!("Sync failed, playlist left untouched by this run: {}", e),
    }
}

pub async fn watch(overrides: SyncOverrides) {
    let (config, client) = prepare(overrides).await;

    info!(
        "Watching playlist {} every {} seconds ({} mode). Press Ctrl-C to stop.",
        config.playlist_id,
        config.interval.as_secs(),
        config.mode
    );

    loop {
        match run_pass(&client, &config).await {
            Ok(summary) => report(&summary),
            Err(e) if e.is_upstream() => {
                warning!("Spotify could not be reached, retrying next cycle: {}", e)
            }
            Err(e) => warning!("Sync pass failed, retrying next cycle: {}", e),
        }

        info!("Next sync in {} seconds.", config.interval.as_secs());
        tokio::select! {
            _ = sleep(config.interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping.");
                return;
            }
        }
    }
}

/// Resolves the configuration and the authenticated client, exiting on
/// failure. Runs before any catalog request.
pub(crate) async fn prepare(overrides: SyncOverrides) -> (SyncConfig, SpotifyClient) {
    let config = match SyncConfig::from_env(overrides) {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let client = match SpotifyClient::from_env().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    (config, client)
}

pub(crate) fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Renders a stage on the spinner. Returns `false` for stages that should be
/// printed as a line instead.
pub(crate) fn show_stage(pb: &ProgressBar, stage: &Stage<'_>) -> bool {
    match stage {
        Stage::FollowedArtists(count) => {
            pb.set_message(format!("Gathered {count} followed artists..."))
        }
        Stage::Artist { index, total, name } => pb.set_message(format!(
            "Gathering recent songs from {name} ({}/{total})...",
            index + 1
        )),
        Stage::Desired { tracks, artists } => pb.set_message(format!(
            "Selected {tracks} recent songs from {artists} artists..."
        )),
        Stage::Playlist(count) => pb.set_message(format!("Playlist holds {count} tracks...")),
        Stage::Mutating { to_add, to_remove } => pb.set_message(format!(
            "Updating playlist (+{to_add} / -{to_remove})..."
        )),
        Stage::EmptyReplaceSkipped => return false,
    }
    true
}

async fn run_pass(client: &SpotifyClient, config: &SyncConfig) -> Result<SyncSummary> {
    let pb = spinner();
    pb.set_message("Gathering followed artists...");

    let mut skipped_empty = false;
    let result = sync::reconcile(client, config, &mut |stage| {
        if !show_stage(&pb, &stage) {
            skipped_empty = true;
        }
    })
    .await;

    pb.finish_and_clear();
    if skipped_empty {
        warning!("No recent songs found; the playlist was left as it is.");
    }
    result
}

fn report(summary: &SyncSummary) {
    if summary.is_unchanged() {
        info!(
            "No updates, playlist already holds all {} recent songs.",
            summary.desired_count
        );
    } else {
        success!(
            "Playlist updated: {} added, {} removed, {} recent songs in total.",
            summary.added,
            summary.removed,
            summary.desired_count
        );
    }
}
