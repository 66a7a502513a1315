use tabled::Table;

use crate::{
    cli::sync::{prepare, show_stage, spinner},
    config::SyncOverrides,
    error, info,
    sync::{self, reconcile},
    types::{Track, TrackTableRow},
};

/// Computes the desired tracks and the pending playlist changes without
/// mutating anything.
pub async fn preview(overrides: SyncOverrides) {
    let (config, client) = prepare(overrides).await;

    let pb = spinner();
    pb.set_message("Gathering followed artists...");
    let mut tracks: Vec<Track> = match sync::desired_tracks(&client, &config, &mut |stage| {
        show_stage(&pb, &stage);
    })
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to gather recent songs: {}", e)
        }
    };

    let current = match sync::playlist_track_ids(&client, &config.playlist_id).await {
        Ok(ids) => ids,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to read playlist {}: {}", config.playlist_id, e)
        }
    };
    pb.finish_and_clear();

    let desired_ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let plan = reconcile::plan(&desired_ids, &current);

    tracks.sort_by(|a, b| {
        a.artist_names()
            .to_lowercase()
            .cmp(&b.artist_names().to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));

    info!(
        "{} recent songs; a sync would add {} and remove {} ({} mode).",
        tracks.len(),
        plan.to_add.len(),
        plan.to_remove.len(),
        config.mode
    );
}
