use std::sync::Arc;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlsync::{
    cli,
    config::{self, SyncOverrides},
    error,
    types::{ExplicitPolicy, PkceToken, SyncMode},
    utils,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Sync the playlist once
    Sync(SyncOptions),

    /// Sync the playlist repeatedly
    Watch(WatchOptions),

    /// Show the recent songs and pending changes without touching the playlist
    Preview(SyncOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct SyncOptions {
    /// Target playlist ID
    #[clap(long = "playlist")]
    pub playlist_id: Option<String>,

    /// Number of days a release counts as recent
    #[clap(long)]
    pub lookback_days: Option<u32>,

    /// Explicit content policy (allow or deny)
    #[clap(long)]
    pub explicit: Option<ExplicitPolicy>,

    /// How the playlist is updated (replace or diff)
    #[clap(long)]
    pub mode: Option<SyncMode>,

    /// Release types to scan, comma separated (album, single, appears_on, compilation, all)
    #[clap(long = "include", value_parser = utils::parse_release_kinds)]
    pub include: Option<utils::ReleaseKinds>,
}

#[derive(Args, Debug, Clone)]
pub struct WatchOptions {
    #[clap(flatten)]
    pub sync: SyncOptions,

    /// Seconds to wait between two syncs
    #[clap(long)]
    pub interval: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl SyncOptions {
    fn overrides(self, interval_secs: Option<u64>) -> SyncOverrides {
        SyncOverrides {
            playlist_id: self.playlist_id,
            lookback_days: self.lookback_days,
            explicit: self.explicit,
            mode: self.mode,
            include: self.include,
            interval_secs,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Sync(opt) => cli::sync(opt.overrides(None)).await,
        Command::Watch(opt) => cli::watch(opt.sync.overrides(opt.interval)).await,
        Command::Preview(opt) => cli::preview(opt.overrides(None)).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
