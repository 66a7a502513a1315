//! Configuration management for sporlsync.
//!
//! Settings come from environment variables and from a `.env` file in the
//! local data directory. Command line flags override both for the sync
//! settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command line flags (sync settings only)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)
//!
//! Missing required values are reported as [`SyncError::Config`] before any
//! request is made.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{Result, SyncError},
    sync::select::SelectionPolicy,
    types::{ExplicitPolicy, SyncMode},
    utils::{self, ReleaseKinds},
};

pub const PLAYLIST_ID: &str = "SPORLSYNC_PLAYLIST_ID";
pub const LOOKBACK_DAYS: &str = "SPORLSYNC_LOOKBACK_DAYS";
pub const EXPLICIT: &str = "SPORLSYNC_EXPLICIT";
pub const MODE: &str = "SPORLSYNC_MODE";
pub const INCLUDE_GROUPS: &str = "SPORLSYNC_INCLUDE_GROUPS";
pub const ALBUM_TYPE_ORDER: &str = "SPORLSYNC_ALBUM_TYPE_ORDER";
pub const INTERVAL_SECS: &str = "SPORLSYNC_INTERVAL_SECS";

pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Scope needed to enumerate followed artists; always requested.
const FOLLOW_READ_SCOPE: &str = "user-follow-read";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/sporlsync/.env`
/// - macOS: `~/Library/Application Support/sporlsync/.env`
/// - Windows: `%LOCALAPPDATA%/sporlsync/.env`
///
/// The directory is created when missing. A missing file is not an error:
/// every setting can also be given through the process environment.
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlsync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.exists() {
        dotenv::from_path(&path)
            .map_err(|e| SyncError::config(format!("cannot read {}: {}", path.display(), e)))?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| SyncError::config(format!("{key} must be set")))
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String> {
    required("SERVER_ADDRESS")
}

pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Callback URL registered with the Spotify application,
/// e.g. `http://127.0.0.1:8080/callback`.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Requested OAuth scope. `user-follow-read` is appended when absent.
pub fn spotify_scope() -> Result<String> {
    Ok(with_follow_scope(&required("SPOTIFY_API_AUTH_SCOPE")?))
}

pub fn with_follow_scope(scope: &str) -> String {
    if scope.split_whitespace().any(|s| s == FOLLOW_READ_SCOPE) {
        scope.trim().to_string()
    } else {
        format!("{} {}", scope.trim(), FOLLOW_READ_SCOPE)
            .trim()
            .to_string()
    }
}

/// e.g. `https://accounts.spotify.com/authorize`
pub fn spotify_apiauth_url() -> Result<String> {
    required("SPOTIFY_API_AUTH_URL")
}

/// e.g. `https://api.spotify.com/v1`
pub fn spotify_apiurl() -> Result<String> {
    required("SPOTIFY_API_URL")
}

/// e.g. `https://accounts.spotify.com/api/token`
pub fn spotify_apitoken_url() -> Result<String> {
    required("SPOTIFY_API_TOKEN_URL")
}

/// Sync settings given on the command line. `None` falls back to the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct SyncOverrides {
    pub playlist_id: Option<String>,
    pub lookback_days: Option<u32>,
    pub explicit: Option<ExplicitPolicy>,
    pub mode: Option<SyncMode>,
    pub include: Option<ReleaseKinds>,
    pub interval_secs: Option<u64>,
}

/// Everything one sync pass needs to know.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub playlist_id: String,
    pub lookback_days: u32,
    pub explicit: ExplicitPolicy,
    pub mode: SyncMode,
    pub include: ReleaseKinds,
    pub selection: SelectionPolicy,
    /// Pause between passes in watch mode.
    pub interval: Duration,
}

impl SyncConfig {
    pub fn from_env(overrides: SyncOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Merges `overrides` with the values `lookup` yields for the
    /// `SPORLSYNC_*` keys.
    pub fn resolve<F>(overrides: SyncOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let playlist_id = overrides
            .playlist_id
            .or_else(|| setting(PLAYLIST_ID))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SyncError::config(format!("playlist id missing, set {PLAYLIST_ID} or --playlist"))
            })?;

        let lookback_days = match overrides.lookback_days {
            Some(days) => days,
            None => parse_setting::<u32>(LOOKBACK_DAYS, setting(LOOKBACK_DAYS))?.ok_or_else(
                || {
                    SyncError::config(format!(
                        "lookback window missing, set {LOOKBACK_DAYS} or --lookback-days"
                    ))
                },
            )?,
        };

        let explicit = match overrides.explicit {
            Some(policy) => policy,
            None => setting(EXPLICIT)
                .map(|v| v.parse::<ExplicitPolicy>())
                .transpose()?
                .unwrap_or_default(),
        };

        let mode = match overrides.mode {
            Some(mode) => mode,
            None => setting(MODE)
                .map(|v| v.parse::<SyncMode>())
                .transpose()?
                .unwrap_or_default(),
        };

        let include = match overrides.include {
            Some(kinds) => kinds,
            None => setting(INCLUDE_GROUPS)
                .map(|v| utils::parse_release_kinds(&v).map_err(SyncError::Config))
                .transpose()?
                .unwrap_or_default(),
        };

        let selection = setting(ALBUM_TYPE_ORDER)
            .map(|v| SelectionPolicy::from_str(&v))
            .transpose()?
            .unwrap_or_default();

        let interval_secs = match overrides.interval_secs {
            Some(secs) => secs,
            None => parse_setting::<u64>(INTERVAL_SECS, setting(INTERVAL_SECS))?
                .unwrap_or(DEFAULT_INTERVAL_SECS),
        };
        if interval_secs == 0 {
            return Err(SyncError::config("interval must be at least one second"));
        }

        Ok(Self {
            playlist_id,
            lookback_days,
            explicit,
            mode,
            include,
            selection,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

fn parse_setting<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .map_err(|_| SyncError::config(format!("{key} has an invalid value '{v}'")))
    })
    .transpose()
}
