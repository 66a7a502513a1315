use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::SyncError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a token endpoint answer. Refresh answers may omit the refresh
/// token and the scope.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

// ---------------------------------------------------------------------------
// Wire records as returned by the Web API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

/// Offset-paged listing envelope (`/artists/{id}/albums`, `/albums/{id}/tracks`,
/// `/playlists/{id}/tracks`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: Option<u32>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub album_type: String,
    /// Relation to the artist whose discography was listed. Only present on
    /// `/artists/{id}/albums` answers.
    #[serde(default)]
    pub album_group: Option<String>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
    pub explicit: bool,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistUrisRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
    AppearsOn,
    Other(String),
}

impl AlbumType {
    pub fn as_str(&self) -> &str {
        match self {
            AlbumType::Album => "album",
            AlbumType::Single => "single",
            AlbumType::Compilation => "compilation",
            AlbumType::AppearsOn => "appears_on",
            AlbumType::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for AlbumType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "album" => AlbumType::Album,
            "single" => AlbumType::Single,
            "compilation" => AlbumType::Compilation,
            "appears_on" => AlbumType::AppearsOn,
            other => AlbumType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDatePrecision {
    Day,
    Month,
    Year,
}

impl FromStr for ReleaseDatePrecision {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(ReleaseDatePrecision::Day),
            "month" => Ok(ReleaseDatePrecision::Month),
            "year" => Ok(ReleaseDatePrecision::Year),
            other => Err(SyncError::malformed(format!(
                "unknown release date precision '{other}'"
            ))),
        }
    }
}

impl ReleaseDatePrecision {
    /// Parses a release date string under this precision. Missing month/day
    /// components resolve to the first of the month/year.
    pub fn parse_date(&self, raw: &str) -> Result<NaiveDate, SyncError> {
        let parsed = match self {
            ReleaseDatePrecision::Day => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
            ReleaseDatePrecision::Month => {
                NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
            }
            ReleaseDatePrecision::Year => raw
                .parse::<i32>()
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        };

        parsed.ok_or_else(|| {
            SyncError::malformed(format!("release date '{raw}' does not match {self:?} precision"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub album_type: AlbumType,
    pub release_date: NaiveDate,
    pub release_date_precision: ReleaseDatePrecision,
}

impl TryFrom<SimplifiedAlbum> for Album {
    type Error = SyncError;

    fn try_from(raw: SimplifiedAlbum) -> Result<Self, Self::Error> {
        let precision: ReleaseDatePrecision = raw
            .release_date_precision
            .as_deref()
            .ok_or_else(|| {
                SyncError::malformed(format!("album {} has no release date precision", raw.id))
            })?
            .parse()?;
        let release_date = raw
            .release_date
            .as_deref()
            .ok_or_else(|| SyncError::malformed(format!("album {} has no release date", raw.id)))
            .and_then(|date| precision.parse_date(date))?;

        // A guest appearance keeps its own album_type on the wire and is only
        // marked through album_group. Compilations stay compilations.
        let wire_type = AlbumType::from(raw.album_type.as_str());
        let album_type = match raw.album_group.as_deref().map(AlbumType::from) {
            Some(AlbumType::AppearsOn) if wire_type != AlbumType::Compilation => {
                AlbumType::AppearsOn
            }
            _ => wire_type,
        };

        Ok(Album {
            album_type,
            id: raw.id,
            uri: raw.uri,
            name: raw.name,
            release_date,
            release_date_precision: precision,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub explicit: bool,
    pub album_type: AlbumType,
    pub album_id: String,
}

impl Track {
    /// Attaches the owning album to a simplified track listing entry.
    pub fn from_album_entry(raw: SimplifiedTrack, album: &Album) -> Result<Self, SyncError> {
        let id = raw.id.ok_or_else(|| {
            SyncError::malformed(format!("track '{}' on album {} has no id", raw.name, album.id))
        })?;

        Ok(Track {
            id,
            uri: raw.uri,
            name: raw.name,
            artists: raw.artists,
            explicit: raw.explicit,
            album_type: album.album_type.clone(),
            album_id: album.id.clone(),
        })
    }

    pub fn has_artist(&self, artist_uri: &str) -> bool {
        self.artists.iter().any(|a| a.uri == artist_uri)
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One entry of the target playlist. Local files carry no catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub track_id: Option<String>,
}

/// A single page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of records the listing holds, when the endpoint reports it.
    pub total: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, total: None }
    }

    pub fn with_total(items: Vec<T>, total: u32) -> Self {
        Self {
            items,
            total: Some(total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplicitPolicy {
    #[default]
    Allow,
    Deny,
}

impl FromStr for ExplicitPolicy {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" | "true" | "yes" => Ok(ExplicitPolicy::Allow),
            "deny" | "false" | "no" => Ok(ExplicitPolicy::Deny),
            other => Err(SyncError::config(format!(
                "invalid explicit policy '{other}', expected allow or deny"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Atomically overwrite the playlist contents.
    #[default]
    Replace,
    /// Remove stale tracks then append missing ones.
    Diff,
}

impl FromStr for SyncMode {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(SyncMode::Replace),
            "diff" => Ok(SyncMode::Diff),
            other => Err(SyncError::config(format!(
                "invalid sync mode '{other}', expected replace or diff"
            ))),
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Replace => f.write_str("replace"),
            SyncMode::Diff => f.write_str("diff"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub added: usize,
    pub removed: usize,
    pub desired_count: usize,
}

impl SyncSummary {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub artists: String,
    pub name: String,
    #[tabled(rename = "type")]
    pub album_type: String,
    pub explicit: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            artists: track.artist_names(),
            name: track.name.clone(),
            album_type: track.album_type.to_string(),
            explicit: if track.explicit { "E".into() } else { "".into() },
        }
    }
}
