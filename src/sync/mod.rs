//! # Sync Core
//!
//! One pass over the catalog: enumerate followed artists, collect their recent
//! releases, pick one rendition per song and bring the target playlist in line
//! with the result.
//!
//! ```text
//! followed artists ──▶ artist albums ──▶ album tracks      (paginate)
//!                          │                  │
//!                    album_qualifies    track_qualifies     (filter)
//!                                             │
//!                                       dedup + ranking     (select)
//!                                             │
//!              playlist tracks ──────▶ add/remove plan      (reconcile)
//! ```
//!
//! Every call is awaited in sequence. Nothing survives the pass: the next call
//! to [`reconcile`] starts from scratch. Any error aborts the pass before the
//! playlist is touched, except for errors raised while mutating it.

pub mod filter;
pub mod paginate;
pub mod reconcile;
pub mod select;

use chrono::{NaiveDate, Utc};

use crate::{
    config::SyncConfig,
    error::Result,
    spotify::Catalog,
    types::{Artist, SyncMode, SyncSummary, Track},
};

pub const FOLLOWED_ARTISTS_PAGE_SIZE: u32 = 20;
pub const PAGE_SIZE: u32 = 50;

/// Progress notifications emitted while a pass runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage<'a> {
    FollowedArtists(usize),
    Artist {
        index: usize,
        total: usize,
        name: &'a str,
    },
    Desired {
        tracks: usize,
        artists: usize,
    },
    Playlist(usize),
    Mutating {
        to_add: usize,
        to_remove: usize,
    },
    /// Replace mode refuses to blank the playlist.
    EmptyReplaceSkipped,
}

/// Followed artists sorted by name.
pub async fn followed_artists<C: Catalog + ?Sized>(catalog: &C) -> Result<Vec<Artist>> {
    let mut artists = paginate::fetch_all_after(
        FOLLOWED_ARTISTS_PAGE_SIZE,
        |artist: &Artist| artist.id.clone(),
        move |limit, after| catalog.followed_artists(limit, after),
    )
    .await?;

    artists.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artists)
}

/// Catalog IDs currently in the playlist, in playlist order. Entries without
/// an ID (local files) are skipped.
pub async fn playlist_track_ids<C: Catalog + ?Sized>(
    catalog: &C,
    playlist_id: &str,
) -> Result<Vec<String>> {
    let entries = paginate::fetch_all_offset(PAGE_SIZE, move |limit, offset| {
        catalog.playlist_tracks(playlist_id, limit, offset)
    })
    .await?;

    Ok(entries.into_iter().filter_map(|e| e.track_id).collect())
}

/// Qualifying tracks of one artist: tracks credited to the artist on albums
/// inside the lookback window, filtered by the explicit policy.
pub async fn artist_tracks<C: Catalog + ?Sized>(
    catalog: &C,
    artist: &Artist,
    config: &SyncConfig,
    today: NaiveDate,
) -> Result<Vec<Track>> {
    let albums = paginate::fetch_all_offset(PAGE_SIZE, move |limit, offset| {
        catalog.artist_albums(&artist.id, &config.include, limit, offset)
    })
    .await?;

    let mut tracks = Vec::new();
    for album in albums
        .iter()
        .filter(|a| filter::album_qualifies_on(a, config.lookback_days, today))
    {
        let album_tracks = paginate::fetch_all_offset(PAGE_SIZE, move |limit, offset| {
            catalog.album_tracks(album, limit, offset)
        })
        .await?;

        tracks.extend(album_tracks.into_iter().filter(|t| {
            t.has_artist(&artist.uri) && filter::track_qualifies(t, config.explicit)
        }));
    }

    Ok(tracks)
}

pub async fn desired_tracks<C: Catalog + ?Sized>(
    catalog: &C,
    config: &SyncConfig,
    on_stage: &mut dyn FnMut(Stage<'_>),
) -> Result<Vec<Track>> {
    desired_tracks_on(catalog, config, Utc::now().date_naive(), on_stage).await
}

pub async fn desired_tracks_on<C: Catalog + ?Sized>(
    catalog: &C,
    config: &SyncConfig,
    today: NaiveDate,
    on_stage: &mut dyn FnMut(Stage<'_>),
) -> Result<Vec<Track>> {
    let artists = followed_artists(catalog).await?;
    on_stage(Stage::FollowedArtists(artists.len()));

    let mut candidates = Vec::new();
    for (index, artist) in artists.iter().enumerate() {
        on_stage(Stage::Artist {
            index,
            total: artists.len(),
            name: &artist.name,
        });
        candidates.extend(artist_tracks(catalog, artist, config, today).await?);
    }

    let selected = select::select(candidates, &config.selection);
    on_stage(Stage::Desired {
        tracks: selected.len(),
        artists: artists.len(),
    });

    Ok(selected)
}

/// Runs one full pass against the current UTC date.
pub async fn reconcile<C: Catalog + ?Sized>(
    catalog: &C,
    config: &SyncConfig,
    on_stage: &mut dyn FnMut(Stage<'_>),
) -> Result<SyncSummary> {
    reconcile_on(catalog, config, Utc::now().date_naive(), on_stage).await
}

pub async fn reconcile_on<C: Catalog + ?Sized>(
    catalog: &C,
    config: &SyncConfig,
    today: NaiveDate,
    on_stage: &mut dyn FnMut(Stage<'_>),
) -> Result<SyncSummary> {
    let desired: Vec<String> = desired_tracks_on(catalog, config, today, on_stage)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();

    let current = playlist_track_ids(catalog, &config.playlist_id).await?;
    on_stage(Stage::Playlist(current.len()));

    if desired.is_empty() && config.mode == SyncMode::Replace {
        on_stage(Stage::EmptyReplaceSkipped);
        return Ok(SyncSummary::default());
    }

    let plan = reconcile::plan(&desired, &current);
    if !plan.is_empty() {
        on_stage(Stage::Mutating {
            to_add: plan.to_add.len(),
            to_remove: plan.to_remove.len(),
        });
        reconcile::apply(catalog, &config.playlist_id, config.mode, &desired, &plan).await?;
    }

    Ok(SyncSummary {
        added: plan.to_add.len(),
        removed: plan.to_remove.len(),
        desired_count: desired.len(),
    })
}
