#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use sporlsync::{
    config::SyncConfig,
    error::{Result, SyncError},
    spotify::Catalog,
    sync::select::SelectionPolicy,
    types::{
        Album, AlbumType, Artist, ExplicitPolicy, Page, PlaylistEntry, ReleaseDatePrecision,
        SyncMode, Track, TrackArtist,
    },
    utils::ReleaseKinds,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FollowedArtists { after: Option<String> },
    PlaylistTracks { offset: u32 },
    ArtistAlbums { artist_id: String, offset: u32 },
    AlbumTracks { album_id: String, offset: u32 },
    Replace(Vec<String>),
    Remove(Vec<String>),
    Add(Vec<String>),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Replace(_) | Call::Remove(_) | Call::Add(_))
    }
}

/// In-memory catalog. Mutations change the stored playlist so consecutive
/// passes observe each other.
#[derive(Default)]
pub struct FakeCatalog {
    pub artists: Vec<Artist>,
    pub albums: HashMap<String, Vec<Album>>,
    pub tracks: HashMap<String, Vec<Track>>,
    pub playlist: Mutex<Vec<Option<String>>>,
    pub calls: Mutex<Vec<Call>>,
    /// Album IDs whose track listing fails with an upstream error.
    pub failing_albums: Vec<String>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, artist: Artist, albums: Vec<(Album, Vec<Track>)>) -> Self {
        let mut listed = Vec::new();
        for (album, tracks) in albums {
            self.tracks.insert(album.id.clone(), tracks);
            listed.push(album);
        }
        self.albums.insert(artist.id.clone(), listed);
        self.artists.push(artist);
        self
    }

    pub fn with_playlist(self, ids: &[&str]) -> Self {
        *self.playlist.lock().unwrap() = ids.iter().map(|id| Some(id.to_string())).collect();
        self
    }

    pub fn playlist_ids(&self) -> Vec<String> {
        self.playlist
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn page_of<T: Clone>(all: &[T], limit: u32, offset: u32) -> Page<T> {
    let items = all
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Page::new(items)
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn followed_artists(&self, limit: u32, after: Option<String>) -> Result<Page<Artist>> {
        self.record(Call::FollowedArtists {
            after: after.clone(),
        });
        let start = match &after {
            Some(id) => self
                .artists
                .iter()
                .position(|a| &a.id == id)
                .map(|p| p + 1)
                .unwrap_or(self.artists.len()),
            None => 0,
        };
        Ok(page_of(&self.artists, limit, start as u32))
    }

    async fn playlist_tracks(
        &self,
        _playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistEntry>> {
        self.record(Call::PlaylistTracks { offset });
        let entries: Vec<PlaylistEntry> = self
            .playlist
            .lock()
            .unwrap()
            .iter()
            .map(|id| PlaylistEntry {
                track_id: id.clone(),
            })
            .collect();
        Ok(page_of(&entries, limit, offset))
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        _include: &ReleaseKinds,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Album>> {
        self.record(Call::ArtistAlbums {
            artist_id: artist_id.to_string(),
            offset,
        });
        let albums = self.albums.get(artist_id).cloned().unwrap_or_default();
        Ok(page_of(&albums, limit, offset))
    }

    async fn album_tracks(&self, album: &Album, limit: u32, offset: u32) -> Result<Page<Track>> {
        self.record(Call::AlbumTracks {
            album_id: album.id.clone(),
            offset,
        });
        if self.failing_albums.contains(&album.id) {
            return Err(SyncError::Upstream {
                status: 503,
                message: "service unavailable".into(),
            });
        }
        let tracks = self.tracks.get(&album.id).cloned().unwrap_or_default();
        Ok(page_of(&tracks, limit, offset))
    }

    async fn replace_playlist_items(&self, _playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.record(Call::Replace(track_ids.to_vec()));
        *self.playlist.lock().unwrap() = track_ids.iter().cloned().map(Some).collect();
        Ok(())
    }

    async fn remove_all_occurrences(&self, _playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.record(Call::Remove(track_ids.to_vec()));
        self.playlist
            .lock()
            .unwrap()
            .retain(|id| !matches!(id, Some(id) if track_ids.contains(id)));
        Ok(())
    }

    async fn add_items(&self, _playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.record(Call::Add(track_ids.to_vec()));
        self.playlist
            .lock()
            .unwrap()
            .extend(track_ids.iter().cloned().map(Some));
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

pub fn days_ago(days: i64) -> NaiveDate {
    today() - chrono::Duration::days(days)
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        uri: format!("spotify:artist:{id}"),
        name: name.to_string(),
    }
}

pub fn album(id: &str, album_type: AlbumType, released: NaiveDate) -> Album {
    Album {
        id: id.to_string(),
        uri: format!("spotify:album:{id}"),
        name: format!("Album {id}"),
        album_type,
        release_date: released,
        release_date_precision: ReleaseDatePrecision::Day,
    }
}

pub fn track(id: &str, name: &str, artists: &[&Artist], explicit: bool, album: &Album) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{id}"),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: Some(a.id.clone()),
                uri: a.uri.clone(),
                name: a.name.clone(),
            })
            .collect(),
        explicit,
        album_type: album.album_type.clone(),
        album_id: album.id.clone(),
    }
}

pub fn config(lookback_days: u32, explicit: ExplicitPolicy, mode: SyncMode) -> SyncConfig {
    SyncConfig {
        playlist_id: "playlist".to_string(),
        lookback_days,
        explicit,
        mode,
        include: ReleaseKinds::default(),
        selection: SelectionPolicy::default(),
        interval: std::time::Duration::from_secs(3600),
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
