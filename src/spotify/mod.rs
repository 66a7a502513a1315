//! # Spotify Integration Module
//!
//! The catalog capabilities the sync core consumes, and their implementation
//! on top of the Spotify Web API.
//!
//! ## Architecture
//!
//! ```text
//! Sync core (paginate, filter, select, reconcile)
//!          ↓
//! Catalog trait
//!          ↓
//! SpotifyClient
//!     ├── Artist Operations (followed artists, cursor paging)
//!     ├── Release Operations (artist albums, album tracks)
//!     └── Playlist Operations (contents, replace, remove, add)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! The [`Catalog`] trait is the seam between the two: the core only sees
//! pages of domain records, which lets tests drive it with an in-memory fake.
//!
//! ## Error Handling
//!
//! Transient upstream failures are retried inside the client before they
//! surface:
//! - **502 Bad Gateway**: retried after 10 seconds, except for `POST`
//!   requests which are not idempotent
//! - **429 Too Many Requests**: retried after `Retry-After` when it is at
//!   most 120 seconds
//!
//! A request is attempted at most [`MAX_ATTEMPTS`] times. Everything else
//! becomes a [`SyncError`] and aborts the pass. A success body that does not
//! decode into the expected records is [`SyncError::Malformed`].
//!
//! ## API Coverage
//!
//! - `GET /me/following` - Followed artists
//! - `GET /artists/{id}/albums` - Artist discography
//! - `GET /albums/{id}/tracks` - Album track listing
//! - `GET /playlists/{id}/tracks` - Playlist contents
//! - `PUT /playlists/{id}/tracks` - Replace playlist contents
//! - `DELETE /playlists/{id}/tracks` - Remove all occurrences of tracks
//! - `POST /playlists/{id}/tracks` - Append tracks
//! - `POST /api/token` - Token exchange and refresh

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod releases;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config,
    error::{Result, SyncError},
    management::TokenManager,
    types::{Album, Artist, Page, PlaylistEntry, Track},
    utils::ReleaseKinds,
    warning,
};

pub const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Paginated catalog queries and playlist mutations.
///
/// Every listing returns one page for the given limit and cursor; walking the
/// pages is left to [`crate::sync::paginate`].
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn followed_artists(&self, limit: u32, after: Option<String>) -> Result<Page<Artist>>;

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistEntry>>;

    async fn artist_albums(
        &self,
        artist_id: &str,
        include: &ReleaseKinds,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Album>>;

    async fn album_tracks(&self, album: &Album, limit: u32, offset: u32) -> Result<Page<Track>>;

    /// Overwrites the playlist with at most 100 tracks.
    async fn replace_playlist_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;

    /// Removes every occurrence of each of at most 100 tracks.
    async fn remove_all_occurrences(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;

    /// Appends at most 100 tracks.
    async fn add_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{track_id}")
}

/// Authenticated handle on the Web API. One instance serves a whole pass.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: String, tokens: TokenManager) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        })
    }

    /// Builds a client from the configured API URL and the cached token.
    pub async fn from_env() -> Result<Self> {
        let tokens = TokenManager::load().await?;
        Self::new(config::spotify_apiurl()?, tokens)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.tokens.lock().await.get_valid_token().await?;

            let mut request = self.http.request(method.clone(), url).bearer_auth(token);
            if let Some(b) = body {
                request = request.json(b);
            }
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                let body = response.bytes().await?;
                return decode(url, &body);
            }

            if attempt < MAX_ATTEMPTS {
                // A POST may have been applied before the gateway failed.
                if status == StatusCode::BAD_GATEWAY && method != Method::POST {
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue; // retry
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(0);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue; // retry
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds.",
                        retry_after
                    );
                }
            }

            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
    }
}

/// Decodes a success body. Records that do not match the expected shape are
/// malformed, not transport failures.
fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        let endpoint = url.split('?').next().unwrap_or(url);
        SyncError::malformed(format!("unexpected response from {endpoint}: {e}"))
    })
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn followed_artists(&self, limit: u32, after: Option<String>) -> Result<Page<Artist>> {
        self.get_followed_artists(limit, after).await
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistEntry>> {
        self.get_playlist_tracks(playlist_id, limit, offset).await
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        include: &ReleaseKinds,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Album>> {
        self.get_release_for_artist(artist_id, include, limit, offset)
            .await
    }

    async fn album_tracks(&self, album: &Album, limit: u32, offset: u32) -> Result<Page<Track>> {
        self.get_album_tracks(album, limit, offset).await
    }

    async fn replace_playlist_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.replace_tracks(playlist_id, track_ids).await
    }

    async fn remove_all_occurrences(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.remove_tracks(playlist_id, track_ids).await
    }

    async fn add_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.add_tracks(playlist_id, track_ids).await
    }
}
