use reqwest::Method;

use crate::{
    error::Result,
    spotify::{SpotifyClient, track_uri},
    types::{
        Page, Paging, PlaylistEntry, PlaylistItem, PlaylistUrisRequest, RemoveTracksRequest,
        SnapshotResponse, TrackUri,
    },
};

impl SpotifyClient {
    /// Retrieves one page of the playlist's contents. Entries without a
    /// catalog track are kept so the page keeps its size.
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistEntry>> {
        let api_url = self.url(&format!(
            "/playlists/{playlist_id}/tracks?limit={limit}&offset={offset}"
        ));

        let json = self.get::<Paging<PlaylistItem>>(&api_url).await?;
        let entries = json
            .items
            .into_iter()
            .map(|item| PlaylistEntry {
                track_id: item.track.and_then(|t| t.id),
            })
            .collect();

        Ok(Page {
            items: entries,
            total: json.total,
        })
    }

    pub async fn replace_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let body = PlaylistUrisRequest {
            uris: track_ids.iter().map(|id| track_uri(id)).collect(),
        };
        self.request::<SnapshotResponse, _>(Method::PUT, &self.tracks_url(playlist_id), Some(&body))
            .await?;
        Ok(())
    }

    pub async fn remove_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let body = RemoveTracksRequest {
            tracks: track_ids
                .iter()
                .map(|id| TrackUri { uri: track_uri(id) })
                .collect(),
        };
        self.request::<SnapshotResponse, _>(
            Method::DELETE,
            &self.tracks_url(playlist_id),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let body = PlaylistUrisRequest {
            uris: track_ids.iter().map(|id| track_uri(id)).collect(),
        };
        self.request::<SnapshotResponse, _>(Method::POST, &self.tracks_url(playlist_id), Some(&body))
            .await?;
        Ok(())
    }

    fn tracks_url(&self, playlist_id: &str) -> String {
        self.url(&format!("/playlists/{playlist_id}/tracks"))
    }
}
