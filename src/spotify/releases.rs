use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Album, Page, Paging, SimplifiedAlbum, SimplifiedTrack, Track},
    utils::ReleaseKinds,
};

impl SpotifyClient {
    /// Retrieves one page of an artist's releases.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify ID of the artist
    /// * `release_types` - Release groups to include (album, single, appears_on, compilation)
    /// * `limit` - Page size (1-50)
    /// * `offset` - Index of the first release of the page
    ///
    /// # Errors
    ///
    /// A release whose date cannot be read under its declared precision turns
    /// the whole page into a `Malformed` error.
    pub async fn get_release_for_artist(
        &self,
        artist_id: &str,
        release_types: &ReleaseKinds,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Album>> {
        let api_url = self.url(&format!(
            "/artists/{id}/albums?include_groups={include_groups}&limit={limit}&offset={offset}",
            id = artist_id,
            include_groups = release_types,
        ));

        let json = self.get::<Paging<SimplifiedAlbum>>(&api_url).await?;
        let albums = json
            .items
            .into_iter()
            .map(Album::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items: albums,
            total: json.total,
        })
    }

    /// Retrieves one page of an album's track listing. Every track inherits
    /// the album's type.
    pub async fn get_album_tracks(
        &self,
        album: &Album,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Track>> {
        let api_url = self.url(&format!(
            "/albums/{id}/tracks?limit={limit}&offset={offset}",
            id = album.id,
        ));

        let json = self.get::<Paging<SimplifiedTrack>>(&api_url).await?;
        let tracks = json
            .items
            .into_iter()
            .map(|t| Track::from_album_entry(t, album))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items: tracks,
            total: json.total,
        })
    }
}
