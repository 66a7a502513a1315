use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Artist, FollowedArtistsResponse, Page},
};

impl SpotifyClient {
    /// Retrieves a page of followed artists.
    ///
    /// The endpoint is cursor based: `after` is the ID of the last artist of
    /// the previous page, `None` for the first page. The reported total is
    /// passed on so the paginator can stop without a trailing empty request.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of artists to return (1-50)
    /// * `after` - Optional cursor where the page starts
    pub async fn get_followed_artists(
        &self,
        limit: u32,
        after: Option<String>,
    ) -> Result<Page<Artist>> {
        let mut api_url = self.url(&format!("/me/following?type=artist&limit={limit}"));
        if let Some(after_val) = &after {
            api_url.push_str(&format!("&after={}", after_val));
        }

        let res = self.get::<FollowedArtistsResponse>(&api_url).await?;

        Ok(Page {
            items: res.artists.items,
            total: res.artists.total,
        })
    }
}
