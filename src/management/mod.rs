//! Token cache backing the authenticated Spotify client.

mod auth;

pub use auth::TokenManager;
