//! # API Module
//!
//! Endpoints of the short-lived web server started by `sporlsync auth`.
//!
//! - [`callback`] receives the authorization code Spotify redirects to and
//!   exchanges it for a token using the PKCE verifier kept in the shared
//!   state.
//! - [`health`] answers with the crate name and version, handy to check that
//!   the redirect URI points at the right address before authorizing.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sporlsync::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
