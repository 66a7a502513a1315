//! # CLI Module
//!
//! User-facing commands. Each command resolves its configuration, builds the
//! Spotify client and hands over to the sync core, translating progress and
//! failures into console output.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication with PKCE
//! - [`sync`] - One reconciliation pass against the target playlist
//! - [`watch`] - Repeated passes separated by the configured interval
//! - [`preview`] - Dry run: the desired tracks and the pending changes
//!
//! ## Error Handling
//!
//! Configuration and authentication problems end the program before any
//! catalog request. In watch mode a failed pass is reported and the next pass
//! runs on schedule; the playlist keeps the state of the last successful pass.
//!
//! ## Usage
//!
//! ```bash
//! sporlsync auth
//! sporlsync sync --playlist 37i9dQZF1DX0XUsuxWHRQd --lookback-days 14
//! sporlsync watch --mode diff --interval 3600
//! sporlsync preview --explicit deny
//! ```

mod auth;
mod preview;
mod sync;

pub use auth::auth;
pub use preview::preview;
pub use sync::sync;
pub use sync::watch;
