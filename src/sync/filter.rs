use chrono::{NaiveDate, Utc};

use crate::types::{Album, AlbumType, ExplicitPolicy, Track};

/// Whole days elapsed from `release_date` to `today`. Negative for releases
/// scheduled in the future.
pub fn age_in_days(release_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - release_date).num_days()
}

/// Age of an album measured against the current UTC date.
pub fn days_since_release(album: &Album) -> i64 {
    age_in_days(album.release_date, Utc::now().date_naive())
}

pub fn album_qualifies(album: &Album, lookback_days: u32) -> bool {
    album_qualifies_on(album, lookback_days, Utc::now().date_naive())
}

/// Compilations never qualify. Everything else qualifies while its age is
/// within the lookback window, boundary included.
pub fn album_qualifies_on(album: &Album, lookback_days: u32, today: NaiveDate) -> bool {
    album.album_type != AlbumType::Compilation
        && age_in_days(album.release_date, today) <= i64::from(lookback_days)
}

pub fn track_qualifies(track: &Track, policy: ExplicitPolicy) -> bool {
    policy == ExplicitPolicy::Allow || !track.explicit
}
