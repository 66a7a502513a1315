//! Collapses renditions of the same song into one track.
//!
//! Two tracks are the same song when their normalized titles and normalized,
//! sorted artist names match. Within such a group the [`SelectionPolicy`]
//! picks the representative; ties keep whichever track was seen first.

use std::{cmp::Ordering, collections::HashMap, str::FromStr};

use crate::{
    error::SyncError,
    types::{AlbumType, Track},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub title: String,
    pub artists: Vec<String>,
}

impl DedupKey {
    pub fn of(track: &Track) -> Self {
        let mut artists: Vec<String> = track.artists.iter().map(|a| normalize(&a.name)).collect();
        artists.sort();

        Self {
            title: normalize(&track.name),
            artists,
        }
    }
}

/// Lowercases and collapses runs of whitespace.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ranking applied inside a group of duplicates.
///
/// The default prefers explicit renditions, then album types in the order
/// `single`, `album`, `compilation`, `appears_on`. Types missing from
/// `album_type_order` rank after every listed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub prefer_explicit: bool,
    pub album_type_order: Vec<AlbumType>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            prefer_explicit: true,
            album_type_order: vec![
                AlbumType::Single,
                AlbumType::Album,
                AlbumType::Compilation,
                AlbumType::AppearsOn,
            ],
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = SyncError;

    /// Parses a comma separated album type order, e.g. `album,single`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let album_type_order: Vec<AlbumType> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(AlbumType::from)
            .collect();

        if album_type_order.is_empty() {
            return Err(SyncError::config("album type order must name at least one type"));
        }

        Ok(Self {
            album_type_order,
            ..Self::default()
        })
    }
}

impl SelectionPolicy {
    fn album_type_rank(&self, album_type: &AlbumType) -> usize {
        self.album_type_order
            .iter()
            .position(|t| t == album_type)
            .unwrap_or(self.album_type_order.len())
    }

    /// `Ordering::Less` means `a` is the better representative.
    pub fn compare(&self, a: &Track, b: &Track) -> Ordering {
        let explicit = if self.prefer_explicit {
            b.explicit.cmp(&a.explicit)
        } else {
            a.explicit.cmp(&b.explicit)
        };

        explicit.then_with(|| {
            self.album_type_rank(&a.album_type)
                .cmp(&self.album_type_rank(&b.album_type))
        })
    }
}

/// Returns one track per dedup group, in the order the groups were first seen.
pub fn select(tracks: Vec<Track>, policy: &SelectionPolicy) -> Vec<Track> {
    let mut groups: HashMap<DedupKey, usize> = HashMap::new();
    let mut chosen: Vec<Track> = Vec::new();

    for track in tracks {
        let key = DedupKey::of(&track);
        match groups.get(&key) {
            Some(&slot) => {
                if policy.compare(&track, &chosen[slot]) == Ordering::Less {
                    chosen[slot] = track;
                }
            }
            None => {
                groups.insert(key, chosen.len());
                chosen.push(track);
            }
        }
    }

    chosen
}

pub fn select_ids(tracks: Vec<Track>, policy: &SelectionPolicy) -> Vec<String> {
    select(tracks, policy).into_iter().map(|t| t.id).collect()
}
