use std::collections::HashSet;

use crate::{error::Result, spotify::Catalog, types::SyncMode};

/// Upper bound of track IDs accepted by one playlist mutation request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Add/remove sets turning the current playlist into the desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Desired IDs missing from the playlist, in desired order.
    pub to_add: Vec<String>,
    /// Playlist IDs no longer desired, in playlist order.
    pub to_remove: Vec<String>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn add_batches(&self) -> std::slice::Chunks<'_, String> {
        self.to_add.chunks(MAX_ITEMS_PER_REQUEST)
    }

    pub fn remove_batches(&self) -> std::slice::Chunks<'_, String> {
        self.to_remove.chunks(MAX_ITEMS_PER_REQUEST)
    }
}

pub fn plan(desired: &[String], current: &[String]) -> Reconciliation {
    let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    Reconciliation {
        to_add: ordered_difference(desired, &current_set),
        to_remove: ordered_difference(current, &desired_set),
    }
}

fn ordered_difference(from: &[String], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    from.iter()
        .filter(|id| !exclude.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Pushes a plan to the playlist. Nothing is sent for an empty plan.
///
/// Diff mode removes every occurrence of the stale IDs before appending the
/// missing ones. Replace mode overwrites the playlist with the first batch
/// of `desired` and appends the remainder.
pub async fn apply<C: Catalog + ?Sized>(
    catalog: &C,
    playlist_id: &str,
    mode: SyncMode,
    desired: &[String],
    plan: &Reconciliation,
) -> Result<()> {
    if plan.is_empty() {
        return Ok(());
    }

    match mode {
        SyncMode::Diff => {
            for batch in plan.remove_batches() {
                catalog.remove_all_occurrences(playlist_id, batch).await?;
            }
            for batch in plan.add_batches() {
                catalog.add_items(playlist_id, batch).await?;
            }
        }
        SyncMode::Replace => {
            let mut batches = desired.chunks(MAX_ITEMS_PER_REQUEST);
            let first = batches.next().unwrap_or(&[]);
            catalog.replace_playlist_items(playlist_id, first).await?;
            for batch in batches {
                catalog.add_items(playlist_id, batch).await?;
            }
        }
    }

    Ok(())
}
