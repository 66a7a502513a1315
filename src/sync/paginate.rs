//! Fetch-all-pages loops over the catalog listings.
//!
//! Continuation is size based: a page holding exactly `page_size` records might
//! be followed by more, so another request is issued. A short or empty page
//! ends the listing. When the endpoint reports a total, reaching it ends the
//! listing as well and saves the trailing empty request.

use std::future::Future;

use crate::{
    error::{Result, SyncError},
    types::Page,
};

/// Reads an offset-paged listing to the end. The offset advances by
/// `page_size` after every full page.
pub async fn fetch_all_offset<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    check_page_size(page_size)?;

    let mut records = Vec::new();
    let mut offset = 0;

    loop {
        let page = fetch(page_size, offset).await?;
        let returned = page.items.len();
        records.extend(page.items);

        if !has_more(returned, page_size, page.total, records.len()) {
            return Ok(records);
        }
        offset += page_size;
    }
}

/// Reads a cursor-paged listing to the end. The cursor for the next request is
/// the key of the last record of the previous page.
pub async fn fetch_all_after<T, K, F, Fut>(page_size: u32, key: K, mut fetch: F) -> Result<Vec<T>>
where
    K: Fn(&T) -> String,
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    check_page_size(page_size)?;

    let mut records = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = fetch(page_size, after.take()).await?;
        let returned = page.items.len();
        let next = page.items.last().map(&key);
        records.extend(page.items);

        if !has_more(returned, page_size, page.total, records.len()) {
            return Ok(records);
        }
        after = next;
    }
}

fn has_more(returned: usize, page_size: u32, total: Option<u32>, fetched: usize) -> bool {
    if returned == 0 || returned < page_size as usize {
        return false;
    }
    match total {
        Some(total) => fetched < total as usize,
        None => true,
    }
}

fn check_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 {
        return Err(SyncError::config("page size must be greater than zero"));
    }
    Ok(())
}
