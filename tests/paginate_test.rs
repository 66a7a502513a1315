use std::cell::Cell;

use sporlsync::{
    error::SyncError,
    sync::paginate::{fetch_all_after, fetch_all_offset},
    types::Page,
};

fn records(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn slice(all: &[u32], limit: u32, offset: u32) -> Vec<u32> {
    all.iter()
        .skip(offset as usize)
        .take(limit as usize)
        .copied()
        .collect()
}

#[tokio::test]
async fn test_offset_pagination_short_last_page() {
    let all = records(45);
    let calls = Cell::new(0);
    let offsets = std::cell::RefCell::new(Vec::new());

    let fetched = fetch_all_offset(20, |limit, offset| {
        calls.set(calls.get() + 1);
        offsets.borrow_mut().push(offset);
        let page = Page::new(slice(&all, limit, offset));
        async move { Ok(page) }
    })
    .await
    .unwrap();

    assert_eq!(fetched, all);
    assert_eq!(calls.get(), 3);
    assert_eq!(offsets.into_inner(), vec![0, 20, 40]);
}

#[tokio::test]
async fn test_offset_pagination_exact_multiple_needs_trailing_request() {
    let all = records(40);
    let calls = Cell::new(0);

    let fetched = fetch_all_offset(20, |limit, offset| {
        calls.set(calls.get() + 1);
        let page = Page::new(slice(&all, limit, offset));
        async move { Ok(page) }
    })
    .await
    .unwrap();

    assert_eq!(fetched.len(), 40);
    // Two full pages plus the empty one that ends the listing
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn test_offset_pagination_reported_total_skips_trailing_request() {
    let all = records(40);
    let calls = Cell::new(0);

    let fetched = fetch_all_offset(20, |limit, offset| {
        calls.set(calls.get() + 1);
        let page = Page::with_total(slice(&all, limit, offset), 40);
        async move { Ok(page) }
    })
    .await
    .unwrap();

    assert_eq!(fetched.len(), 40);
    assert_eq!(calls.get(), 2);
}

#[tokio::test]
async fn test_offset_pagination_empty_listing() {
    let calls = Cell::new(0);

    let fetched: Vec<u32> = fetch_all_offset(50, |_, _| {
        calls.set(calls.get() + 1);
        async move { Ok(Page::new(Vec::new())) }
    })
    .await
    .unwrap();

    assert!(fetched.is_empty());
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_offset_pagination_propagates_errors() {
    let all = records(100);

    let result = fetch_all_offset(20, |limit, offset| {
        let page = Page::new(slice(&all, limit, offset));
        async move {
            if offset == 40 {
                Err(SyncError::Upstream {
                    status: 500,
                    message: "boom".into(),
                })
            } else {
                Ok(page)
            }
        }
    })
    .await;

    assert!(matches!(result, Err(SyncError::Upstream { status: 500, .. })));
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let result: Result<Vec<u32>, _> =
        fetch_all_offset(0, |_, _| async move { Ok(Page::new(Vec::new())) }).await;
    assert!(matches!(result, Err(SyncError::Config(_))));
}

#[tokio::test]
async fn test_cursor_pagination_uses_last_key() {
    let all: Vec<String> = (0..5).map(|i| format!("artist{i}")).collect();
    let cursors = std::cell::RefCell::new(Vec::new());

    let fetched = fetch_all_after(
        2,
        |id: &String| id.clone(),
        |limit, after| {
            cursors.borrow_mut().push(after.clone());
            let start = match &after {
                Some(id) => all.iter().position(|a| a == id).unwrap() + 1,
                None => 0,
            };
            let page = Page::new(
                all.iter()
                    .skip(start)
                    .take(limit as usize)
                    .cloned()
                    .collect(),
            );
            async move { Ok(page) }
        },
    )
    .await
    .unwrap();

    assert_eq!(fetched, all);
    assert_eq!(
        cursors.into_inner(),
        vec![
            None,
            Some("artist1".to_string()),
            Some("artist3".to_string())
        ]
    );
}

fn cursor_page(all: &[String], limit: u32, after: &Option<String>) -> Vec<String> {
    let start = match after {
        Some(id) => all.iter().position(|a| a == id).unwrap() + 1,
        None => 0,
    };
    all.iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_cursor_pagination_exact_multiple_needs_trailing_request() {
    let all: Vec<String> = (0..4).map(|i| format!("artist{i}")).collect();
    let cursors = std::cell::RefCell::new(Vec::new());

    let fetched = fetch_all_after(
        2,
        |id: &String| id.clone(),
        |limit, after| {
            let page = Page::new(cursor_page(&all, limit, &after));
            cursors.borrow_mut().push(after);
            async move { Ok(page) }
        },
    )
    .await
    .unwrap();

    assert_eq!(fetched, all);
    // Two full pages plus the empty one that ends the listing
    assert_eq!(
        cursors.into_inner(),
        vec![
            None,
            Some("artist1".to_string()),
            Some("artist3".to_string())
        ]
    );
}

#[tokio::test]
async fn test_cursor_pagination_reported_total_skips_trailing_request() {
    let all: Vec<String> = (0..4).map(|i| format!("artist{i}")).collect();
    let calls = Cell::new(0);

    let fetched = fetch_all_after(
        2,
        |id: &String| id.clone(),
        |limit, after| {
            calls.set(calls.get() + 1);
            let page = Page::with_total(cursor_page(&all, limit, &after), 4);
            async move { Ok(page) }
        },
    )
    .await
    .unwrap();

    assert_eq!(fetched, all);
    assert_eq!(calls.get(), 2);
}
