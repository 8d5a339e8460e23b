use super::*;
use crate::net::types::{ListPage, Pagination};

fn response(items: Vec<&'static str>, total: u64, total_pages: u32) -> ApiListResponse<&'static str> {
    ApiListResponse {
        status_code: 200,
        message: "OK".into(),
        timestamp: None,
        data: ListPage {
            data: items,
            meta: Pagination { page: 1, limit: 10, total, total_pages, has_next_page: total_pages > 1, has_prev_page: false },
        },
    }
}

#[test]
fn default_is_first_page_of_ten() {
    let list: PagedList<&str> = PagedList::default();
    assert_eq!(list.params(), PageParams { page: 1, limit: 10 });
    assert!(list.page_numbers().is_empty());
}

#[test]
fn apply_replaces_items_and_clears_loading() {
    let mut list = PagedList::default();
    list.begin();
    assert!(list.loading);
    list.apply(response(vec!["a", "b"], 31, 4));
    assert!(!list.loading);
    assert_eq!(list.items, vec!["a", "b"]);
    assert_eq!(list.total, 31);
    assert_eq!(list.page_numbers(), vec![1, 2, 3, 4]);
}

#[test]
fn go_to_page_rejects_out_of_range() {
    let mut list = PagedList::default();
    list.apply(response(vec!["a"], 31, 4));

    assert!(!list.go_to_page(0));
    assert!(!list.go_to_page(5));
    assert_eq!(list.page, 1);

    assert!(list.go_to_page(4));
    assert_eq!(list.params().page, 4);
}

#[test]
fn go_to_page_with_no_pages_is_rejected() {
    let mut list: PagedList<&str> = PagedList::default();
    assert!(!list.go_to_page(1));
}

#[test]
fn fail_keeps_items_and_uses_backend_message() {
    let mut list = PagedList::default();
    list.apply(response(vec!["a"], 1, 1));
    list.begin();
    list.fail(&ApiError::Status { status: 403, message: Some("Forbidden resource".into()) }, "Failed to load users");
    assert_eq!(list.error.as_deref(), Some("Forbidden resource"));
    assert_eq!(list.items, vec!["a"]);
    assert!(!list.loading);
}

#[test]
fn fail_without_backend_message_uses_fallback() {
    let mut list: PagedList<&str> = PagedList::default();
    list.fail(&ApiError::Transport("offline".into()), "Failed to load products");
    assert_eq!(list.error.as_deref(), Some("Failed to load products"));
}

#[test]
fn begin_clears_previous_error() {
    let mut list: PagedList<&str> = PagedList::default();
    list.fail(&ApiError::Transport("offline".into()), "Failed");
    list.begin();
    assert_eq!(list.error, None);
}

#[test]
fn showing_range_clamps_to_total() {
    let mut list = PagedList::default();
    list.apply(response(vec!["a"], 31, 4));
    assert_eq!(list.showing_range(), Some((1, 10)));
    list.go_to_page(4);
    assert_eq!(list.showing_range(), Some((31, 31)));
}

#[test]
fn showing_range_empty_list() {
    let list: PagedList<&str> = PagedList::default();
    assert_eq!(list.showing_range(), None);
}
