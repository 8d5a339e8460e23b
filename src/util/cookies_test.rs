use time::Duration;

use super::*;

fn later() -> Option<OffsetDateTime> {
    Some(OffsetDateTime::now_utc() + Duration::days(1))
}

#[test]
fn name_variations_order() {
    assert_eq!(
        name_variations("access_token", &["authToken"]),
        vec!["access_token", "access-token", "ACCESS_TOKEN", "authToken"]
    );
    assert_eq!(name_variations("Refresh-Token", &[]), vec!["Refresh-Token", "Refresh_Token", "refresh-token", "REFRESH-TOKEN"]);
}

#[test]
fn get_with_variations_finds_alternate_spelling() {
    let store = MemoryCookieStore::new();
    store.set("access-token", "abc", later());
    assert_eq!(store.get_with_variations("access_token", &[]).as_deref(), Some("abc"));
}

#[test]
fn get_with_variations_skips_empty_values() {
    let store = MemoryCookieStore::new();
    store.set("access_token", "", None);
    store.set("authToken", "xyz", None);
    assert_eq!(store.get_with_variations("access_token", &["authToken"]).as_deref(), Some("xyz"));
    assert_eq!(access_token(&store).as_deref(), Some("xyz"));
}

#[test]
fn get_with_variations_none_when_absent() {
    let store = MemoryCookieStore::new();
    assert_eq!(store.get_with_variations("refresh_token", &["refreshToken"]), None);
}

#[test]
fn delete_expires_at_epoch() {
    let store = MemoryCookieStore::new();
    store.set("refresh_token", "r1", later());
    store.delete("refresh_token");

    assert_eq!(store.get("refresh_token"), None);
    let last = store.writes().pop().unwrap();
    assert!(last.starts_with("refresh_token=;"));
    assert!(last.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
}

#[test]
fn writes_carry_path_secure_and_samesite() {
    let written = format_cookie("rememberMe", "true", None);
    assert!(written.starts_with("rememberMe=true"));
    assert!(written.contains("Path=/"));
    assert!(written.contains("Secure"));
    assert!(written.contains("SameSite=Strict"));
    assert!(!written.contains("Expires"));
}

#[test]
fn values_are_percent_encoded_and_decoded() {
    let written = format_cookie("note", "a b;c", None);
    assert!(written.starts_with("note=a%20b%3Bc"));

    let parsed = parse_cookie_header("note=a%20b%3Bc; theme=dark");
    assert_eq!(parsed, vec![("note".to_owned(), "a b;c".to_owned()), ("theme".to_owned(), "dark".to_owned())]);
}

#[test]
fn clear_auth_cookies_expires_every_known_name() {
    let store = MemoryCookieStore::new();
    for name in ACCESS_TOKEN_COOKIES.iter().chain(REFRESH_TOKEN_COOKIES.iter()) {
        store.set(name, "token", later());
    }
    store.set("theme", "dark", later());

    clear_auth_cookies(&store);

    assert_eq!(store.all(), vec![("theme".to_owned(), "dark".to_owned())]);
    let cleared: Vec<String> = store.writes().into_iter().filter(|w| w.contains("1970")).collect();
    assert_eq!(cleared.len(), ACCESS_TOKEN_COOKIES.len() + REFRESH_TOKEN_COOKIES.len());
}
