use super::*;

#[test]
fn href_without_query_is_the_path() {
    assert_eq!(NavTarget::new("/auth/login").href(), "/auth/login");
}

#[test]
fn href_percent_encodes_query_values() {
    let target = NavTarget::new("/auth/login").with_query("returnUrl", "/models?page=2");
    assert_eq!(target.href(), "/auth/login?returnUrl=%2Fmodels%3Fpage%3D2");
    assert_eq!(target.query_value("returnUrl"), Some("/models?page=2"));
    assert_eq!(target.query_value("missing"), None);
}

#[test]
fn internal_paths_are_accepted() {
    assert!(is_internal_path("/"));
    assert!(is_internal_path("/dashboard"));
    assert!(is_internal_path("/models?page=2"));
}

#[test]
fn external_and_protocol_relative_paths_are_rejected() {
    assert!(!is_internal_path(""));
    assert!(!is_internal_path("dashboard"));
    assert!(!is_internal_path("https://evil.com"));
    assert!(!is_internal_path("//evil.com"));
    assert!(!is_internal_path("/\\evil.com"));
}

#[test]
fn safe_return_url_falls_back() {
    assert_eq!(safe_return_url(Some("/lines"), "/"), "/lines");
    assert_eq!(safe_return_url(Some("//evil.com"), "/"), "/");
    assert_eq!(safe_return_url(None, "/"), "/");
}

#[test]
fn query_param_decodes_values() {
    let search = "?returnUrl=%2Fdashboard&token=abc+def";
    assert_eq!(query_param(search, "returnUrl").as_deref(), Some("/dashboard"));
    assert_eq!(query_param(search, "token").as_deref(), Some("abc def"));
    assert_eq!(query_param(search, "resetToken"), None);
}

#[test]
fn query_param_without_value_is_empty() {
    assert_eq!(query_param("flag&x=1", "flag").as_deref(), Some(""));
    assert_eq!(query_param("", "x"), None);
}
