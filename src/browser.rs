use reqwest::Url;

pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// Web search page for `query`, or `None` when there is nothing to search.
pub fn google_search_url(query: &str) -> Option<Url> {
    if query.trim().is_empty() {
        return None;
    }
    Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query)]).ok()
}

/// Fire and forget: failures are logged, nothing is returned to the caller.
pub fn open_in_browser(query: &str) {
    let Some(url) = google_search_url(query) else {
        return;
    };
    log::info!("opening {url}");
    if let Err(e) = webbrowser::open(url.as_str()) {
        log::warn!("failed to open browser: {e}");
    }
}

#[test]
fn test_google_search_url() {
    assert!(google_search_url("   ").is_none());

    let url = google_search_url("GTA V site:github.com").unwrap();
    assert_eq!(url.host_str(), Some("www.google.com"));
    assert_eq!(url.path(), "/search");
    let q = url
        .query_pairs()
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.into_owned());
    assert_eq!(q.as_deref(), Some("GTA V site:github.com"));
}
