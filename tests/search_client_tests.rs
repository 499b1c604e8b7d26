use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gfinder::data_models::{FileCategory, SearchOutcome, SearchResult};
use gfinder::search_client::{CseClient, SearchError};
use gfinder::session::SearchSession;

mod test_helpers {
    use super::*;

    pub const BOILERPLATE: &str = "-inurl:(jsp|pl|php|html|aspx|htm|cf|shtml) -inurl:(listen77|mp3raid|mp3toss|mp3drug|index_of|index-of|wallywashis|downloadmana)";

    pub fn client_for(server: &MockServer) -> Arc<CseClient> {
        Arc::new(CseClient::new(
            format!("{}/customsearch/v1", server.uri()),
            "test-key",
            "test-cx",
        ))
    }

    pub fn session_for(server: &MockServer) -> SearchSession {
        SearchSession::new(client_for(server))
            .with_today(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    pub fn items_body() -> serde_json::Value {
        json!({
            "searchInformation": { "totalResults": "2", "searchTime": 0.21 },
            "items": [
                {
                    "title": "Index of /games",
                    "link": "http://mirror.example/games/",
                    "snippet": "Parent Directory  gta5.iso",
                    "displayLink": "mirror.example"
                },
                {
                    "title": "Index of /iso",
                    "link": "http://files.example/iso/",
                    "snippet": "setup.exe",
                    "displayLink": "files.example"
                }
            ]
        })
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_search_returns_items_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "GTA V"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).search("GTA V").await?;
    assert_eq!(page.items.len(), 2);
    assert_eq!(
        page.items[0],
        SearchResult {
            title: "Index of /games".to_string(),
            link: "http://mirror.example/games/".to_string(),
            snippet: "Parent Directory  gta5.iso".to_string(),
            display_link: "mirror.example".to_string(),
        }
    );
    let info = page.information.expect("searchInformation present");
    assert_eq!(info.total_results, "2");
    Ok(())
}

#[tokio::test]
async fn test_forbidden_is_http_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The request is missing a valid API key." }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search("anything").await.unwrap_err();
    assert_eq!(
        err,
        SearchError::Http {
            status: 403,
            status_text: "Forbidden".to_string()
        }
    );
    assert_eq!(err.to_string(), "API Error: 403 Forbidden");
    Ok(())
}

#[tokio::test]
async fn test_session_success() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.set_free_text("GTA V");
    session.select_file_type(FileCategory::Software);

    let outcome = session.search().await.expect("query is not blank");
    assert_eq!(outcome.results().len(), 2);
    assert_eq!(session.outcome().await, outcome);
    Ok(())
}

#[tokio::test]
async fn test_empty_items_is_empty_outcome() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.search().await, Some(SearchOutcome::Empty));
    Ok(())
}

#[tokio::test]
async fn test_missing_items_is_empty_outcome() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": { "totalResults": "0", "searchTime": 0.1 }
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.search().await, Some(SearchOutcome::Empty));
    assert_eq!(session.outcome().await, SearchOutcome::Empty);
    Ok(())
}

#[tokio::test]
async fn test_forbidden_is_failure_outcome() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let session = session_for(&server);
    match session.search().await {
        Some(SearchOutcome::Failure(message)) => assert!(message.contains("403"), "{message}"),
        other => panic!("expected failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_failure() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let session = session_for(&server);
    match session.search().await {
        Some(SearchOutcome::Failure(message)) => {
            assert!(message.starts_with("error decoding response body"), "{message}");
            // serde_json's cause is kept after reqwest's label
            assert!(message.contains("expected value"), "{message}");
            assert!(!message.contains("test-key"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_failure_without_key() -> Result<()> {
    let client = Arc::new(CseClient::new(
        "http://127.0.0.1:9/customsearch/v1",
        "secret-key",
        "test-cx",
    ));
    let session = SearchSession::new(client);

    match session.search().await {
        Some(SearchOutcome::Failure(message)) => {
            assert!(message.starts_with("error sending request"), "{message}");
            assert!(message.contains("Connection refused"), "{message}");
            assert!(!message.contains("secret-key"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_form_sends_boilerplate_query() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", BOILERPLATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.preview(), BOILERPLATE);
    assert_eq!(session.search().await, Some(SearchOutcome::Empty));
    Ok(())
}

#[tokio::test]
async fn test_blank_query_is_noop() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body()))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.search_query("   ").await, None);
    assert_eq!(session.outcome().await, SearchOutcome::Idle);
    Ok(())
}

#[tokio::test]
async fn test_outcome_is_loading_while_in_flight() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items_body())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let (outcome, during) = tokio::join!(session.search(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.outcome().await
    });

    assert_eq!(during, SearchOutcome::Loading);
    assert_eq!(outcome.map(|o| o.results().len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_last_resolved_search_wins() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items_body())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    // "fast" is triggered second but resolves first, so "slow" has the last word
    let (slow, fast) = futures::join!(session.search_query("slow"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.search_query("fast").await
    });

    assert_eq!(fast, Some(SearchOutcome::Empty));
    assert_eq!(slow.as_ref().map(|o| o.results().len()), Some(2));
    assert_eq!(session.outcome().await.results().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_clear_resets_form_and_outcome() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.set_free_text("1985");
    session.select_file_type(FileCategory::Books);
    session.toggle_site("wikipedia.org");
    assert_eq!(session.placeholder(), "Search anything e.g 1985");

    let outcome = session.search().await;
    assert_eq!(
        outcome,
        Some(SearchOutcome::Failure(
            "API Error: 500 Internal Server Error".to_string()
        ))
    );

    session.clear().await;
    assert_eq!(session.placeholder(), "Search anything");
    assert_eq!(session.preview(), BOILERPLATE);
    assert_eq!(session.outcome().await, SearchOutcome::Idle);
    Ok(())
}
