//! Integration tests for the search API client: request shape, error
//! mapping, and tolerance for sparse response bodies.

use bulletin::api::{FetchError, NewsClient};
use bulletin::config::Config;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> NewsClient {
    let config = Config {
        api_base: server.uri(),
        page_size: 6,
        from_date: "2024-09-30".to_string(),
        ..Config::default()
    };
    NewsClient::new(&config, Some("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn request_carries_all_search_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "business"))
        .and(query_param("from", "2024-09-30"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("page", "3"))
        .and(query_param("pageSize", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [],
            "totalResults": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server).search("business", 3).await.unwrap();
    assert_eq!(page.total_results, 0);
    assert!(page.articles.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = test_client(&server).search("science", 1).await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus(401)), "got: {err}");
}

#[tokio::test]
async fn unparsable_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = test_client(&server).search("science", 1).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got: {err}");
}

#[tokio::test]
async fn body_without_articles_or_total_yields_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let page = test_client(&server).search("science", 1).await.unwrap();
    assert!(page.articles.is_empty());
    assert_eq!(page.total_results, 0);
}

#[tokio::test]
async fn article_missing_source_survives_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                {"title": "No source here", "url": "https://example.com/a"},
                {"source": {"id": "w", "name": "The Wire"}, "title": "Sourced",
                 "url": "https://example.com/b"}
            ],
            "totalResults": 2
        })))
        .mount(&server)
        .await;

    let page = test_client(&server).search("science", 1).await.unwrap();
    assert_eq!(page.articles.len(), 2);
    assert_eq!(page.articles[0].source_name, None);
    assert_eq!(page.articles[1].source_name.as_deref(), Some("The Wire"));
}

#[tokio::test]
async fn duplicate_urls_across_responses_are_preserved() {
    // The upstream sometimes repeats an article across pages; the client
    // passes duplicates through untouched.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                {"title": "Same", "url": "https://example.com/dup"},
                {"title": "Same", "url": "https://example.com/dup"}
            ],
            "totalResults": 2
        })))
        .mount(&server)
        .await;

    let page = test_client(&server).search("science", 1).await.unwrap();
    assert_eq!(page.articles.len(), 2);
    assert_eq!(page.articles[0].url, page.articles[1].url);
}
