//! Integration tests for the TMDB provider against a local fake catalog.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use medialist_core::MedialistConfig;
use medialist_core::config::SearchConfig;
use medialist_search::{CatalogSearchProvider, MediaSearchError, MediaType, TmdbProvider};
use serde_json::json;

async fn search_multi(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("api_key").map(String::as_str) != Some("test-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status_code": 7, "status_message": "Invalid API key"})),
        )
            .into_response();
    }

    let query = params.get("query").cloned().unwrap_or_default();
    Json(json!({
        "page": 1,
        "results": [
            {"id": 1396, "name": format!("{query} series"), "media_type": "tv",
             "poster_path": "/tv.jpg", "vote_average": 8.9, "first_air_date": "2008-01-20"},
            {"id": 603, "title": format!("{query} movie"), "media_type": "movie",
             "poster_path": "/movie.jpg", "vote_average": 8.2, "release_date": "1999-03-30"},
            {"id": 287, "name": "Somebody", "media_type": "person"}
        ],
        "total_pages": 1,
        "total_results": 3
    }))
    .into_response()
}

async fn tv_detail(Path(id): Path<u64>) -> Response {
    if id != 1396 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": 1396,
        "name": "Breaking Bad",
        "poster_path": "/tv.jpg",
        "vote_average": 8.9,
        "first_air_date": "2008-01-20"
    }))
    .into_response()
}

async fn start_fake_catalog() -> SocketAddr {
    let app = Router::new()
        .route("/3/search/multi", get(search_multi))
        .route("/3/tv/{id}", get(tv_detail));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    address
}

fn provider(address: SocketAddr, api_key: &str) -> TmdbProvider {
    let config = SearchConfig {
        api_base_url: format!("http://{address}/3"),
        api_key: Some(api_key.to_string()),
        ..MedialistConfig::for_testing().search
    };
    TmdbProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_search_multi_normalizes_mixed_results() {
    let address = start_fake_catalog().await;
    let provider = provider(address, "test-key");

    let results = provider.search_multi("bad").await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "bad series");
    assert_eq!(results[0].media_type, MediaType::Series);
    assert_eq!(results[1].title, "bad movie");
    assert_eq!(results[1].media_type, MediaType::Movie);
    assert!(!results[2].has_poster());
}

#[tokio::test]
async fn test_rejected_key_surfaces_provider_message() {
    let address = start_fake_catalog().await;
    let provider = provider(address, "wrong");

    let error = provider.search_multi("bad").await.unwrap_err();
    match error {
        MediaSearchError::ProviderError { reason } => {
            assert!(reason.contains("Invalid API key"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_found_and_missing() {
    let address = start_fake_catalog().await;
    let provider = provider(address, "test-key");

    let series = provider.lookup(MediaType::Series, 1396).await.unwrap();
    assert_eq!(series.title, "Breaking Bad");
    assert_eq!(series.media_type, MediaType::Series);

    let missing = provider.lookup(MediaType::Series, 1).await;
    assert_eq!(
        missing,
        Err(MediaSearchError::NotFound {
            media_type: MediaType::Series,
            id: 1
        })
    );
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let error = provider(address, "test-key")
        .search_multi("bad")
        .await
        .unwrap_err();
    assert!(matches!(error, MediaSearchError::NetworkError { .. }));
}
