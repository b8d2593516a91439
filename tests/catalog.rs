//! Catalog client and popular feed against a local stand-in for the catalog API.

use axum::{
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use movie_shelf::{
    fetch_popular, CatalogClient, CatalogError, CatalogSettings, FeedUpdate, PopularFeed,
};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

const TOKEN: &str = "test-token";

fn popular_body() -> Value {
    json!({
        "page": 1,
        "results": [
            {
                "id": 872585,
                "title": "Oppenheimer",
                "poster_path": "/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg",
                "overview": "The story of J. Robert Oppenheimer.",
                "release_date": "2023-07-19",
                "vote_average": 8.1,
                "original_language": "en"
            },
            {
                "id": 346698,
                "title": "Barbie",
                "poster_path": "/iuFNMS8U5cb6xfzi51Dbkovj7vM.jpg",
                "overview": "Barbie and Ken are having the time of their lives.",
                "release_date": "2023-07-19",
                "vote_average": 7.0,
                "original_language": "en"
            }
        ],
        "total_pages": 1,
        "total_results": 2
    })
}

async fn popular(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != format!("Bearer {TOKEN}") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            })),
        );
    }
    (StatusCode::OK, Json(popular_body()))
}

/// Serve `router` on an ephemeral port from a background runtime.
/// Returns the API root.
fn serve(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{addr}/3")
}

fn catalog() -> String {
    serve(Router::new().route("/3/movie/popular", get(popular)))
}

// ---------------------------------------------------------------------------
// 1. Client
// ---------------------------------------------------------------------------

#[test]
fn popular_decodes_results() {
    let client = CatalogClient::new(&catalog(), TOKEN).unwrap();
    let movies = client.popular().unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, 872585);
    assert_eq!(movies[0].poster_path, "/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg");
    assert_eq!(movies[1].title, "Barbie");
}

#[test]
fn wrong_token_is_authentication_error() {
    let client = CatalogClient::new(&catalog(), "nope").unwrap();
    match client.popular().unwrap_err() {
        CatalogError::Authentication { message } => {
            assert!(message.starts_with("Invalid API key"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn server_error_maps_to_api_error() {
    let base = serve(Router::new().route(
        "/3/movie/popular",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ));
    let err = CatalogClient::new(&base, TOKEN).unwrap().popular().unwrap_err();

    assert!(matches!(err, CatalogError::Api { status: 503, .. }));
}

#[test]
fn unknown_endpoint_is_not_found() {
    let base = serve(Router::new());
    let err = CatalogClient::new(&base, TOKEN).unwrap().popular().unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn malformed_body_is_decode_error() {
    let base = serve(Router::new().route(
        "/3/movie/popular",
        get(|| async { Json(json!({ "results": [{ "id": 1 }] })) }),
    ));
    let err = CatalogClient::new(&base, TOKEN).unwrap().popular().unwrap_err();

    assert!(matches!(err, CatalogError::Decode(_)));
}

// ---------------------------------------------------------------------------
// 2. Token from the environment
// ---------------------------------------------------------------------------

#[test]
fn fetch_popular_uses_token_from_environment() {
    std::env::set_var("MOVIE_SHELF_IT_TOKEN", TOKEN);
    let settings = CatalogSettings {
        api_url: catalog(),
        token_var: "MOVIE_SHELF_IT_TOKEN".into(),
        ..Default::default()
    };

    assert_eq!(fetch_popular(&settings).unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// 3. Feed
// ---------------------------------------------------------------------------

fn wait(feed: &mut PopularFeed) -> FeedUpdate {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        match feed.poll() {
            FeedUpdate::Loading if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(10))
            }
            other => return other,
        }
    }
}

#[test]
fn feed_delivers_once_and_allows_one_request_at_a_time() {
    std::env::set_var("MOVIE_SHELF_IT_FEED_TOKEN", TOKEN);
    let mut feed = PopularFeed::new(CatalogSettings {
        api_url: catalog(),
        token_var: "MOVIE_SHELF_IT_FEED_TOKEN".into(),
        ..Default::default()
    });

    assert!(feed.refresh());
    assert!(!feed.refresh());

    match wait(&mut feed) {
        FeedUpdate::Ready(movies) => assert_eq!(movies.len(), 2),
        other => panic!("unexpected update: {other:?}"),
    }
    assert_eq!(feed.poll(), FeedUpdate::Idle);
    assert!(feed.refresh());
}

#[test]
fn feed_failure_is_quiet() {
    std::env::set_var("MOVIE_SHELF_IT_FEED_BAD_TOKEN", "wrong");
    let mut feed = PopularFeed::new(CatalogSettings {
        api_url: catalog(),
        token_var: "MOVIE_SHELF_IT_FEED_BAD_TOKEN".into(),
        ..Default::default()
    });

    feed.refresh();
    assert_eq!(wait(&mut feed), FeedUpdate::Failed);
}
