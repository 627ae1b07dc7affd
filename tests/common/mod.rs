//! Test server setup and HTTP helpers for the API integration tests.

use hotel_ops::db::Store;
use hotel_ops::routes::router;
use hotel_ops::state::AppState;
use std::sync::Arc;

pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub store: Store,
}

/// Starts the API on a random port with its own in-memory store.
pub async fn setup_test_server(seed: bool) -> TestContext {
    let store = Store::in_memory().await.expect("Failed to open store");
    if seed {
        store
            .seed_sample_rooms()
            .await
            .expect("Failed to seed sample rooms");
    }

    let state = Arc::new(AppState::new(store.clone()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestContext {
        base_url: format!("http://{}", addr),
        store,
    }
}

pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    reqwest::Client::new()
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

#[allow(dead_code)]
pub async fn delete(base_url: &str, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .delete(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make DELETE request")
}
