//! Integration tests for [`HttpAssetFetcher`] against a local Axum server.
//!
//! The server binds to an ephemeral port on loopback and stands in for the
//! conference site that hosts speaker photos and logos.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;
use talkgen_core::{AssetError, GenerateError, HttpAssetFetcher, RecordGenerator, mirror_asset};
use talkgen_types::Event;
use tokio::net::TcpListener;

async fn spawn_asset_host() -> String {
    let router = Router::new()
        .route("/img/pic.jpg", get(|| async { b"\xff\xd8jpeg".to_vec() }))
        .route("/logo.png", get(|| async { b"\x89PNG".to_vec() }))
        .route(
            "/private.png",
            get(|| async { (StatusCode::FORBIDDEN, "no") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn scratch_root() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("talkgen-http-{}", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn downloads_and_strips_query_from_extension() {
    let base = spawn_asset_host().await;
    let root = scratch_root();
    let fetcher = HttpAssetFetcher::new(Duration::from_secs(5)).unwrap();

    let written = mirror_asset(&fetcher, &base, "/img/pic.jpg?v=2", &root.join("dir/Logo"))
        .await
        .unwrap();

    assert_eq!(written, root.join("dir/Logo.jpg"));
    assert_eq!(std::fs::read(&written).unwrap(), b"\xff\xd8jpeg");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let base = spawn_asset_host().await;
    let root = scratch_root();
    let fetcher = HttpAssetFetcher::new(Duration::from_secs(5)).unwrap();

    let err = mirror_asset(&fetcher, &base, "/private.png", &root.join("Logo"))
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::Status { status, .. } if status == StatusCode::FORBIDDEN));
    assert!(!root.join("Logo.png").exists());
}

#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpAssetFetcher::new(Duration::from_secs(5)).unwrap();
    let err = mirror_asset(
        &fetcher,
        &format!("http://{addr}"),
        "/logo.png",
        &scratch_root().join("Logo"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AssetError::Request { .. }));
}

#[tokio::test]
async fn generator_mirrors_over_http() {
    let base = spawn_asset_host().await;
    let root = scratch_root();
    let fetcher = HttpAssetFetcher::new(Duration::from_secs(5)).unwrap();
    let generator = RecordGenerator::new(fetcher, base, &root);

    let event = Event::from_value(json!({
        "title": "Over HTTP",
        "state": "confirmed",
        "speakers": [{"public_name": "Pic", "image": "/img/pic.jpg"}],
        "logo": "/logo.png"
    }))
    .unwrap();
    let generated = generator.generate(&event).await.unwrap();

    let dir = root.join("Over_HTTP");
    assert_eq!(generated.assets, [dir.join("SpeakerOne.jpg"), dir.join("Logo.png")]);
    assert!(dir.join("def.tex").exists());

    let broken = Event::from_value(json!({
        "title": "Forbidden Logo",
        "state": "confirmed",
        "logo": "/private.png"
    }))
    .unwrap();
    let err = generator.generate(&broken).await.unwrap_err();
    assert!(matches!(err, GenerateError::Asset { .. }));
    assert!(!root.join("Forbidden_Logo").join("def.tex").exists());

    let _ = std::fs::remove_dir_all(&root);
}
