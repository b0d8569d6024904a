//! Full-stack flows: wiremock remote API, temp-file mirror, real gateway.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use shopwindow_catalog::mirror::JsonFileStore;
use shopwindow_catalog::remote::HttpProductSource;
use shopwindow_catalog::{CatalogClient, CatalogError};
use shopwindow_core::{Product, ProductId, ProductPatch};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RATE: Decimal = shopwindow_catalog::currency::DEFAULT_EXCHANGE_RATE;

fn raw_json(id: u64, title: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": "electronics",
        "image": format!("https://example.com/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 25 }
    })
}

async fn client_for(
    server: &MockServer,
    mirror_path: &std::path::Path,
) -> CatalogClient<JsonFileStore, HttpProductSource> {
    let source = HttpProductSource::with_base_url(server.uri().parse().unwrap());
    CatalogClient::new(JsonFileStore::new(mirror_path), source, RATE)
}

#[tokio::test]
async fn collection_flow_hits_the_wire_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            raw_json(1, "Monitor", 200.0),
            raw_json(2, "Keyboard", 49.9),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mirror = dir.path().join("products.json");
    let client = client_for(&server, &mirror).await;

    let first = client.get_collection().await.unwrap();
    let second = client.get_collection().await.unwrap();

    assert_eq!(first, second);
    // 200.00 * 83.5 = 16700.00
    assert_eq!(first[0].price, Decimal::new(1_670_000, 2));
    assert!(mirror.exists(), "mirror blob was seeded");
    // The .expect(1) on the mock verifies the single wire hit on drop
}

#[tokio::test]
async fn committed_update_is_persisted_in_the_mirror_blob() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([raw_json(1, "Monitor", 200.0)])),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mirror = dir.path().join("products.json");
    let client = client_for(&server, &mirror).await;

    client.get_collection().await.unwrap();
    client
        .update(
            ProductId::new(1),
            ProductPatch {
                title: Some("Studio Monitor".to_string()),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();

    // Read the blob directly: the mirror matches the committed mutation
    let blob = std::fs::read(&mirror).unwrap();
    let stored: Vec<Product> = serde_json::from_slice(&blob).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Studio Monitor");
}

#[tokio::test]
async fn single_item_fetch_converts_but_does_not_seed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_json(7, "Webcam", 10.0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([raw_json(7, "Webcam", 10.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mirror = dir.path().join("products.json");
    let client = client_for(&server, &mirror).await;

    let product = client.get_by_id(ProductId::new(7)).await.unwrap();
    // 10.00 source units -> round(10.00 * 83.5, 2) display units
    assert_eq!(product.price, Decimal::new(83_500, 2));
    assert!(!mirror.exists(), "single-item fetch must not seed the mirror");

    // The collection read still needs the wire
    client.get_collection().await.unwrap();
}

#[tokio::test]
async fn remote_404_surfaces_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir.path().join("products.json")).await;

    let err = client.get_by_id(ProductId::new(999)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(999)));
}

#[tokio::test]
async fn clear_triggers_a_second_wire_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([raw_json(1, "Monitor", 200.0)])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mirror = dir.path().join("products.json");
    let client = client_for(&server, &mirror).await;

    client.get_collection().await.unwrap();
    client.clear().await.unwrap();
    assert!(!mirror.exists());
    client.get_collection().await.unwrap();
}
