//! Session flag lifecycle, independent of the product mirror.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use shopwindow_catalog::CatalogClient;
use shopwindow_catalog::auth::{FileFlagStore, SessionGate};
use shopwindow_catalog::mirror::JsonFileStore;
use shopwindow_integration_tests::{ScriptedSource, fixture};

const RATE: Decimal = shopwindow_catalog::currency::DEFAULT_EXCHANGE_RATE;

#[tokio::test]
async fn session_survives_a_mirror_clear_and_vice_versa() {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("products.json");
    let session_path = dir.path().join("session");

    let gate = SessionGate::new(
        FileFlagStore::new(&session_path),
        "user",
        SecretString::from("password"),
    );
    let client = CatalogClient::new(
        JsonFileStore::new(&mirror_path),
        ScriptedSource::new(fixture()),
        RATE,
    );

    assert!(gate.login("user", "password").await.unwrap());
    client.get_collection().await.unwrap();

    // Clearing the mirror leaves the session open
    client.clear().await.unwrap();
    assert!(gate.is_logged_in().await);
    assert!(!mirror_path.exists());

    // Logging out leaves the (re-seeded) mirror intact
    client.get_collection().await.unwrap();
    gate.logout().await.unwrap();
    assert!(!gate.is_logged_in().await);
    assert!(mirror_path.exists());
}

#[tokio::test]
async fn session_persists_across_gate_instances() {
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session");

    {
        let gate = SessionGate::new(
            FileFlagStore::new(&session_path),
            "user",
            SecretString::from("password"),
        );
        assert!(gate.login("user", "password").await.unwrap());
    }

    let gate = SessionGate::new(
        FileFlagStore::new(&session_path),
        "user",
        SecretString::from("password"),
    );
    assert!(gate.is_logged_in().await, "flag was persisted to its slot");
}
