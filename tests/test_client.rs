//! Drives the library client against a live in-memory server.

mod common;

use inventory_tracker::client::{ClientError, InventoryClient};
use inventory_tracker::ItemDraft;
use reqwest::StatusCode;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_round_trip_through_item_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let base = common::spawn_server().await;
    // Scheme is added by the client.
    let client = InventoryClient::new(base.trim_start_matches("http://"));

    client.health().await?;

    let created = client.create(&ItemDraft::new("Ladder", 11, "Rig")).await?;
    assert_eq!(created.last_seen, None);

    let logged = client.log(11).await?;
    assert!(logged.last_seen.is_some());

    let modified = client.modify(&ItemDraft::new("Step ladder", 11, "Store")).await?;
    assert_eq!(modified.name, "Step ladder");
    assert_eq!(modified.last_seen, logged.last_seen);

    assert_eq!(client.get(11).await?, modified);
    assert_eq!(client.all().await?, vec![modified.clone()]);

    assert_eq!(client.delete(11).await?, modified);
    let err = client.get(11).await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_surfaces_server_error_messages() -> Result<(), Box<dyn std::error::Error>> {
    let base = common::spawn_server().await;
    let client = InventoryClient::new(&base);

    client.create(&ItemDraft::new("a", 1, "b")).await?;
    match client.create(&ItemDraft::new("a", 1, "b")).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(message, "Item with barcode 1 already exists");
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Port 9 (discard) is not served in the test environment.
    let client = InventoryClient::new("127.0.0.1:9");
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
