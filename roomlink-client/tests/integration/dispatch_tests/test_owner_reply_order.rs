use std::sync::Arc;

use roomlink_client::{OpenOptions, Reply, RoomOwnerPlugin};
use roomlink_core::RoomCommand;
use serde_json::{Value, json};

use crate::integration::{create_test_connector, init_tracing, request_frame};
use crate::utils::{DelayedOwnerPlugin, ScriptedTransport};

#[tokio::test]
async fn test_replies_follow_registration_order() {
    init_tracing();

    let first = RoomCommand::broadcast("first", json!(1));
    let second = RoomCommand::broadcast("second", json!(2));
    let third = RoomCommand::targeted(["bob"], "third", json!(3));
    let fourth = RoomCommand::broadcast("fourth", json!(4));

    // Later registrations finish first
    let owners: Vec<Arc<dyn RoomOwnerPlugin>> = vec![
        Arc::new(DelayedOwnerPlugin::new(90, first.clone())),
        Arc::new(DelayedOwnerPlugin::new(60, Reply::Silent)),
        Arc::new(DelayedOwnerPlugin::new(30, vec![second.clone(), third.clone()])),
        Arc::new(DelayedOwnerPlugin::new(0, fourth.clone())),
    ];

    let transport = ScriptedTransport::opening();
    let (connector, control) = create_test_connector(&transport);
    let client = connector
        .open(OpenOptions::default(), owners, vec![])
        .await
        .expect("Failed to open room");

    transport
        .push_frame(request_frame("bob", "go", Value::Null))
        .await;

    let relayed = control.wait_for_relays(1, 5000).await;
    assert!(relayed, "Expected one relayed batch");

    let batches = control.relayed().await;
    assert_eq!(batches.len(), 1, "One request produces one batch");
    assert_eq!(batches[0], vec![first, second, third, fourth]);

    client.leave().await.expect("Failed to leave");
}

#[tokio::test]
async fn test_silent_owners_relay_nothing() {
    init_tracing();

    let owners: Vec<Arc<dyn RoomOwnerPlugin>> = vec![
        Arc::new(DelayedOwnerPlugin::new(0, Reply::Silent)),
        Arc::new(DelayedOwnerPlugin::new(10, None::<RoomCommand>)),
    ];

    let transport = ScriptedTransport::opening();
    let (connector, control) = create_test_connector(&transport);
    let client = connector
        .open(OpenOptions::default(), owners, vec![])
        .await
        .expect("Failed to open room");

    transport
        .push_frame(request_frame("bob", "noop", Value::Null))
        .await;

    let relayed = control.wait_for_relays(1, 300).await;
    assert!(!relayed, "Silent owners must not trigger a relay");

    client.leave().await.expect("Failed to leave");
}

#[tokio::test]
async fn test_string_encoded_request_payload_is_accepted() {
    init_tracing();

    let reply = RoomCommand::broadcast("ack", Value::Null);
    let owners: Vec<Arc<dyn RoomOwnerPlugin>> =
        vec![Arc::new(DelayedOwnerPlugin::new(0, reply.clone()))];

    let transport = ScriptedTransport::opening();
    let (connector, control) = create_test_connector(&transport);
    let client = connector
        .open(OpenOptions::default(), owners, vec![])
        .await
        .expect("Failed to open room");

    let payload = json!({ "from": "bob", "data": { "name": "ping", "data": null } }).to_string();
    let frame = json!({ "type": "request", "data": payload }).to_string();
    transport.push_frame(frame).await;

    assert!(control.wait_for_relays(1, 5000).await);
    assert_eq!(control.relayed().await, vec![vec![reply]]);

    client.leave().await.expect("Failed to leave");
}
