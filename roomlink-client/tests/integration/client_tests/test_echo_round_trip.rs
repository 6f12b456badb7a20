use std::sync::Arc;
use std::time::Duration;

use roomlink_client::{
    OpenOptions, RoomClient, RoomCommandPlugin, RoomOwnerPlugin, TransportConfig,
};
use roomlink_core::{RequestCommand, UserId};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{EchoPlugin, MockRoomService, RecordingCommandPlugin};

#[tokio::test]
async fn test_echo_round_trip() {
    init_tracing();

    let service = MockRoomService::new();
    let config = TransportConfig::new(service.spawn().await)
        .with_request_timeout(Duration::from_secs(5))
        .with_handshake_timeout(Duration::from_secs(5));

    // Owner answers requests and also records the commands it receives
    let echo = EchoPlugin::new();
    let owners: Vec<Arc<dyn RoomOwnerPlugin>> = vec![Arc::new(echo.clone())];
    let owner_commands: Vec<Arc<dyn RoomCommandPlugin>> = vec![Arc::new(echo.clone())];
    let owner = RoomClient::open(
        config.clone(),
        OpenOptions::default().with_user_id("owner"),
        owners,
        owner_commands,
    )
    .await
    .expect("Failed to open room");
    assert!(service.wait_for_socket(owner.session_id(), true, 5000).await);

    let bob_commands = RecordingCommandPlugin::new();
    let bob_plugins: Vec<Arc<dyn RoomCommandPlugin>> = vec![Arc::new(bob_commands.clone())];
    let bob = RoomClient::join(
        config,
        owner.room_id(),
        Some(&UserId::from("bob")),
        bob_plugins,
    )
    .await
    .expect("Failed to join room");
    assert!(service.wait_for_socket(bob.session_id(), true, 5000).await);

    bob.request(RequestCommand::new("echo", json!("hello!")))
        .await
        .expect("Failed to send request");

    let received = bob_commands.wait_for_commands(1, 5000).await;
    assert!(received, "Bob should receive the echo");

    let commands = bob_commands.commands().await;
    assert_eq!(commands[0].name, "echo");
    assert_eq!(commands[0].data, json!("hello!"));
    assert_eq!(commands[0].to, Some(vec!["bob".to_owned()]));

    // The owner saw the request with the service-attributed sender
    let requests = echo.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].from, UserId::from("bob"));

    // The echo was addressed to bob only
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(echo.commands().await.is_empty());
    assert_eq!(service.relayed().await.len(), 1);

    let bob_session = bob.session_id().clone();
    let owner_session = owner.session_id().clone();
    bob.leave().await.expect("Failed to leave");
    owner.leave().await.expect("Failed to leave");

    assert!(service.has_left(&bob_session).await);
    assert!(service.has_left(&owner_session).await);
}

#[tokio::test]
async fn test_broadcast_reaches_every_session() {
    init_tracing();

    let service = MockRoomService::new();
    let config = TransportConfig::new(service.spawn().await);

    struct Broadcaster;

    #[async_trait::async_trait]
    impl RoomOwnerPlugin for Broadcaster {
        async fn on_request(
            &self,
            request: roomlink_core::UserRequest,
        ) -> anyhow::Result<roomlink_client::Reply> {
            Ok(roomlink_core::RoomCommand::broadcast(
                "announce",
                json!({ "by": request.from }),
            )
            .into())
        }
    }

    let owner_commands = RecordingCommandPlugin::new();
    let owners: Vec<Arc<dyn RoomOwnerPlugin>> = vec![Arc::new(Broadcaster)];
    let owner_plugins: Vec<Arc<dyn RoomCommandPlugin>> = vec![Arc::new(owner_commands.clone())];
    let owner = RoomClient::open(config.clone(), OpenOptions::default(), owners, owner_plugins)
        .await
        .expect("Failed to open room");
    assert!(service.wait_for_socket(owner.session_id(), true, 5000).await);

    let member_commands = RecordingCommandPlugin::new();
    let member_plugins: Vec<Arc<dyn RoomCommandPlugin>> =
        vec![Arc::new(member_commands.clone())];
    let member = RoomClient::join(
        config,
        owner.room_id(),
        Some(&UserId::from("carol")),
        member_plugins,
    )
    .await
    .expect("Failed to join room");
    assert!(service.wait_for_socket(member.session_id(), true, 5000).await);

    member
        .request(RequestCommand::new("shout", json!(null)))
        .await
        .expect("Failed to send request");

    assert!(member_commands.wait_for_commands(1, 5000).await);
    assert!(owner_commands.wait_for_commands(1, 5000).await);
    assert_eq!(
        member_commands.commands().await[0].data,
        json!({ "by": "carol" })
    );

    member.leave().await.expect("Failed to leave");
    owner.leave().await.expect("Failed to leave");
}
