use std::sync::Arc;
use std::time::Duration;

use roomlink_client::{OpenOptions, RoomCommandPlugin};
use serde_json::json;

use crate::integration::{command_frame, create_test_connector, init_tracing};
use crate::utils::{OWNER_SESSION, RecordingCommandPlugin, ScriptedTransport};

#[tokio::test]
async fn test_leave_cancels_in_flight_plugins() {
    init_tracing();

    let slow = RecordingCommandPlugin::delayed(200);
    let commands: Vec<Arc<dyn RoomCommandPlugin>> = vec![Arc::new(slow.clone())];

    let transport = ScriptedTransport::opening();
    let (connector, control) = create_test_connector(&transport);
    let client = connector
        .open(OpenOptions::default(), vec![], commands)
        .await
        .expect("Failed to open room");

    transport.push_frame(command_frame("slow", json!(1))).await;

    // The plugin is now sleeping inside execute
    tokio::time::sleep(Duration::from_millis(50)).await;
    client.leave().await.expect("Failed to leave");
    assert!(control.has_left(OWNER_SESSION).await);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(
        slow.commands().await.is_empty(),
        "Command plugin kept running after leave"
    );
}

#[tokio::test]
async fn test_drop_cancels_in_flight_plugins() {
    init_tracing();

    let slow = RecordingCommandPlugin::delayed(200);
    let commands: Vec<Arc<dyn RoomCommandPlugin>> = vec![Arc::new(slow.clone())];

    let transport = ScriptedTransport::opening();
    let (connector, _control) = create_test_connector(&transport);
    let client = connector
        .open(OpenOptions::default(), vec![], commands)
        .await
        .expect("Failed to open room");

    transport.push_frame(command_frame("slow", json!(1))).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(client);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(slow.commands().await.is_empty());
}
