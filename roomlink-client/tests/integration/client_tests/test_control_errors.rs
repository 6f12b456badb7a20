use axum::http::StatusCode;
use roomlink_client::{ControlChannel, HttpControlChannel, OpenOptions, RoomError, TransportConfig};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::MockRoomService;

async fn open_against(service: MockRoomService) -> RoomError {
    let control = HttpControlChannel::new(TransportConfig::new(service.spawn().await))
        .expect("Failed to build control channel");

    match control.open(&OpenOptions::default()).await {
        Ok(session) => panic!("Open should fail, got {session:?}"),
        Err(e) => e,
    }
}

#[tokio::test]
async fn test_failure_status_is_reported_with_endpoint() {
    init_tracing();

    let service = MockRoomService::answering_open(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "boom" }),
    );
    let err = open_against(service).await;

    assert!(err.is_transport());
    match err {
        RoomError::Status { status, endpoint } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(endpoint, "room/open");
        }
        other => panic!("Expected Status, got {other}"),
    }
}

#[tokio::test]
async fn test_body_without_session_is_a_protocol_error() {
    init_tracing();

    let service = MockRoomService::answering_open(StatusCode::OK, json!({}));
    let err = open_against(service).await;

    assert!(!err.is_transport());
    assert!(
        matches!(err, RoomError::Protocol(_)),
        "Expected Protocol, got {err}"
    );
}

#[tokio::test]
async fn test_empty_room_id_is_a_protocol_error() {
    init_tracing();

    let service = MockRoomService::answering_open(
        StatusCode::OK,
        json!({ "room_id": "", "session_id": "s" }),
    );
    let err = open_against(service).await;

    match err {
        RoomError::Protocol(message) => assert!(message.contains("room_id"), "{message}"),
        other => panic!("Expected Protocol, got {other}"),
    }
}
