use super::*;

use serde_json::json;

use crate::scene::HitPoints;

// =============================================================
// Inbound decoding
// =============================================================

#[test]
fn decodes_init_state() {
    let text = json!({
        "event": "init-state",
        "data": {
            "tokens": [
                {"id": "t1", "name": "Guerrier", "x": 2.0, "y": 2.0, "size": 1.0,
                 "color": "#ef4444", "hp": {"current": 10, "max": 15}}
            ],
            "mapBackground": {"url": "/maps/crypt.png", "width": 2100, "height": 1400}
        }
    })
    .to_string();

    let message = decode_server_message(&text).expect("decode");
    let ServerMessage::InitState { tokens, map_background } = message else {
        panic!("expected InitState");
    };
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, "t1");
    assert_eq!(tokens[0].hp, Some(HitPoints { current: 10, max: 15 }));
    assert_eq!(map_background.url.as_deref(), Some("/maps/crypt.png"));
    assert_eq!(map_background.width, 2100);
}

#[test]
fn init_state_with_empty_payload_degrades_to_empty_scene() {
    let text = json!({"event": "init-state", "data": {}}).to_string();
    let message = decode_server_message(&text).expect("decode");
    let ServerMessage::InitState { tokens, map_background } = message else {
        panic!("expected InitState");
    };
    assert!(tokens.is_empty());
    assert_eq!(map_background, MapBackground::default());
}

#[test]
fn decodes_token_moved() {
    let text = json!({"event": "token-moved", "data": {"id": "t1", "x": 2.6, "y": 2.4}}).to_string();
    let message = decode_server_message(&text).expect("decode");
    assert_eq!(
        message,
        ServerMessage::TokenMoved { id: "t1".to_owned(), x: 2.6, y: 2.4 }
    );
}

#[test]
fn decodes_map_changed_with_null_url() {
    let text = json!({"event": "map-changed", "data": {"url": null, "width": 0, "height": 0}}).to_string();
    let message = decode_server_message(&text).expect("decode");
    assert_eq!(
        message,
        ServerMessage::MapChanged { url: None, width: 0, height: 0 }
    );
}

#[test]
fn unknown_event_is_an_error() {
    let text = json!({"event": "token-exploded", "data": {}}).to_string();
    assert!(decode_server_message(&text).is_err());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(decode_server_message("{not json").is_err());
}

#[test]
fn malformed_payload_is_an_error() {
    let text = json!({"event": "token-moved", "data": {"id": "t1", "x": "far away"}}).to_string();
    assert!(decode_server_message(&text).is_err());
}

// =============================================================
// Outbound encoding
// =============================================================

#[test]
fn encodes_move_token_wire_shape() {
    let message = ClientMessage::MoveToken { id: "t1".to_owned(), x: 3.0, y: 2.0 };
    let text = encode_client_message(&message).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&text).expect("reparse");
    assert_eq!(
        value,
        json!({"event": "move-token", "data": {"id": "t1", "x": 3.0, "y": 2.0}})
    );
}

#[test]
fn encodes_change_map_wire_shape() {
    let message = ClientMessage::ChangeMap {
        url: Some("/maps/crypt.png".to_owned()),
        width: 2100,
        height: 1400,
    };
    let text = encode_client_message(&message).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&text).expect("reparse");
    assert_eq!(
        value,
        json!({"event": "change-map", "data": {"url": "/maps/crypt.png", "width": 2100, "height": 1400}})
    );
}

#[test]
fn client_messages_round_trip() {
    for message in [
        ClientMessage::MoveToken { id: "t9".to_owned(), x: 0.5, y: -1.0 },
        ClientMessage::ChangeMap { url: None, width: 0, height: 0 },
    ] {
        let text = encode_client_message(&message).expect("encode");
        let back: ClientMessage = serde_json::from_str(&text).expect("decode");
        assert_eq!(message, back);
    }
}
