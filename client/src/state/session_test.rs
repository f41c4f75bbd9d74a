use super::*;

#[test]
fn default_session_is_disconnected() {
    let session = SessionState::default();
    assert_eq!(session.connection_status, ConnectionStatus::Disconnected);
}

#[test]
fn status_labels() {
    assert_eq!(ConnectionStatus::Disconnected.label(), "offline");
    assert_eq!(ConnectionStatus::Connecting.label(), "connecting");
    assert_eq!(ConnectionStatus::Connected.label(), "connected");
}

#[test]
fn status_variants_distinct() {
    assert_ne!(ConnectionStatus::Disconnected, ConnectionStatus::Connected);
    assert_ne!(ConnectionStatus::Connecting, ConnectionStatus::Connected);
}
