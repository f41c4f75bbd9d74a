//! Session-level state: the connection to the remote authority.
//!
//! The tabletop scene itself lives inside the engine, not in Leptos
//! signals; this state covers only what the surrounding chrome needs to
//! observe (connection status).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Session state shared through the Leptos context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub connection_status: ConnectionStatus,
}

/// WebSocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    /// Short label for the status readout.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "offline",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}
