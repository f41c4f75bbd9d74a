//! Wire message contract with the remote authority.
//!
//! Every message is a JSON object of the form `{"event": <name>, "data":
//! <payload>}`. Token coordinates on the wire are grid units: floats while
//! a drag is live, whole numbers once settled at pointer-up. Camera state
//! never crosses the wire. The transport itself is an external
//! collaborator; this module only owns the shapes and the codec.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use serde::{Deserialize, Serialize};

use crate::scene::{MapBackground, Token};

/// Error returned by the message codec.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The text could not be decoded as a known message, or a message
    /// could not be serialized.
    #[error("message codec failure: {0}")]
    Json(#[from] serde_json::Error),
}

/// Messages received from the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Full authoritative snapshot delivered on (re)connect. Replaces the
    /// local token collection and map background wholesale. Missing fields
    /// degrade to an empty scene rather than failing the view.
    InitState {
        #[serde(default)]
        tokens: Vec<Token>,
        #[serde(default, rename = "mapBackground")]
        map_background: MapBackground,
    },
    /// Another client moved a token.
    TokenMoved { id: String, x: f64, y: f64 },
    /// Another client replaced the map background.
    MapChanged {
        url: Option<String>,
        width: u32,
        height: u32,
    },
}

/// Messages sent to the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// A locally originated token position change.
    MoveToken { id: String, x: f64, y: f64 },
    /// A locally originated map background change.
    ChangeMap {
        url: Option<String>,
        width: u32,
        height: u32,
    },
}

/// Decode an inbound text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] for malformed JSON or unknown events.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode an outbound message as a text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if serialization fails.
pub fn encode_client_message(message: &ClientMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}
