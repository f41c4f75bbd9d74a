//! WebSocket transport adapter for the tabletop protocol.
//!
//! This is the external collaborator the engine core talks through: a
//! narrow `send`/`on message` surface over a `gloo-net` WebSocket. Inbound
//! frames are decoded with [`tabletop::protocol`] and dispatched into the
//! engine through its `emit = false` entry points, so nothing received
//! here is ever re-broadcast. Outbound messages are serialized once each.
//!
//! Connection lifecycle (reconnect with backoff, status signal updates)
//! lives entirely in this module; the engine core contains no transport
//! logic. All of it is gated behind `csr` since it requires a browser.

#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use leptos::prelude::{RwSignal, Update};

#[cfg(feature = "csr")]
use tabletop::engine::Engine;
#[cfg(feature = "csr")]
use tabletop::protocol::{ClientMessage, ServerMessage, decode_server_message, encode_client_message};
#[cfg(feature = "csr")]
use tabletop::scene::MapBackground;

#[cfg(feature = "csr")]
use crate::state::session::{ConnectionStatus, SessionState};

/// Shared handle to the engine, owned by the viewport component.
#[cfg(feature = "csr")]
pub type EngineHandle = Rc<RefCell<Option<Engine>>>;

/// Outbound frame channel handed to the viewport component.
#[cfg(feature = "csr")]
pub type FrameSender = futures::channel::mpsc::UnboundedSender<String>;

/// Serialize and queue outbound messages for the socket task.
///
/// Each message is sent at most once; a closed channel or an encode
/// failure drops the message with a warning (delivery is the transport's
/// problem, not the engine's).
#[cfg(feature = "csr")]
pub fn send_outbound(tx: &FrameSender, messages: Vec<ClientMessage>) {
    for message in messages {
        match encode_client_message(&message) {
            Ok(text) => {
                if tx.unbounded_send(text).is_err() {
                    leptos::logging::warn!("transport closed; dropping outbound message");
                }
            }
            Err(e) => {
                leptos::logging::warn!("failed to encode outbound message: {e}");
            }
        }
    }
}

/// Spawn the WebSocket lifecycle as a local async task.
///
/// Connects to the server, applies incoming messages to the engine, and
/// reconnects on disconnect with exponential backoff.
#[cfg(feature = "csr")]
pub fn spawn_socket_client(engine: EngineHandle, session: RwSignal<SessionState>) -> FrameSender {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    leptos::task::spawn_local(socket_loop(engine, session, rx));
    tx
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "csr")]
async fn socket_loop(
    engine: EngineHandle,
    session: RwSignal<SessionState>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    let rx = Rc::new(RefCell::new(rx));
    let mut backoff_ms: u32 = 1000;
    let max_backoff_ms: u32 = 10_000;

    loop {
        session.update(|s| s.connection_status = ConnectionStatus::Connecting);

        match connect_and_run(&ws_url(), &engine, session, &rx).await {
            Ok(()) => {
                leptos::logging::log!("WS disconnected cleanly");
                backoff_ms = 1000;
            }
            Err(e) => {
                leptos::logging::warn!("WS error: {e}");
            }
        }

        session.update(|s| s.connection_status = ConnectionStatus::Disconnected);

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(max_backoff_ms);
    }
}

/// Determine the WebSocket URL from the page location.
#[cfg(feature = "csr")]
fn ws_url() -> String {
    let href = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let ws_proto = if href.starts_with("https") { "wss" } else { "ws" };
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    format!("{ws_proto}://{host}/ws")
}

/// Connect to the WebSocket and process messages until disconnect.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    engine: &EngineHandle,
    session: RwSignal<SessionState>,
    rx: &Rc<RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    session.update(|s| s.connection_status = ConnectionStatus::Connected);

    // Forward outgoing frames from the channel to the socket.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(text) = rx_borrow.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: decode and dispatch incoming frames.
    let recv_task = async {
        while let Some(message) = ws_read.next().await {
            match message {
                Ok(Message::Text(text)) => match decode_server_message(&text) {
                    Ok(decoded) => dispatch_message(decoded, engine),
                    Err(e) => {
                        leptos::logging::warn!("undecodable frame: {e}");
                    }
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("WS recv error: {e}");
                    break;
                }
            }
        }
    };

    // Run both tasks; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// Apply an inbound message to the engine through its no-echo entry points.
#[cfg(feature = "csr")]
fn dispatch_message(message: ServerMessage, engine: &EngineHandle) {
    let mut engine_ref = engine.borrow_mut();
    let Some(engine) = engine_ref.as_mut() else {
        return;
    };
    match message {
        ServerMessage::InitState { tokens, map_background } => {
            engine.apply_init_state(tokens, map_background);
        }
        ServerMessage::TokenMoved { id, x, y } => {
            engine.apply_remote_move(&id, x, y);
        }
        ServerMessage::MapChanged { url, width, height } => {
            engine.apply_remote_map(MapBackground { url, width, height });
        }
    }
}
