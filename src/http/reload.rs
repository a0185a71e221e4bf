//! Development live-reload socket.
//!
//! Pages open a WebSocket to `/reload` and reload themselves once it closes
//! and a reconnect succeeds. The server only needs to keep the socket open
//! and close it cleanly when the process is shutting down.

use std::future::Future;

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};

use crate::http::server::AppState;

pub async fn reload_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let stopping = state.shutdown.signalled();
    ws.on_upgrade(move |socket| hold_open(socket, stopping))
}

async fn hold_open(mut socket: WebSocket, stopping: impl Future<Output = ()>) {
    tracing::debug!("Reload socket connected");
    tokio::pin!(stopping);

    loop {
        tokio::select! {
            _ = &mut stopping => {
                let frame = CloseFrame {
                    code: close_code::AWAY,
                    reason: Utf8Bytes::from_static("server restarting"),
                };
                if let Err(e) = socket.send(Message::Close(Some(frame))).await {
                    tracing::debug!(error = %e, "Reload socket close failed");
                }
                break;
            }
            message = socket.recv() => match message {
                // Pings are answered by the protocol layer; content is ignored.
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "Reload socket error");
                    break;
                }
            },
        }
    }

    tracing::debug!("Reload socket closed");
}
