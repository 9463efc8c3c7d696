// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket delivery to a `vq-remote` server.
//!
//! One connection per delivery: connect, send the batch, wait for the
//! acknowledgment, close. Flushes are rare enough that holding a socket
//! open between them buys nothing.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use vq_core::protocol::{ClientMessage, ServerMessage};
use vq_core::QueueRecord;

use super::{AdapterResult, Delivery, DeliveryFuture, SyncAdapter, SyncTransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Adapter delivering batches over a WebSocket.
#[derive(Debug, Clone)]
pub struct WebSocketAdapter {
    url: String,
}

impl WebSocketAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        WebSocketAdapter { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Wait for the server's answer to a submitted batch of `expected` votes.
async fn await_ack(ws: &mut WsStream, expected: usize) -> AdapterResult<Delivery> {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => {
                let msg = ServerMessage::from_json(&text)
                    .map_err(|e| SyncTransportError::Protocol(e.to_string()))?;
                match msg {
                    ServerMessage::BatchAccepted {
                        accepted,
                        duplicates,
                    } => {
                        let delivery = Delivery {
                            accepted,
                            duplicates,
                        };
                        // All-or-nothing: a partial acknowledgment fails the batch
                        if delivery.total() != expected {
                            return Err(SyncTransportError::Protocol(format!(
                                "server acknowledged {} of {} votes",
                                delivery.total(),
                                expected
                            )));
                        }
                        return Ok(delivery);
                    }
                    ServerMessage::Error { message } => {
                        return Err(SyncTransportError::Rejected(message));
                    }
                    ServerMessage::Pong { .. } => continue,
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(SyncTransportError::ConnectionFailed(
                    "connection closed before acknowledgment".to_string(),
                ));
            }
            Some(Ok(_)) => {
                // Ignore ping/pong and binary frames
                continue;
            }
            Some(Err(e)) => {
                return Err(SyncTransportError::ConnectionFailed(e.to_string()));
            }
        }
    }
}

impl SyncAdapter for WebSocketAdapter {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        Box::pin(async move {
            let (mut ws, _) = tokio_tungstenite::connect_async(self.url.as_str())
                .await
                .map_err(|e| SyncTransportError::ConnectionFailed(e.to_string()))?;

            let json = ClientMessage::submit_batch(batch.to_vec())
                .to_json()
                .map_err(|e| SyncTransportError::Protocol(e.to_string()))?;

            ws.send(Message::Text(json.into()))
                .await
                .map_err(|e| SyncTransportError::ConnectionFailed(e.to_string()))?;

            let result = await_ack(&mut ws, batch.len()).await;

            if let Err(e) = ws.close(None).await {
                tracing::debug!("closing connection to {} failed: {}", self.url, e);
            }
            result
        })
    }

    fn name(&self) -> &'static str {
        "websocket"
    }
}
