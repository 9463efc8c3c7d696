// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::test_helpers::make_record;
use super::*;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use vq_core::protocol::{ClientMessage, ServerMessage};

/// Serve one connection: read one batch, answer with `respond(batch_len)`.
async fn serve_once<F>(respond: F) -> String
where
    F: FnOnce(usize) -> Vec<ServerMessage> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let mut batch_len = None;
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Text(text) = msg {
                if let ClientMessage::SubmitBatch { votes } = ClientMessage::from_json(&text).unwrap()
                {
                    batch_len = Some(votes.len());
                    break;
                }
            }
        }
        let Some(batch_len) = batch_len else { return };

        let replies = respond(batch_len);
        if replies.is_empty() {
            let _ = ws.close(None).await;
        }
        for reply in replies {
            ws.send(Message::Text(reply.to_json().unwrap().into()))
                .await
                .unwrap();
        }
        // Drain until the client closes
        while let Some(Ok(_)) = ws.next().await {}
    });

    format!("ws://{}", addr)
}

#[tokio::test]
async fn acknowledged_batch_is_delivered() {
    let url = serve_once(|n| vec![ServerMessage::batch_accepted(n, 0)]).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0), make_record("B", 1)];
    let delivery = adapter.deliver(&batch).await.unwrap();
    assert_eq!(delivery, Delivery::accepted(2));
}

#[tokio::test]
async fn duplicates_count_toward_acknowledgment() {
    let url = serve_once(|n| vec![ServerMessage::batch_accepted(n - 1, 1)]).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0), make_record("B", 1)];
    let delivery = adapter.deliver(&batch).await.unwrap();
    assert_eq!(delivery.accepted, 1);
    assert_eq!(delivery.duplicates, 1);
}

#[tokio::test]
async fn pong_before_ack_is_skipped() {
    let url = serve_once(|n| vec![ServerMessage::pong(1), ServerMessage::batch_accepted(n, 0)]).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0)];
    assert!(adapter.deliver(&batch).await.is_ok());
}

#[tokio::test]
async fn partial_ack_fails_the_batch() {
    let url = serve_once(|n| vec![ServerMessage::batch_accepted(n - 1, 0)]).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0), make_record("B", 1)];
    let err = adapter.deliver(&batch).await.unwrap_err();
    assert!(matches!(err, SyncTransportError::Protocol(_)), "{err:?}");
}

#[tokio::test]
async fn server_error_is_rejection() {
    let url = serve_once(|_| vec![ServerMessage::error("election closed")]).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0)];
    let err = adapter.deliver(&batch).await.unwrap_err();
    assert_eq!(err, SyncTransportError::Rejected("election closed".to_string()));
}

#[tokio::test]
async fn close_without_ack_is_connection_failure() {
    let url = serve_once(|_| Vec::new()).await;
    let adapter = WebSocketAdapter::new(url);

    let batch = vec![make_record("A", 0)];
    let err = adapter.deliver(&batch).await.unwrap_err();
    assert!(matches!(err, SyncTransportError::ConnectionFailed(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_server_is_connection_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let adapter = WebSocketAdapter::new(format!("ws://{}", addr));
    let batch = vec![make_record("A", 0)];
    let err = adapter.deliver(&batch).await.unwrap_err();
    assert!(matches!(err, SyncTransportError::ConnectionFailed(_)), "{err:?}");
    assert_eq!(adapter.name(), "websocket");
}
