// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages between the queue and the remote authority.
//!
//! The protocol is request/response:
//! - Client submits a batch of pending votes
//! - Server acknowledges the whole batch or reports an error

use serde::{Deserialize, Serialize};

use crate::record::QueueRecord;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Deliver a batch of pending votes.
    ///
    /// The server stores each vote at most once, keyed by receipt code.
    SubmitBatch {
        /// Votes to deliver, in queue order.
        votes: Vec<QueueRecord>,
    },

    /// Ping message for keepalive and reachability checks.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Response to a SubmitBatch request.
    ///
    /// `accepted + duplicates` covers every vote in the batch.
    BatchAccepted {
        /// Votes stored for the first time.
        accepted: usize,
        /// Votes the server already held (redelivery after a lost ack).
        duplicates: usize,
    },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates a SubmitBatch message.
    pub fn submit_batch(votes: Vec<QueueRecord>) -> Self {
        ClientMessage::SubmitBatch { votes }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates a BatchAccepted message.
    pub fn batch_accepted(accepted: usize, duplicates: usize) -> Self {
        ServerMessage::BatchAccepted {
            accepted,
            duplicates,
        }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
