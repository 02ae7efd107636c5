/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Collaborator interface for transport adapters.
//!
//! The actor core is in-process only. A transport adapter that carries
//! messages between processes is expected to behave like a local actor:
//! it accepts `put`/`call` through a regular [`ActorHandle`], translates
//! outbound payloads to wire frames, and injects inbound frames back into
//! the local system with [`ActorHandle::put`]. These traits pin down that
//! boundary; the core ships no implementations.
//!
//! [`ActorHandle`]: crate::common::ActorHandle
//! [`ActorHandle::put`]: crate::common::ActorHandle::put

use async_trait::async_trait;

use crate::traits::ActorMessage;

/// Errors reported by a transport adapter.
#[derive(Debug)]
pub enum TransportError {
    /// The adapter could not reach the remote endpoint.
    ConnectFailed(String),
    /// The connection is closed.
    Closed,
    /// An I/O fault occurred while sending or receiving.
    Io(String),
    /// A frame could not be encoded or decoded.
    Codec(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TransportError::ConnectFailed(msg) => write!(f, "Failed to connect: {}", msg),
            TransportError::Closed => write!(f, "Connection closed"),
            TransportError::Io(msg) => write!(f, "I/O error: {}", msg),
            TransportError::Codec(msg) => write!(f, "Codec error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// A bidirectional byte-stream endpoint carrying actor messages.
///
/// Implementations wrap a concrete medium (TCP, UDP, WebSocket) and pair
/// with a [`WireCodec`] to move between payloads and frames. Inbound frames
/// must be decoded and delivered as ordinary local messages, preserving
/// per-connection FIFO order.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Opens the endpoint toward the given remote host and port.
    async fn open(&mut self, host: &str, port: u16) -> Result<(), TransportError>;

    /// Closes the endpoint. Further sends return [`TransportError::Closed`].
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Sends one encoded frame.
    async fn send(&mut self, frame: Vec<u8>) -> Result<(), TransportError>;
}

/// Encodes and decodes one message type for the wire.
///
/// The serialization format is the adapter's choice; the core only requires
/// that `decode(encode(m))` round-trips.
pub trait WireCodec: Send + Sync {
    /// The concrete message type this codec understands.
    type Message: ActorMessage;

    /// Encodes a message into a wire frame.
    fn encode(&self, message: &Self::Message) -> Result<Vec<u8>, TransportError>;

    /// Decodes a wire frame back into a message.
    fn decode(&self, frame: &[u8]) -> Result<Self::Message, TransportError>;
}
