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

#![forbid(unsafe_code)]
//! Courier Core Library
//!
//! This library provides the core functionality for the Courier actor
//! framework: per-actor mailboxes and event loops, request/response call
//! coordination, broadcast graphs, and bus dispatch.

/// Common utilities and structures used throughout the Courier framework.
pub(crate) mod common;

pub(crate) mod actor;
pub(crate) mod message;
/// Trait definitions used in the Courier framework.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports commonly used items from the `actor`, `common`,
/// `message`, and `traits` modules, as well as the `async_trait` crate.
pub mod prelude {
    pub use async_trait;

    pub use crate::actor::{
        BusBuilder, BusHandle, BusMessage, BusSubscriber, Idle, ManagedActor, Started,
    };
    pub use crate::common::{
        ActorHandle, ActorId, ActorRuntime, CallId, CourierApp, CourierConfig, HandlerFuture,
        HandlerResult, Reply, CONFIG,
    };
    pub use crate::message::{
        CallError, Envelope, HandlerError, MessageContext, Response, ReturnAddress, SystemSignal,
    };
    pub use crate::traits::{
        downcast_message, ActorMessage, Transport, TransportError, WireCodec,
    };
}
