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

//! Defines common internal type aliases and supporting structures used within
//! `courier-core`.
//!
//! This module centralizes type definitions for futures, handlers, and
//! channels to improve code readability and maintainability. The handler
//! aliases are public: user code writes message handlers in terms of
//! [`HandlerFuture`] and [`HandlerResult`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::actor::{ManagedActor, Started};
use crate::common::{ActorHandle, ActorId};
use crate::message::{Envelope, HandlerError, MessageContext};
use crate::traits::ActorMessage;

/// The outcome of one handler invocation: an optional reply value, or a
/// contained failure.
pub type HandlerResult = Result<Option<Box<dyn ActorMessage>>, HandlerError>;

/// The pinned, boxed future every message handler returns.
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send + 'static>>;

/// Crate-internal: the dispatch function of one actor.
pub(crate) type MessageHandler<State> = Box<
    dyn for<'a> Fn(&'a mut ManagedActor<Started, State>, &'a MessageContext) -> HandlerFuture
        + Send
        + Sync
        + 'static,
>;

/// Crate-internal: a pinned, boxed future with no output, used by lifecycle hooks.
pub(crate) type HookFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Crate-internal: the function signature of an asynchronous lifecycle hook.
pub(crate) type AsyncLifecycleHandler<State> =
    Box<dyn Fn(&ManagedActor<Started, State>) -> HookFuture + Send + Sync + 'static>;

/// Crate-internal: the sender part of an actor's mailbox channel.
pub(crate) type MailboxSender = mpsc::UnboundedSender<Envelope>;

/// Crate-internal: the receiver part of an actor's mailbox channel.
pub(crate) type MailboxReceiver = mpsc::UnboundedReceiver<Envelope>;

/// Crate-internal: the subscriber edges of one actor, keyed by subscriber id.
pub(crate) type SubscriberSet = Arc<DashMap<ActorId, ActorHandle>>;
