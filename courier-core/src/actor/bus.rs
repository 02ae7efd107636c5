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

//! Bus dispatch: one actor demultiplexing to named handlers.
//!
//! A bus is not a subclass of anything. It composes a plain actor whose
//! single dispatch closure owns an immutable routing table. Every selector
//! shares the bus's one mailbox and event loop, so two bus handlers never run
//! concurrently, exactly like any other actor.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use tracing::{trace, warn};

use crate::actor::{Idle, ManagedActor};
use crate::common::types::HandlerFuture;
use crate::common::{ActorHandle, Reply};
use crate::message::{CallError, HandlerError, Response, ReturnAddress};
use crate::traits::ActorMessage;

/// The inbound unit of a bus: which handler, and what payload.
#[derive(Clone, Debug)]
pub struct BusMessage {
    pub(crate) selector: Arc<str>,
    pub(crate) inner: Arc<dyn ActorMessage>,
}

impl BusMessage {
    /// The name of the handler this message is addressed to.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The wrapped payload.
    pub fn inner(&self) -> &Arc<dyn ActorMessage> {
        &self.inner
    }
}

/// The state type of the actor backing a bus.
#[derive(Default, Debug)]
pub struct BusState;

type RouteFn = Arc<dyn Fn(Arc<dyn ActorMessage>) -> HandlerFuture + Send + Sync>;
type InvalidFn =
    Arc<dyn Fn(Option<Arc<str>>, Arc<dyn ActorMessage>) -> HandlerFuture + Send + Sync>;

/// Builds a bus by registering named handlers, then starts it.
///
/// The routing table is populated here and frozen when the bus starts; there
/// is no registration after construction and no discovery by introspection.
pub struct BusBuilder {
    actor: ManagedActor<Idle, BusState>,
    routes: HashMap<Arc<str>, RouteFn>,
    on_invalid: InvalidFn,
}

impl BusBuilder {
    pub(crate) fn new(actor: ManagedActor<Idle, BusState>) -> Self {
        Self {
            actor,
            routes: HashMap::new(),
            on_invalid: Arc::new(|selector, payload| {
                let name = selector
                    .as_deref()
                    .unwrap_or("<not a bus message>")
                    .to_string();
                warn!(selector = %name, payload = ?payload, "no handler registered");
                Reply::fail(HandlerError::UnknownSelector(name))
            }),
        }
    }

    /// Registers the handler for `selector`.
    ///
    /// Registering the same selector twice replaces the earlier handler.
    pub fn route<F>(mut self, selector: &str, handler: F) -> Self
    where
        F: Fn(Arc<dyn ActorMessage>) -> HandlerFuture + Send + Sync + 'static,
    {
        let selector: Arc<str> = Arc::from(selector);
        if self.routes.insert(selector.clone(), Arc::new(handler)).is_some() {
            warn!(selector = %selector, "selector registered twice; keeping the later handler");
        }
        self
    }

    /// Replaces the fallback invoked for unregistered selectors.
    ///
    /// The fallback receives the selector (when the inbound message was a bus
    /// message at all) and the payload. The default fallback logs the routing
    /// failure and answers calls with an `UnknownSelector` error; it never
    /// fails the bus itself.
    pub fn on_invalid_call<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<Arc<str>>, Arc<dyn ActorMessage>) -> HandlerFuture + Send + Sync + 'static,
    {
        self.on_invalid = Arc::new(handler);
        self
    }

    /// Freezes the routing table and starts the bus actor.
    pub async fn start(self) -> BusHandle {
        let BusBuilder {
            mut actor,
            routes,
            on_invalid,
        } = self;

        let routes = Arc::new(routes);
        actor.on_message(move |_actor, context| {
            match context.downcast_ref::<BusMessage>() {
                Some(message) => match routes.get(&message.selector) {
                    Some(route) => {
                        trace!(selector = %message.selector, "routing bus message");
                        route(message.inner.clone())
                    }
                    None => on_invalid(Some(message.selector.clone()), message.inner.clone()),
                },
                // Anything that reaches a bus without selector framing is
                // unroutable by definition.
                None => on_invalid(None, context.shared_payload()),
            }
        });

        BusHandle {
            handle: actor.start().await,
        }
    }
}

/// A shareable reference to a running bus.
///
/// Dereferences to the underlying [`ActorHandle`], so a bus can be stopped,
/// subscribed, or broadcast to like any other actor.
#[derive(Clone, Debug)]
pub struct BusHandle {
    handle: ActorHandle,
}

impl Deref for BusHandle {
    type Target = ActorHandle;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl BusHandle {
    /// Returns a handle scoped to one selector.
    ///
    /// The selector is not validated here; sends through a handle for an
    /// unregistered selector reach the bus's `on_invalid_call` fallback.
    pub fn subscriber(&self, selector: &str) -> BusSubscriber {
        BusSubscriber {
            bus: self.handle.clone(),
            selector: Arc::from(selector),
        }
    }
}

/// A put/call surface scoped to one named handler of a bus.
///
/// All operations enqueue into the bus's single mailbox; a subscriber adds
/// routing, not concurrency.
#[derive(Clone, Debug)]
pub struct BusSubscriber {
    bus: ActorHandle,
    selector: Arc<str>,
}

impl BusSubscriber {
    /// The selector this handle is scoped to.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Sends a fire-and-forget message to this selector's handler.
    pub fn put(&self, message: impl ActorMessage) {
        self.bus.put(BusMessage {
            selector: self.selector.clone(),
            inner: Arc::new(message),
        });
    }

    /// Issues a request to this selector's handler, from a non-actor caller.
    pub async fn call(
        &self,
        message: impl ActorMessage,
        timeout: Option<Duration>,
    ) -> Result<Response, CallError> {
        let payload: Arc<dyn ActorMessage> = Arc::new(BusMessage {
            selector: self.selector.clone(),
            inner: Arc::new(message),
        });
        self.bus
            .call_with_return(ReturnAddress::external(), payload, timeout)
            .await
    }

    /// Issues a request to this selector's handler on behalf of `caller`.
    pub async fn call_from(
        &self,
        caller: &ActorHandle,
        message: impl ActorMessage,
        timeout: Option<Duration>,
    ) -> Result<Response, CallError> {
        let payload: Arc<dyn ActorMessage> = Arc::new(BusMessage {
            selector: self.selector.clone(),
            inner: Arc::new(message),
        });
        self.bus
            .call_with_return(caller.return_address(), payload, timeout)
            .await
    }
}
