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

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc::unbounded_channel;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::actor::{ManagedActor, Started};
use crate::common::types::{HandlerFuture, HookFuture};
use crate::common::{ActorHandle, ActorId, CallCoordinator, Reply};
use crate::message::MessageContext;

/// Type-state marker for an actor that is still being configured.
pub struct Idle;

impl<State: Default + Send + Debug + 'static> ManagedActor<Idle, State> {
    /// Sets the message handler for this actor.
    ///
    /// The handler receives exclusive access to the running actor (handle and
    /// model) plus the dispatch context, and returns a future producing the
    /// handler outcome. The returned value, if any, becomes the response when
    /// the inbound message was a call.
    pub fn on_message<F>(&mut self, handler: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut ManagedActor<Started, State>, &'a MessageContext) -> HandlerFuture
            + Send
            + Sync
            + 'static,
    {
        self.on_message = Some(Box::new(handler));
        self
    }

    /// Sets the hook to be called before the event loop starts.
    pub fn before_start<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, State>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.before_start = Box::new(move |actor| Box::pin(f(actor)) as HookFuture);
        self
    }

    /// Sets the hook to be called when the event loop starts.
    pub fn after_start<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, State>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.after_start = Box::new(move |actor| Box::pin(f(actor)) as HookFuture);
        self
    }

    /// Sets the hook to be called when the terminate signal arrives, before
    /// the remaining mailbox entries are drained.
    pub fn before_stop<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, State>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.before_stop = Box::new(move |actor| Box::pin(f(actor)) as HookFuture);
        self
    }

    /// Sets the hook to be called after the event loop has stopped.
    pub fn after_stop<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, State>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.after_stop = Box::new(move |actor| Box::pin(f(actor)) as HookFuture);
        self
    }

    pub(crate) fn new(name: &str) -> Self {
        let mut actor: ManagedActor<Idle, State> = ManagedActor::default();
        let id = ActorId::new(name);
        actor.id = id.clone();
        actor.handle.id = id;
        actor
    }

    /// Starts the actor, binding its event loop to a spawned task.
    ///
    /// Consumes the builder and returns the shareable handle. Messages sent
    /// through the handle from this point on are processed strictly one at a
    /// time, in arrival order.
    #[instrument(skip(self), fields(actor = %self.id))]
    pub async fn start(mut self) -> ActorHandle {
        // An actor without a handler quietly discards what it receives;
        // calls still resolve, with an empty response.
        let handler = self.on_message.take().unwrap_or_else(|| {
            Box::new(
                |_actor: &mut ManagedActor<Started, State>, context: &MessageContext| {
                    trace!(payload = ?context.message(), "no handler registered; message ignored");
                    Reply::ready()
                },
            )
        });

        let handle = self.handle.clone();
        let actor: ManagedActor<Started, State> = self.into();

        (actor.before_start)(&actor).await;
        handle.tracker.spawn(actor.wake(handler));
        handle.tracker.close();
        trace!(actor = %handle.id(), "event loop spawned");

        handle
    }
}

impl<State: Default + Send + Debug + 'static> From<ManagedActor<Idle, State>>
    for ManagedActor<Started, State>
{
    fn from(value: ManagedActor<Idle, State>) -> Self {
        ManagedActor::<Started, State> {
            handle: value.handle,
            id: value.id,
            model: value.model,
            inbox: value.inbox,
            on_message: value.on_message,
            before_start: value.before_start,
            after_start: value.after_start,
            before_stop: value.before_stop,
            after_stop: value.after_stop,
            _actor_state: Default::default(),
        }
    }
}

impl<State: Default + Send + Debug + 'static> Default for ManagedActor<Idle, State> {
    fn default() -> Self {
        let (outbox, inbox) = unbounded_channel();
        let id = ActorId::new("actor");
        // Every actor owns freshly allocated collaborator state; nothing here
        // is ever shared between instances.
        let handle = ActorHandle {
            id: id.clone(),
            outbox,
            calls: Arc::new(CallCoordinator::new()),
            subscribers: Arc::new(DashMap::new()),
            tracker: TaskTracker::new(),
        };

        ManagedActor::<Idle, State> {
            handle,
            id,
            model: State::default(),
            inbox,
            on_message: None,
            before_start: Box::new(|_actor| Box::pin(async {}) as HookFuture),
            after_start: Box::new(|_actor| Box::pin(async {}) as HookFuture),
            before_stop: Box::new(|_actor| Box::pin(async {}) as HookFuture),
            after_stop: Box::new(|_actor| Box::pin(async {}) as HookFuture),
            _actor_state: Default::default(),
        }
    }
}
