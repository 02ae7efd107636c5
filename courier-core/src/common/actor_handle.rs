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
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{error, instrument, trace};

use crate::common::config::CONFIG;
use crate::common::types::{MailboxSender, SubscriberSet};
use crate::common::{ActorId, CallCoordinator};
use crate::message::{CallError, Envelope, ReplyTicket, Response, ReturnAddress, SystemSignal};
use crate::traits::ActorMessage;

/// A shareable, non-owning reference to an actor.
///
/// Handles are cheap to clone; every clone addresses the same mailbox and the
/// same pending-call table. Equality is identity of the underlying actor, not
/// structure. A handle owns no actor state; dropping the last handle does
/// not stop the actor.
#[derive(Clone)]
pub struct ActorHandle {
    /// The unique identity of the actor behind this handle.
    pub(crate) id: ActorId,
    /// The sender half of the actor's mailbox.
    pub(crate) outbox: MailboxSender,
    /// The actor's pending-call table.
    pub(crate) calls: Arc<CallCoordinator>,
    /// The actors subscribed to this actor's broadcasts.
    pub(crate) subscribers: SubscriberSet,
    /// Tracks the actor's event-loop task for graceful shutdown.
    pub(crate) tracker: TaskTracker,
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ActorHandle {}

impl Hash for ActorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("id", &self.id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ActorHandle {
    /// The identity of the actor behind this handle.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// The root name of the actor.
    pub fn name(&self) -> &str {
        self.id.root()
    }

    /// Sends a fire-and-forget message.
    ///
    /// Never blocks the producer and gives no delivery confirmation. A closed
    /// mailbox is reported on the error log channel rather than surfaced to
    /// the caller.
    pub fn put(&self, message: impl ActorMessage) {
        self.deliver(Envelope::new(Arc::new(message)));
    }

    pub(crate) fn deliver(&self, envelope: Envelope) {
        if self.outbox.send(envelope).is_err() {
            error!(actor = %self.id, "mailbox closed; message dropped");
        }
    }

    /// Issues a request and awaits its response, from a non-actor caller.
    ///
    /// The current task suspends on the call's waiter; the target keeps
    /// draining its mailbox meanwhile. `timeout` falls back to the configured
    /// default when `None`. The waiter is registered on the shared external
    /// route; actors calling other actors from inside a handler should use
    /// [`call_from`](Self::call_from) so the call is booked against their own
    /// pending-call table.
    pub async fn call(
        &self,
        message: impl ActorMessage,
        timeout: Option<Duration>,
    ) -> Result<Response, CallError> {
        self.call_with_return(ReturnAddress::external(), Arc::new(message), timeout)
            .await
    }

    /// Issues a request on behalf of `caller`, booking the waiter in the
    /// caller's own pending-call table.
    pub async fn call_from(
        &self,
        caller: &ActorHandle,
        message: impl ActorMessage,
        timeout: Option<Duration>,
    ) -> Result<Response, CallError> {
        self.call_with_return(caller.return_address(), Arc::new(message), timeout)
            .await
    }

    #[instrument(skip(self, payload), fields(target = %self.id, caller = %return_address.id()))]
    pub(crate) async fn call_with_return(
        &self,
        return_address: ReturnAddress,
        payload: Arc<dyn ActorMessage>,
        timeout: Option<Duration>,
    ) -> Result<Response, CallError> {
        let (call_id, waiter) = return_address.coordinator.register();
        trace!(call_id = %call_id, "issuing call");

        let ticket = ReplyTicket::new(call_id, return_address.clone());
        let envelope = Envelope::with_reply(payload, ticket);
        if self.outbox.send(envelope).is_err() {
            // The rejected envelope is dropped with its ticket, which forgets
            // the waiter we just registered.
            return Err(CallError::MailboxClosed);
        }

        let deadline = timeout.unwrap_or_else(|| CONFIG.default_call_timeout());
        match tokio::time::timeout(deadline, waiter).await {
            Ok(Ok(Ok(value))) => Ok(Response::new(value)),
            Ok(Ok(Err(handler_error))) => Err(CallError::Handler(handler_error)),
            Ok(Err(_closed)) => Err(CallError::Dropped),
            Err(_elapsed) => {
                return_address.coordinator.forget(call_id);
                trace!(call_id = %call_id, "call timed out; waiter removed");
                Err(CallError::Timeout(deadline))
            }
        }
    }

    /// Adds `subscriber` to this actor's broadcast edges. Idempotent.
    pub fn subscribe(&self, subscriber: &ActorHandle) {
        trace!(actor = %self.id, subscriber = %subscriber.id, "subscribe");
        self.subscribers
            .insert(subscriber.id.clone(), subscriber.clone());
    }

    /// Subscribes this actor to another actor's broadcasts. Idempotent.
    pub fn listen(&self, other: &ActorHandle) {
        other.subscribe(self);
    }

    /// Sends a fire-and-forget message to every current subscriber.
    ///
    /// The payload is shared, not copied, across subscribers. Per-subscriber
    /// FIFO order is preserved; no ordering is guaranteed across subscribers,
    /// and delivery never blocks, so cycles in the subscription graph cannot
    /// deadlock.
    pub fn broadcast(&self, message: impl ActorMessage) {
        self.broadcast_shared(Arc::new(message));
    }

    /// [`broadcast`](Self::broadcast) for an already type-erased payload,
    /// used by relays forwarding an inbound message as-is.
    pub fn broadcast_shared(&self, payload: Arc<dyn ActorMessage>) {
        for subscriber in self.subscribers.iter() {
            subscriber.value().deliver(Envelope::new(payload.clone()));
        }
    }

    /// The reply route leading back to this actor.
    pub fn return_address(&self) -> ReturnAddress {
        ReturnAddress::new(self.id.clone(), self.calls.clone())
    }

    /// Number of calls this actor currently has in flight as a caller.
    ///
    /// Useful for verifying that timed-out or failed calls do not leak
    /// pending-call entries.
    pub fn outstanding_calls(&self) -> usize {
        self.calls.outstanding()
    }

    /// Stops the actor gracefully.
    ///
    /// A terminate signal is queued behind every message already in the
    /// mailbox; the actor drains what it has accepted, runs its stop hooks,
    /// and exits. Resolves once the event loop has finished. Stopping an
    /// already-stopped actor is a no-op.
    #[instrument(skip(self), fields(actor = %self.id))]
    pub async fn stop(&self) -> anyhow::Result<()> {
        trace!("sending terminate signal");
        if self
            .outbox
            .send(Envelope::new(Arc::new(SystemSignal::Terminate)))
            .is_err()
        {
            trace!("actor already stopped");
        }
        self.tracker.wait().await;
        trace!("actor stopped");
        Ok(())
    }
}
