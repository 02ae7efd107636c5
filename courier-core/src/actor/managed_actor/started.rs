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
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, instrument, trace};

use crate::actor::ManagedActor;
use crate::common::types::MessageHandler;
use crate::common::ActorHandle;
use crate::message::{Envelope, HandlerError, MessageContext, SystemSignal};

/// Type-state marker for a [`ManagedActor`] that is actively running and
/// processing messages.
///
/// When an actor is in the `Started` state, its event loop task ([`wake`])
/// is draining the mailbox, dispatching each message to the handler
/// registered during the [`Idle`](super::Idle) state. Interaction happens
/// through the actor's [`ActorHandle`].
///
/// [`wake`]: ManagedActor::wake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Started;

impl<State: Default + Send + Debug + 'static> ManagedActor<Started, State> {
    /// The shareable reference to this actor.
    pub fn handle(&self) -> &ActorHandle {
        &self.handle
    }

    /// The actor's event loop.
    ///
    /// Dequeues one envelope at a time and awaits the handler before the next
    /// dequeue, so two handler invocations for the same actor never overlap.
    /// On `Terminate` the inbox is closed and whatever was already accepted
    /// is drained before the loop exits.
    #[instrument(skip(self, handler), fields(actor = %self.id))]
    pub(crate) async fn wake(mut self, handler: MessageHandler<State>) {
        (self.after_start)(&self).await;
        let mut terminate_requested = false;

        while let Some(envelope) = self.inbox.recv().await {
            if let Some(SystemSignal::Terminate) =
                envelope.payload.as_any().downcast_ref::<SystemSignal>()
            {
                trace!("terminate signal received");
                terminate_requested = true;
                (self.before_stop)(&self).await;
                // No further enqueues are accepted; already-queued messages
                // still get dispatched below.
                self.inbox.close();
            } else {
                self.dispatch(&handler, envelope).await;
            }

            if terminate_requested && self.inbox.is_empty() {
                trace!("inbox drained after terminate request");
                break;
            }
        }

        trace!("message loop finished");
        (self.after_stop)(&self).await;
    }

    /// Runs the handler for one envelope and routes its outcome.
    ///
    /// A handler failure (returned error or caught panic) never escapes
    /// into the event loop: it is logged, and delivered to the caller when
    /// the message was a call.
    async fn dispatch(&mut self, handler: &MessageHandler<State>, envelope: Envelope) {
        let Envelope {
            payload,
            sent_at,
            reply_to,
        } = envelope;

        let context = MessageContext {
            payload,
            sent_at,
            caller: reply_to.as_ref().map(|ticket| ticket.caller().clone()),
        };
        trace!(caller = ?context.caller(), "dispatching message");

        let future = handler(self, &context);
        let outcome = match AssertUnwindSafe(future).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(HandlerError::Panicked(panic_message(panic))),
        };

        match reply_to {
            Some(ticket) => ticket.resolve(outcome),
            None => {
                if let Err(err) = outcome {
                    error!(actor = %self.id, error = %err, "message handler failed");
                }
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
