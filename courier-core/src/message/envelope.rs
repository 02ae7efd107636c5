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
use std::sync::Arc;
use std::time::SystemTime;

use static_assertions::assert_impl_all;
use tracing::trace;

use crate::common::{ActorId, CallId};
use crate::common::types::HandlerResult;
use crate::message::ReturnAddress;
use crate::traits::ActorMessage;

/// Represents an envelope that carries a message within the actor system.
///
/// The reply ticket is present exactly when the sender expects a reply;
/// fire-and-forget sends carry none.
#[derive(Debug)]
pub struct Envelope {
    /// The message contained in the envelope.
    pub payload: Arc<dyn ActorMessage>,
    /// The time when the message was sent.
    pub sent_at: SystemTime,
    pub(crate) reply_to: Option<ReplyTicket>,
}

impl Envelope {
    /// Creates a fire-and-forget envelope.
    pub(crate) fn new(payload: Arc<dyn ActorMessage>) -> Self {
        Envelope {
            payload,
            sent_at: SystemTime::now(),
            reply_to: None,
        }
    }

    /// Creates a call envelope whose outcome resolves `ticket`.
    pub(crate) fn with_reply(payload: Arc<dyn ActorMessage>, ticket: ReplyTicket) -> Self {
        Envelope {
            payload,
            sent_at: SystemTime::now(),
            reply_to: Some(ticket),
        }
    }
}

// Ensures that Envelope implements the Send trait.
assert_impl_all!(Envelope: Send);

/// The obligation to complete one pending call.
///
/// A ticket resolves its waiter exactly once. Dropping a ticket unresolved
/// (the envelope never reached dispatch because the actor stopped) forgets
/// the waiter so the caller observes the failure instead of leaking a
/// pending-call entry.
pub(crate) struct ReplyTicket {
    call_id: CallId,
    return_address: ReturnAddress,
    resolved: bool,
}

impl ReplyTicket {
    pub(crate) fn new(call_id: CallId, return_address: ReturnAddress) -> Self {
        Self {
            call_id,
            return_address,
            resolved: false,
        }
    }

    /// The identity of the caller awaiting this reply.
    pub(crate) fn caller(&self) -> &ActorId {
        self.return_address.id()
    }

    /// Delivers the handler outcome into the caller's pending-call table.
    pub(crate) fn resolve(mut self, outcome: HandlerResult) {
        self.resolved = true;
        if !self
            .return_address
            .coordinator
            .resolve(self.call_id, outcome)
        {
            trace!(
                call_id = %self.call_id,
                caller = %self.return_address.id(),
                "reply arrived after the caller stopped waiting"
            );
        }
    }
}

impl Drop for ReplyTicket {
    fn drop(&mut self) {
        if !self.resolved {
            self.return_address.coordinator.forget(self.call_id);
            trace!(
                call_id = %self.call_id,
                caller = %self.return_address.id(),
                "call envelope dropped before dispatch"
            );
        }
    }
}

impl fmt::Debug for ReplyTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyTicket")
            .field("call_id", &self.call_id)
            .field("caller", &self.return_address.id)
            .finish()
    }
}
