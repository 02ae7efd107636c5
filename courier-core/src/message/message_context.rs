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
use std::sync::Arc;
use std::time::SystemTime;

use static_assertions::assert_impl_all;

use crate::common::ActorId;
use crate::traits::ActorMessage;

/// The per-dispatch view of one inbound message, handed to the handler.
#[derive(Clone, Debug)]
pub struct MessageContext {
    pub(crate) payload: Arc<dyn ActorMessage>,
    pub(crate) sent_at: SystemTime,
    pub(crate) caller: Option<ActorId>,
}

impl MessageContext {
    /// Borrows the type-erased payload.
    pub fn message(&self) -> &dyn ActorMessage {
        &*self.payload
    }

    /// Borrows the payload as a concrete type.
    pub fn downcast_ref<M: 'static>(&self) -> Option<&M> {
        self.payload.as_any().downcast_ref::<M>()
    }

    /// Clones the shared payload for forwarding without copying the value.
    pub fn shared_payload(&self) -> Arc<dyn ActorMessage> {
        self.payload.clone()
    }

    /// The time when the message was sent.
    pub fn sent_at(&self) -> &SystemTime {
        &self.sent_at
    }

    /// The identity of the caller, when the message is a call.
    pub fn caller(&self) -> Option<&ActorId> {
        self.caller.as_ref()
    }

    /// `true` when the sender awaits a reply.
    pub fn is_call(&self) -> bool {
        self.caller.is_some()
    }
}

// Ensures that MessageContext implements the Send trait.
assert_impl_all!(MessageContext: Send);
