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

use derive_new::new;
use lazy_static::lazy_static;

use crate::common::{ActorId, CallCoordinator};

/// The reply route of a caller, embedded in call envelopes.
///
/// A `ReturnAddress` pairs the caller's identity with its
/// [`CallCoordinator`], so the replying actor can deliver an outcome straight
/// into the caller's pending-call table without touching the caller's
/// mailbox. This keeps deep call chains (A calls B, B calls C inline) free of
/// deadlock: completing a call never requires the caller's own event loop to
/// be draining.
#[derive(new, Clone)]
pub struct ReturnAddress {
    pub(crate) id: ActorId,
    pub(crate) coordinator: Arc<CallCoordinator>,
}

lazy_static! {
    /// The shared route for callers that are not actors.
    static ref EXTERNAL: ReturnAddress = ReturnAddress::new(
        ActorId::new("external"),
        Arc::new(CallCoordinator::new()),
    );
}

impl ReturnAddress {
    /// Returns the process-wide reply route for non-actor callers.
    ///
    /// Plain tasks have no mailbox of their own; their calls register waiters
    /// in this shared coordinator instead.
    pub fn external() -> ReturnAddress {
        EXTERNAL.clone()
    }

    /// The identity of the caller this route leads to.
    #[inline]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Number of calls this route currently has in flight.
    pub fn outstanding(&self) -> usize {
        self.coordinator.outstanding()
    }
}

impl fmt::Debug for ReturnAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnAddress")
            .field("id", &self.id)
            .field("outstanding", &self.coordinator.outstanding())
            .finish()
    }
}
