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
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::{error, trace};

use crate::common::types::HandlerResult;

/// Identifies one outstanding call issued through a [`CallCoordinator`].
///
/// Ids are allocated from a monotonically increasing counter and are never
/// reused within a coordinator, so a reply that arrives after its call timed
/// out can only miss, never resolve a later call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallId(u64);

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The pending-call table of one caller.
///
/// Each caller (an actor, or the shared external route for plain tasks) owns
/// one coordinator. `register` creates a waiter slot; the replying actor's
/// event loop resolves it by id; a timed-out caller forgets it. Every slot is
/// resolved or forgotten exactly once and removed either way.
pub struct CallCoordinator {
    next_id: AtomicU64,
    pending: DashMap<CallId, oneshot::Sender<HandlerResult>>,
}

impl CallCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pending: DashMap::new(),
        }
    }

    /// Allocates a fresh call id and installs its waiter slot.
    pub(crate) fn register(&self) -> (CallId, oneshot::Receiver<HandlerResult>) {
        let id = CallId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = oneshot::channel();
        let previous = self.pending.insert(id, tx);
        // The counter makes duplicates impossible; an occupied slot here is a bug.
        debug_assert!(previous.is_none(), "duplicate call id {id}");
        if previous.is_some() {
            error!(call_id = %id, "duplicate call id registered; previous waiter dropped");
        }
        (id, rx)
    }

    /// Delivers the outcome for `id`, fulfilling its waiter.
    ///
    /// Returns `false` when no waiter is registered under `id` because the
    /// call already timed out or was forgotten, in which case the outcome is
    /// discarded.
    pub(crate) fn resolve(&self, id: CallId, outcome: HandlerResult) -> bool {
        match self.pending.remove(&id) {
            Some((_, waiter)) => {
                if waiter.send(outcome).is_err() {
                    trace!(call_id = %id, "caller gone before reply delivery");
                }
                true
            }
            None => {
                trace!(call_id = %id, "late reply discarded; no waiter registered");
                false
            }
        }
    }

    /// Removes the waiter for `id` without fulfilling it.
    ///
    /// Used by the timeout path and by reply tickets dropped unresolved.
    pub(crate) fn forget(&self, id: CallId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Number of calls currently awaiting a reply.
    pub(crate) fn outstanding(&self) -> usize {
        self.pending.len()
    }
}

impl fmt::Debug for CallCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallCoordinator")
            .field("outstanding", &self.pending.len())
            .finish()
    }
}
