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
use std::fmt::Debug;
use std::fmt::Formatter;

pub use idle::Idle;

use crate::common::types::{AsyncLifecycleHandler, MailboxReceiver, MessageHandler};
use crate::common::{ActorHandle, ActorId};

mod idle;
pub mod started;

/// An actor, parameterized by its lifecycle state.
///
/// A `ManagedActor<Idle, State>` is a builder: it accepts the message handler
/// and lifecycle hooks, then [`start`](ManagedActor::start)s into a
/// `ManagedActor<Started, State>` whose event loop drains the mailbox one
/// message at a time. Exactly one event loop is bound to an actor for its
/// lifetime.
pub struct ManagedActor<ActorState, State: Default + Send + Debug + 'static> {
    /// The shareable reference to this actor.
    pub handle: ActorHandle,

    /// The unique identity of this actor.
    pub id: ActorId,

    /// The user-defined state owned exclusively by this actor.
    ///
    /// Only the actor's own handler mutates the model, so access is free of
    /// data races by construction.
    pub model: State,

    pub(crate) inbox: MailboxReceiver,

    pub(crate) on_message: Option<MessageHandler<State>>,
    /// Hook called before the event loop starts.
    pub(crate) before_start: AsyncLifecycleHandler<State>,
    /// Hook called when the event loop starts, before the first dequeue.
    pub(crate) after_start: AsyncLifecycleHandler<State>,
    /// Hook called when the terminate signal is received, before draining.
    pub(crate) before_stop: AsyncLifecycleHandler<State>,
    /// Hook called after the event loop has stopped.
    pub(crate) after_stop: AsyncLifecycleHandler<State>,
    _actor_state: std::marker::PhantomData<ActorState>,
}

impl<ActorState, State: Default + Send + Debug + 'static> Debug
    for ManagedActor<ActorState, State>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedActor")
            .field("id", &self.id)
            .finish()
    }
}
