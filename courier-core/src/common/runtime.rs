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
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use tracing::{error, instrument, trace};

use crate::actor::{BusBuilder, Idle, ManagedActor};
use crate::common::config::CONFIG;
use crate::common::{ActorHandle, ActorId};

/// The running Courier system.
///
/// Tracks every root actor created through it and provides the factories for
/// new actors and buses. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct ActorRuntime {
    roots: Arc<DashMap<ActorId, ActorHandle>>,
}

impl ActorRuntime {
    /// Creates a new actor with the default name.
    ///
    /// # Type Parameters
    ///
    /// * `State` - The state type of the actor, which must implement
    ///   `Default`, `Send`, `Debug`, and have a static lifetime.
    ///
    /// # Returns
    ///
    /// A `ManagedActor` in the `Idle` state with the specified `State`.
    pub fn new_actor<State>(&mut self) -> ManagedActor<Idle, State>
    where
        State: Default + Send + Debug + 'static,
    {
        let name = CONFIG.defaults.actor_name.clone();
        self.new_actor_with_name(&name)
    }

    /// Creates a new actor with the provided root name.
    pub fn new_actor_with_name<State>(&mut self, name: &str) -> ManagedActor<Idle, State>
    where
        State: Default + Send + Debug + 'static,
    {
        let actor = ManagedActor::new(name);
        trace!(actor = %actor.id, "created actor");
        self.roots.insert(actor.id.clone(), actor.handle.clone());
        actor
    }

    /// Creates a builder for a bus actor.
    ///
    /// Handlers are registered by selector name on the builder; the routing
    /// table is frozen when the bus starts.
    pub fn new_bus(&mut self) -> BusBuilder {
        let name = CONFIG.defaults.bus_name.clone();
        BusBuilder::new(self.new_actor_with_name(&name))
    }

    /// Retrieves the number of actors created through this runtime.
    pub fn actor_count(&self) -> usize {
        self.roots.len()
    }

    /// Stops every actor created through this runtime.
    ///
    /// Each actor gets the configured shutdown window; an actor that does not
    /// finish in time is reported and abandoned rather than blocking the rest
    /// of the shutdown.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&mut self) -> anyhow::Result<()> {
        let deadline = CONFIG.system_shutdown_timeout();

        let stop_futures: Vec<_> = self
            .roots
            .iter()
            .map(|entry| {
                let handle = entry.value().clone();
                async move {
                    trace!(actor = %handle.id(), "stopping");
                    match tokio::time::timeout(deadline, handle.stop()).await {
                        Ok(Ok(())) => {
                            trace!(actor = %handle.id(), "stopped");
                        }
                        Ok(Err(e)) => {
                            error!(actor = %handle.id(), "stop returned error: {:?}", e);
                        }
                        Err(_) => {
                            error!(
                                actor = %handle.id(),
                                "shutdown timeout after {} ms",
                                deadline.as_millis()
                            );
                        }
                    }
                }
            })
            .collect();

        join_all(stop_futures).await;
        self.roots.clear();
        Ok(())
    }
}
