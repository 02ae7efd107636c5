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

use crate::common::ActorRuntime;

/// Represents the Courier system.
///
/// The `CourierApp` struct serves as the entry point of the framework,
/// handing out an [`ActorRuntime`] through which actors and buses are
/// created and shut down.
#[derive(Default, Debug, Clone)]
pub struct CourierApp;

impl CourierApp {
    /// Launches the Courier system.
    ///
    /// # Returns
    ///
    /// An [`ActorRuntime`] ready to create actors. Must be called from within
    /// a tokio runtime; actors are spawned onto it.
    pub fn launch() -> ActorRuntime {
        ActorRuntime::default()
    }
}
