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

//! Common utilities and structures used throughout the Courier framework.

pub use actor_handle::ActorHandle;
pub use actor_id::ActorId;
pub use app::CourierApp;
pub use call_coordinator::{CallCoordinator, CallId};
pub use config::{CourierConfig, DefaultsConfig, TimeoutConfig, CONFIG};
pub use reply::Reply;
pub use runtime::ActorRuntime;
pub use types::{HandlerFuture, HandlerResult};

mod actor_handle;
mod actor_id;
mod app;
mod call_coordinator;
mod config;
mod reply;
mod runtime;
pub(crate) mod types;
