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

#![forbid(unsafe_code)]

//! # Courier
//!
//! Courier is an actor-model concurrency runtime built on Tokio. Actors own a
//! private FIFO mailbox, process it strictly one message at a time, and run
//! in parallel with every other actor. On top of that foundation Courier
//! provides:
//!
//! - **`put`**: fire-and-forget sends that never block the producer.
//! - **`call`**: request/response that suspends only the calling task,
//!   never the target's event loop, with per-call timeouts and leak-free
//!   cancellation.
//! - **Broadcast graphs**: idempotent `subscribe`/`listen` edges and
//!   non-blocking fan-out with per-subscriber FIFO order.
//! - **Buses**: one actor demultiplexing to named handlers that all share a
//!   single mailbox, so handlers on the same bus are mutually exclusive.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! #[courier_message]
//! struct Greet {
//!     name: String,
//! }
//!
//! #[courier_actor]
//! struct Greeter {
//!     greeted: usize,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut runtime = CourierApp::launch();
//!     let mut greeter = runtime.new_actor::<Greeter>();
//!     greeter.on_message(|actor, context| {
//!         if let Some(greet) = context.downcast_ref::<Greet>() {
//!             actor.model.greeted += 1;
//!             return Reply::with(format!("hello, {}", greet.name));
//!         }
//!         Reply::ready()
//!     });
//!     let handle = greeter.start().await;
//!
//!     let response = handle.call(Greet { name: "world".into() }, None).await;
//!     runtime.shutdown_all().await.ok();
//! }
//! ```

/// Prelude module for convenient imports.
///
/// Re-exports the core runtime surface together with the `courier_message`
/// and `courier_actor` attribute macros.
pub mod prelude {
    pub use courier_core::prelude::*;
    pub use courier_macro::{courier_actor, courier_message};
}
