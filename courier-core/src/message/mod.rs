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

//! Message types and envelopes used for communication between actors.

pub use envelope::Envelope;
pub(crate) use envelope::ReplyTicket;
pub use message_context::MessageContext;
pub use message_error::{CallError, HandlerError};
pub use response::Response;
pub use return_address::ReturnAddress;
pub use signal::SystemSignal;

mod envelope;
mod message_context;
mod message_error;
mod response;
mod return_address;
mod signal;
