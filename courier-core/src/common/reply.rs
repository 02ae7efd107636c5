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

use std::future::Future;
use std::sync::Arc;

use crate::common::types::{HandlerFuture, HandlerResult};
use crate::message::HandlerError;
use crate::traits::ActorMessage;

/// A utility struct for creating message-handler futures.
pub struct Reply;

impl Reply {
    /// Completes the handler immediately with no reply value.
    ///
    /// This is the usual return for fire-and-forget handlers, where all work
    /// happens synchronously inside the handler closure.
    pub fn ready() -> HandlerFuture {
        Box::pin(async { Ok(None) })
    }

    /// Completes the handler immediately with a reply value.
    ///
    /// When the inbound message was a call, `value` becomes the caller's
    /// response; for a plain `put` the value is discarded.
    pub fn with(value: impl ActorMessage) -> HandlerFuture {
        let boxed: Box<dyn ActorMessage> = Box::new(value);
        Box::pin(async move { Ok(Some(boxed)) })
    }

    /// Completes the handler immediately by forwarding a shared payload.
    ///
    /// Useful for echo and relay handlers that reply with the inbound payload
    /// itself.
    pub fn forward(payload: Arc<dyn ActorMessage>) -> HandlerFuture {
        let boxed = dyn_clone::clone_box(&*payload);
        Box::pin(async move { Ok(Some(boxed)) })
    }

    /// Completes the handler immediately with a failure.
    pub fn fail(error: HandlerError) -> HandlerFuture {
        Box::pin(async move { Err(error) })
    }

    /// Wraps an async block as a handler future.
    ///
    /// Required for handlers that await (calls to other actors, timers, I/O).
    pub fn from_async<F>(future: F) -> HandlerFuture
    where
        F: Future<Output = HandlerResult> + Send + 'static,
    {
        Box::pin(future)
    }

    /// Builds the `Ok(Some(..))` handler outcome inside an async block.
    pub fn value(value: impl ActorMessage) -> HandlerResult {
        Ok(Some(Box::new(value)))
    }

    /// Builds the `Ok(None)` handler outcome inside an async block.
    pub fn none() -> HandlerResult {
        Ok(None)
    }
}
