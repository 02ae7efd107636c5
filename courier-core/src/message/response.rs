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
use crate::traits::ActorMessage;

/// The value a `call` resolved to.
///
/// A handler may complete a call without producing a value (`Ok(None)`), in
/// which case the response is empty. Typed access goes through downcasting,
/// mirroring how payloads travel type-erased through mailboxes.
#[derive(Debug)]
pub struct Response {
    payload: Option<Box<dyn ActorMessage>>,
}

impl Response {
    pub(crate) fn new(payload: Option<Box<dyn ActorMessage>>) -> Self {
        Self { payload }
    }

    /// `true` when the handler completed the call without a value.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Borrows the response value as a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.payload
            .as_deref()
            .and_then(|payload| payload.as_any().downcast_ref::<T>())
    }

    /// Clones the response value out as a concrete type.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}
