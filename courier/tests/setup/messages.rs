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
use courier::prelude::*;

/// Minimal no-payload message.
#[courier_message]
pub struct Ping;

/// A tagged value used by the multi-producer ordering tests.
#[courier_message]
pub struct Tagged {
    pub producer: usize,
    pub seq: usize,
}

/// Asks an actor to forward `value` to `target` and report the response.
#[courier_message]
pub struct Forward {
    pub target: ActorHandle,
    pub value: u32,
}
