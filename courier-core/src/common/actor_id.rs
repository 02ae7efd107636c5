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
use std::sync::Arc;

use uuid::Uuid;

/// The unique identity of an actor.
///
/// Combines a human-readable root name with a process-unique uuid. Two
/// `ActorId`s compare equal only when they refer to the same actor instance;
/// the root name carries no identity weight.
#[derive(Clone, Debug, Eq)]
pub struct ActorId {
    uuid: Uuid,
    root: Arc<str>,
}

impl ActorId {
    pub(crate) fn new(root: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            root: Arc::from(root),
        }
    }

    /// Returns the root name component of the id.
    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the unique component of the id.
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl PartialEq for ActorId {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl std::hash::Hash for ActorId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.root, self.uuid.simple())
    }
}
