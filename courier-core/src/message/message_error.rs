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
use std::time::Duration;

/// A failure raised while an actor processed one message.
///
/// Handler failures are contained at the dispatch boundary: they are logged,
/// converted into an error response when the message was a call, and never
/// tear down the actor's event loop.
#[derive(Debug, Clone)]
pub enum HandlerError {
    /// The handler returned an error.
    Failed(String),
    /// The handler panicked; the panic was caught at the dispatch boundary.
    Panicked(String),
    /// A bus received a selector with no registered handler.
    UnknownSelector(String),
}

impl HandlerError {
    /// Builds a [`HandlerError::Failed`] from any displayable cause.
    pub fn failed(cause: impl Into<String>) -> Self {
        HandlerError::Failed(cause.into())
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HandlerError::Failed(msg) => write!(f, "Handler failed: {}", msg),
            HandlerError::Panicked(msg) => write!(f, "Handler panicked: {}", msg),
            HandlerError::UnknownSelector(name) => {
                write!(f, "No handler registered for selector '{}'", name)
            }
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        HandlerError::Failed(format!("{err:#}"))
    }
}

/// The caller-visible outcome of a failed `call`.
#[derive(Debug)]
pub enum CallError {
    /// No reply arrived within the deadline; the waiter was removed.
    Timeout(Duration),
    /// The target's handler failed while processing the request.
    Handler(HandlerError),
    /// The target's mailbox is closed; the request was never enqueued.
    MailboxClosed,
    /// The target stopped before the request was dispatched.
    Dropped,
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CallError::Timeout(deadline) => {
                write!(f, "Call timed out after {}ms", deadline.as_millis())
            }
            CallError::Handler(err) => write!(f, "Call failed: {}", err),
            CallError::MailboxClosed => write!(f, "Target mailbox is closed"),
            CallError::Dropped => write!(f, "Target stopped before replying"),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Handler(err) => Some(err),
            _ => None,
        }
    }
}
