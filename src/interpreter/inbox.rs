//! The interpreter's event queue and the handles that feed it.

use super::error::InterpreterError;
use crate::core::{Event, Schema};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle of an interpreter. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    Running,
    Stopped,
}

/// Status and pending events, guarded together.
pub(crate) struct Inbox<E> {
    pub(crate) status: Status,
    pub(crate) queue: VecDeque<E>,
}

pub(crate) type SharedInbox<E> = Arc<Mutex<Inbox<E>>>;

pub(crate) fn new_inbox<E>(status: Status) -> SharedInbox<E> {
    Arc::new(Mutex::new(Inbox {
        status,
        queue: VecDeque::new(),
    }))
}

pub(crate) fn lock<E>(inbox: &Mutex<Inbox<E>>) -> MutexGuard<'_, Inbox<E>> {
    inbox.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E> Inbox<E> {
    /// Append `event` if the interpreter is running.
    pub(crate) fn push(&mut self, event: E) -> Result<(), InterpreterError> {
        if self.status != Status::Running {
            return Err(InterpreterError::NotStarted {
                status: self.status,
            });
        }
        self.queue.push_back(event);
        Ok(())
    }
}

/// Cloneable handle that enqueues events without processing them.
///
/// Events sent while the interpreter is handling another event (for example
/// from inside an observer) are processed after it, in FIFO order. Events
/// sent while the interpreter is idle wait for its next `send` or `flush`.
pub struct EventSender<M: Schema> {
    inbox: SharedInbox<M::Event>,
}

impl<M: Schema> EventSender<M> {
    pub(crate) fn new(inbox: SharedInbox<M::Event>) -> Self {
        Self { inbox }
    }

    /// Enqueue `event`. Fails unless the interpreter is running.
    pub fn send(&self, event: M::Event) -> Result<(), InterpreterError> {
        tracing::trace!(event = event.name(), "event queued by sender");
        lock(&self.inbox).push(event)
    }

    pub fn status(&self) -> Status {
        lock(&self.inbox).status
    }

    /// Number of events waiting to be processed.
    pub fn pending(&self) -> usize {
        lock(&self.inbox).queue.len()
    }
}

impl<M: Schema> Clone for EventSender<M> {
    fn clone(&self) -> Self {
        Self {
            inbox: Arc::clone(&self.inbox),
        }
    }
}

impl<M: Schema> fmt::Debug for EventSender<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("status", &self.status())
            .field("pending", &self.pending())
            .finish()
    }
}
