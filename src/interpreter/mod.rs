//! Run-to-completion interpreter.
//!
//! An interpreter owns the current state and context of one running
//! machine. Events are queued and handled strictly one at a time: an event's
//! observers, actions and state update all complete before the next queued
//! event is looked at.
//!
//! Per event:
//! 1. event observers are notified with the raw event;
//! 2. the transition for the current state and the event's kind is resolved;
//! 3. if there is one, its actions run in order, the state pointer moves to
//!    the target and the target's entry actions run, each action receiving
//!    the context returned by the previous one;
//! 4. transition observers are notified with the resulting snapshot, whether
//!    or not a transition fired.
//!
//! An event with no transition in the current state is not an error.

mod error;
mod inbox;
mod observers;
mod options;

pub use error::InterpreterError;
pub use inbox::{EventSender, Status};
pub use observers::{ObserverId, Observers};
pub use options::{InterpreterOptions, DEFAULT_MAX_HISTORY};

use crate::actions::ActionError;
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Event, HistoryEntry, Schema, Snapshot, State, StateHistory, Trigger};
use crate::machine::Machine;
use chrono::Utc;
use inbox::{lock, new_inbox, SharedInbox};
use std::fmt;
use uuid::Uuid;

/// A running instance of a [`Machine`].
///
/// # Example
///
/// ```rust
/// use session_machine::actions::RecordingSink;
/// use session_machine::auth::{auth_machine, AuthEvent, AuthState};
///
/// let sink = RecordingSink::new();
/// let machine = auth_machine(sink.clone()).unwrap();
/// let mut service = machine.interpret();
///
/// service.start().unwrap();
/// service.send(AuthEvent::login("Jason")).unwrap();
///
/// assert_eq!(service.state(), &AuthState::LoggedIn);
/// assert_eq!(service.context().user.as_deref(), Some("Jason"));
/// assert_eq!(sink.lines().last().map(String::as_str), Some("Hello, Jason!"));
/// ```
pub struct Interpreter<M: Schema> {
    session_id: Uuid,
    machine: Machine<M>,
    options: InterpreterOptions,
    inbox: SharedInbox<M::Event>,
    state: M::State,
    context: M::Context,
    changed: bool,
    history: StateHistory<M::State>,
    observers: Observers<M>,
}

impl<M: Schema> Interpreter<M> {
    /// Create an interpreter in `NotStarted` with default options.
    pub fn new(machine: Machine<M>) -> Self {
        Self::with_options(machine, InterpreterOptions::default())
    }

    pub fn with_options(machine: Machine<M>, options: InterpreterOptions) -> Self {
        let state = machine.definition().initial_state().clone();
        Self {
            session_id: Uuid::new_v4(),
            machine,
            options,
            inbox: new_inbox(Status::NotStarted),
            state,
            context: M::Context::default(),
            changed: false,
            history: StateHistory::new(),
            observers: Observers::default(),
        }
    }

    /// Recreate a running interpreter from a checkpoint.
    ///
    /// The checkpointed state becomes current without running its entry
    /// actions, and no observers are notified.
    pub fn resume(
        machine: Machine<M>,
        checkpoint: Checkpoint<M::State, M::Context>,
        options: InterpreterOptions,
    ) -> Result<Self, InterpreterError> {
        checkpoint.validate()?;
        if checkpoint.machine_id != machine.id() {
            return Err(CheckpointError::MachineMismatch {
                expected: machine.id().to_string(),
                found: checkpoint.machine_id,
            }
            .into());
        }
        if !machine.definition().contains(&checkpoint.snapshot.state) {
            return Err(CheckpointError::UnknownState {
                machine: machine.id().to_string(),
                state: checkpoint.snapshot.state.name().to_string(),
            }
            .into());
        }

        tracing::info!(
            session = %checkpoint.session_id,
            machine = machine.id(),
            state = checkpoint.snapshot.state.name(),
            "interpreter resumed from checkpoint"
        );
        Ok(Self {
            session_id: checkpoint.session_id,
            machine,
            options,
            inbox: new_inbox(Status::Running),
            state: checkpoint.snapshot.state,
            context: checkpoint.snapshot.context,
            changed: checkpoint.snapshot.changed,
            history: checkpoint.history,
            observers: Observers::default(),
        })
    }

    /// Enter the initial state and run its entry actions.
    ///
    /// Transition observers are notified once with the initial snapshot.
    pub fn start(&mut self) -> Result<(), InterpreterError> {
        {
            let mut inbox = lock(&self.inbox);
            if inbox.status != Status::NotStarted {
                return Err(InterpreterError::AlreadyStarted {
                    status: inbox.status,
                });
            }
            inbox.status = Status::Running;
        }

        let machine = self.machine.clone();
        let definition = machine.definition();
        self.state = definition.initial_state().clone();
        self.context = M::Context::default();
        self.changed = false;
        tracing::info!(
            session = %self.session_id,
            machine = definition.id(),
            state = self.state.name(),
            "interpreter started"
        );

        self.run_actions(
            &machine,
            definition.entry_actions_of(definition.initial_state()),
            Trigger::Start,
        )
        .map_err(|source| InterpreterError::Action {
            event: "start".to_string(),
            source,
        })?;
        self.notify_transition();
        self.drain()
    }

    /// Queue `event` and process everything queued, in order.
    pub fn send(&mut self, event: M::Event) -> Result<(), InterpreterError> {
        lock(&self.inbox).push(event)?;
        self.drain()
    }

    /// Process events queued through [`EventSender`]s.
    pub fn flush(&mut self) -> Result<(), InterpreterError> {
        let status = self.status();
        if status != Status::Running {
            return Err(InterpreterError::NotStarted { status });
        }
        self.drain()
    }

    /// Stop for good, discarding any queued events.
    pub fn stop(&mut self) -> Result<(), InterpreterError> {
        let dropped = {
            let mut inbox = lock(&self.inbox);
            if inbox.status != Status::Running {
                return Err(InterpreterError::NotStarted {
                    status: inbox.status,
                });
            }
            inbox.status = Status::Stopped;
            let dropped = inbox.queue.len();
            inbox.queue.clear();
            dropped
        };

        tracing::info!(session = %self.session_id, dropped, "interpreter stopped");
        self.observers.notify_stop();
        Ok(())
    }

    /// Handle for queueing events from observers or other owners.
    pub fn sender(&self) -> EventSender<M> {
        EventSender::new(self.inbox.clone())
    }

    pub fn on_event<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&M::Event) + Send + 'static,
    {
        self.observers.on_event(observer)
    }

    pub fn on_transition<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Snapshot<M::State, M::Context>) + Send + 'static,
    {
        self.observers.on_transition(observer)
    }

    pub fn on_stop<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut() + Send + 'static,
    {
        self.observers.on_stop(observer)
    }

    /// Unsubscribe an observer registered on this interpreter.
    pub fn off(&mut self, id: ObserverId) -> bool {
        self.observers.off(id)
    }

    pub fn status(&self) -> Status {
        lock(&self.inbox).status
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn machine(&self) -> &Machine<M> {
        &self.machine
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn context(&self) -> &M::Context {
        &self.context
    }

    pub fn history(&self) -> &StateHistory<M::State> {
        &self.history
    }

    /// Current state and context.
    pub fn snapshot(&self) -> Snapshot<M::State, M::Context> {
        Snapshot {
            state: self.state.clone(),
            context: self.context.clone(),
            changed: self.changed,
        }
    }

    /// Capture everything needed to [`resume`](Self::resume) later.
    pub fn checkpoint(&self) -> Checkpoint<M::State, M::Context> {
        Checkpoint::new(
            self.session_id,
            self.machine.id(),
            self.snapshot(),
            self.history.clone(),
        )
    }

    fn drain(&mut self) -> Result<(), InterpreterError> {
        loop {
            // The lock is released before processing so observers can queue
            // more events through a sender.
            let next = lock(&self.inbox).queue.pop_front();
            match next {
                Some(event) => self.process(event)?,
                None => return Ok(()),
            }
        }
    }

    fn process(&mut self, event: M::Event) -> Result<(), InterpreterError> {
        tracing::debug!(
            session = %self.session_id,
            event = event.name(),
            state = self.state.name(),
            "event received"
        );
        self.observers.notify_event(&event);

        let machine = self.machine.clone();
        let Some(transition) = machine
            .definition()
            .resolve_transition(&self.state, event.kind())
        else {
            tracing::debug!(
                session = %self.session_id,
                event = event.name(),
                state = self.state.name(),
                "no transition for event"
            );
            self.changed = false;
            self.notify_transition();
            return Ok(());
        };

        let trigger = Trigger::Event(&event);
        let abandoned = |source: ActionError| InterpreterError::Action {
            event: event.name().to_string(),
            source,
        };

        self.changed = false;
        self.run_actions(&machine, &transition.actions, trigger)
            .map_err(abandoned)?;

        let target = transition.target.clone();
        let from = std::mem::replace(&mut self.state, target.clone());
        self.changed = true;
        if self.options.record_history {
            self.history.append(
                HistoryEntry {
                    from: from.clone(),
                    to: target.clone(),
                    event: event.name().to_string(),
                    timestamp: Utc::now(),
                },
                self.options.max_history,
            );
        }
        tracing::debug!(
            session = %self.session_id,
            event = event.name(),
            from = from.name(),
            to = target.name(),
            "transition taken"
        );

        self.run_actions(
            &machine,
            machine.definition().entry_actions_of(&target),
            trigger,
        )
        .map_err(abandoned)?;

        self.notify_transition();
        Ok(())
    }

    /// Run `actions` in order, threading the context through each. On failure
    /// the context is left as returned by the last action that succeeded.
    fn run_actions(
        &mut self,
        machine: &Machine<M>,
        actions: &[M::Action],
        trigger: Trigger<'_, M::Event>,
    ) -> Result<(), ActionError> {
        for &action in actions {
            tracing::trace!(session = %self.session_id, ?action, "running action");
            match machine
                .actions()
                .run(action, self.context.clone(), trigger)
            {
                Ok(next) => self.context = next,
                Err(err) => {
                    tracing::warn!(session = %self.session_id, ?action, %err, "action failed");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn notify_transition(&mut self) {
        let snapshot = self.snapshot();
        self.observers.notify_transition(&snapshot);
    }
}

impl<M: Schema> fmt::Debug for Interpreter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("session_id", &self.session_id)
            .field("machine", &self.machine.id())
            .field("status", &self.status())
            .field("state", &self.state)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
