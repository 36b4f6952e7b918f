//! Events that drive a machine, and the triggers actions run under.

use std::fmt::Debug;
use std::hash::Hash;

/// An event delivered to an interpreter.
///
/// Events form a closed set of variants, each carrying its own payload.
/// Transitions are keyed by the event's [`Kind`](Event::Kind), its payload-free
/// discriminant.
///
/// # Example
///
/// ```rust
/// use session_machine::core::Event;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum DoorEvent {
///     Push { force: u32 },
///     Lock,
/// }
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum DoorEventKind {
///     Push,
///     Lock,
/// }
///
/// impl Event for DoorEvent {
///     type Kind = DoorEventKind;
///
///     fn kind(&self) -> DoorEventKind {
///         match self {
///             Self::Push { .. } => DoorEventKind::Push,
///             Self::Lock => DoorEventKind::Lock,
///         }
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Push { .. } => "PUSH",
///             Self::Lock => "LOCK",
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Push { force: 3 }.kind(), DoorEventKind::Push);
/// ```
pub trait Event: Clone + Debug + Send + Sync {
    /// Payload-free discriminant used to look up transitions.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync;

    fn kind(&self) -> Self::Kind;

    /// Name used in logs and observer output.
    fn name(&self) -> &str;
}

/// What caused an action to run.
#[derive(Debug, PartialEq)]
pub enum Trigger<'a, E> {
    /// Entry actions of the initial state, run by `start()`.
    Start,
    /// An event taken from the interpreter's queue.
    Event(&'a E),
}

impl<'a, E> Trigger<'a, E> {
    /// The event behind this trigger, if any.
    pub fn event(&self) -> Option<&'a E> {
        match self {
            Trigger::Start => None,
            Trigger::Event(event) => Some(event),
        }
    }
}

impl<E> Clone for Trigger<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Trigger<'_, E> {}
