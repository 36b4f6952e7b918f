//! Action registries: the side effects of a machine.
//!
//! Definitions refer to actions by identifier only. A registry maps each
//! identifier to its behavior: a function of the current context and the
//! trigger that returns the next context. Registries for a closed action
//! enum match on it exhaustively, so forgetting an implementation fails to
//! compile.

mod sink;

pub use sink::{OutputSink, RecordingSink, TracingSink};

use crate::core::{Schema, Trigger};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Errors raised by an action while an event is processed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Action {action} failed: {reason}")]
    Failed { action: String, reason: String },
}

impl ActionError {
    pub fn failed(action: impl fmt::Debug, reason: impl Into<String>) -> Self {
        ActionError::Failed {
            action: format!("{action:?}"),
            reason: reason.into(),
        }
    }
}

/// Executes actions on behalf of an interpreter.
///
/// Actions get no access to the interpreter or its queue; they can only
/// read the trigger, transform the context and produce output.
pub trait ActionRegistry<M: Schema>: Send + Sync {
    /// Run `action`, returning the context the next action will see.
    fn run(
        &self,
        action: M::Action,
        context: M::Context,
        trigger: Trigger<'_, M::Event>,
    ) -> Result<M::Context, ActionError>;

    /// Whether this registry can run `action`.
    ///
    /// Checked once for every referenced action when a machine is created.
    fn implements(&self, _action: M::Action) -> bool {
        true
    }
}

/// Registry backed by a single dispatch function.
///
/// Built with [`from_fn`].
pub struct FnActions<M, F> {
    dispatch: F,
    _schema: PhantomData<fn() -> M>,
}

/// Wrap a dispatch function as an action registry.
///
/// # Example
///
/// ```rust
/// use session_machine::actions::{from_fn, ActionRegistry};
/// use session_machine::auth::{Auth, AuthAction, AuthContext};
/// use session_machine::core::Trigger;
///
/// let registry = from_fn::<Auth, _>(|action, context: AuthContext, _trigger| {
///     match action {
///         AuthAction::SayGoodbye => Ok(AuthContext { user: None }),
///         AuthAction::SayHello | AuthAction::SendTelemetry => Ok(context),
///     }
/// });
///
/// let context = AuthContext { user: Some("Ada".to_string()) };
/// let next = registry.run(AuthAction::SayGoodbye, context, Trigger::Start).unwrap();
/// assert_eq!(next.user, None);
/// ```
pub fn from_fn<M, F>(dispatch: F) -> FnActions<M, F>
where
    M: Schema,
    F: Fn(M::Action, M::Context, Trigger<'_, M::Event>) -> Result<M::Context, ActionError>
        + Send
        + Sync,
{
    FnActions {
        dispatch,
        _schema: PhantomData,
    }
}

impl<M, F> ActionRegistry<M> for FnActions<M, F>
where
    M: Schema,
    F: Fn(M::Action, M::Context, Trigger<'_, M::Event>) -> Result<M::Context, ActionError>
        + Send
        + Sync,
{
    fn run(
        &self,
        action: M::Action,
        context: M::Context,
        trigger: Trigger<'_, M::Event>,
    ) -> Result<M::Context, ActionError> {
        (self.dispatch)(action, context, trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, AuthAction, AuthContext, AuthEvent};

    #[test]
    fn fn_registry_dispatches() {
        let registry = from_fn::<Auth, _>(|action, context: AuthContext, trigger| {
            match (action, trigger.event()) {
                (AuthAction::SayHello, Some(AuthEvent::Login { user })) => Ok(AuthContext {
                    user: Some(user.clone()),
                }),
                (AuthAction::SendTelemetry, _) => Err(ActionError::failed(action, "offline")),
                _ => Ok(context),
            }
        });

        let login = AuthEvent::Login {
            user: "Ada".to_string(),
        };
        let next = registry
            .run(
                AuthAction::SayHello,
                AuthContext::default(),
                Trigger::Event(&login),
            )
            .unwrap();
        assert_eq!(next.user.as_deref(), Some("Ada"));

        let err = registry
            .run(
                AuthAction::SendTelemetry,
                AuthContext::default(),
                Trigger::Start,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Action SendTelemetry failed: offline");
    }

    #[test]
    fn registries_implement_everything_by_default() {
        let registry = from_fn::<Auth, _>(|_, context: AuthContext, _| Ok(context));
        assert!(registry.implements(AuthAction::SayGoodbye));
    }
}
