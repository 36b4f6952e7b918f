//! Authentication session lifecycle.
//!
//! Three states: a session starts `Uninitialized`, moves to `LoggedIn` on
//! `LOGIN`, to `LoggedOut` on `LOGOUT`, and back to `LoggedIn` on the next
//! `LOGIN`. A `LOGIN` while already logged in is ignored.

use crate::actions::{ActionError, ActionRegistry, OutputSink};
use crate::builder::MachineBuilder;
use crate::core::{Event, Schema, Trigger};
use crate::definition::{DefinitionError, MachineDefinition};
use crate::machine::Machine;
use crate::state_enum;
use serde::{Deserialize, Serialize};

state_enum! {
    pub enum AuthState {
        Uninitialized,
        LoggedIn,
        LoggedOut,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEvent {
    Login { user: String },
    Logout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthEventKind {
    Login,
    Logout,
}

impl AuthEvent {
    pub fn login(user: impl Into<String>) -> Self {
        AuthEvent::Login { user: user.into() }
    }
}

impl Event for AuthEvent {
    type Kind = AuthEventKind;

    fn kind(&self) -> AuthEventKind {
        match self {
            AuthEvent::Login { .. } => AuthEventKind::Login,
            AuthEvent::Logout => AuthEventKind::Logout,
        }
    }

    fn name(&self) -> &str {
        match self {
            AuthEvent::Login { .. } => "LOGIN",
            AuthEvent::Logout => "LOGOUT",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthAction {
    /// Report a login attempt. Leaves the context alone.
    SendTelemetry,
    /// Remember the user logging in and greet them.
    SayHello,
    /// Bid the current user farewell. Leaves the context alone.
    SayGoodbye,
}

/// Schema marker for the authentication machine.
pub struct Auth;

impl Schema for Auth {
    type State = AuthState;
    type Event = AuthEvent;
    type Context = AuthContext;
    type Action = AuthAction;
}

/// Implementations of [`AuthAction`], writing their output to `sink`.
pub struct AuthActions<O> {
    sink: O,
}

impl<O: OutputSink> AuthActions<O> {
    pub fn new(sink: O) -> Self {
        Self { sink }
    }
}

fn user_name(user: Option<&str>) -> &str {
    user.unwrap_or("undefined")
}

impl<O: OutputSink> ActionRegistry<Auth> for AuthActions<O> {
    fn run(
        &self,
        action: AuthAction,
        context: AuthContext,
        trigger: Trigger<'_, AuthEvent>,
    ) -> Result<AuthContext, ActionError> {
        let login_user = match trigger.event() {
            Some(AuthEvent::Login { user }) => Some(user.as_str()),
            _ => None,
        };

        match action {
            AuthAction::SendTelemetry => {
                self.sink.emit(&format!(
                    "TELEMETRY: User {} logging in from Seattle, WA",
                    user_name(login_user)
                ));
                Ok(context)
            }
            AuthAction::SayHello => {
                let context = AuthContext {
                    user: login_user.map(str::to_string),
                };
                self.sink
                    .emit(&format!("Hello, {}!", user_name(context.user.as_deref())));
                Ok(context)
            }
            AuthAction::SayGoodbye => {
                self.sink
                    .emit(&format!("Goodbye, {}", user_name(context.user.as_deref())));
                Ok(context)
            }
        }
    }
}

/// The authentication state graph.
pub fn auth_definition() -> Result<MachineDefinition<Auth>, DefinitionError> {
    MachineBuilder::new("auth")
        .initial(AuthState::Uninitialized)
        .state(AuthState::Uninitialized, |s| {
            s.on_with(
                AuthEventKind::Login,
                AuthState::LoggedIn,
                [AuthAction::SendTelemetry],
            )
        })
        .state(AuthState::LoggedIn, |s| {
            s.entry(AuthAction::SayHello)
                .on(AuthEventKind::Logout, AuthState::LoggedOut)
        })
        .state(AuthState::LoggedOut, |s| {
            s.entry(AuthAction::SayGoodbye).on_with(
                AuthEventKind::Login,
                AuthState::LoggedIn,
                [AuthAction::SendTelemetry],
            )
        })
        .build()
}

/// The authentication machine with its actions writing to `sink`.
pub fn auth_machine<O>(sink: O) -> Result<Machine<Auth>, DefinitionError>
where
    O: OutputSink + 'static,
{
    Machine::new(auth_definition()?, AuthActions::new(sink))
}
