//! Session Machine: a run-to-completion finite state machine interpreter
//!
//! A machine is a flat graph of named states. Events drive transitions
//! between them, a context value is carried across transitions, and named
//! actions run as side effects of a transition or of entering a state.
//!
//! # Core Concepts
//!
//! - **Definition**: immutable state graph, validated once when built
//! - **Actions**: a registry mapping a closed set of action ids to behavior
//! - **Machine**: a definition bound to its actions, shareable between sessions
//! - **Interpreter**: one running session, processing queued events one at a time
//! - **Observers**: callbacks notified when an event arrives and once it is handled
//!
//! # Example
//!
//! ```rust
//! use session_machine::actions::RecordingSink;
//! use session_machine::auth::{auth_machine, AuthEvent, AuthState};
//! use session_machine::core::State;
//! use std::sync::{Arc, Mutex};
//!
//! let sink = RecordingSink::new();
//! let machine = auth_machine(sink.clone()).unwrap();
//! let mut service = machine.interpret();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! service.on_transition(move |snapshot| {
//!     log.lock().unwrap().push(snapshot.state.name().to_string());
//! });
//!
//! service.start().unwrap();
//! service.send(AuthEvent::login("Jason")).unwrap();
//! service.send(AuthEvent::Logout).unwrap();
//!
//! assert_eq!(service.state(), &AuthState::LoggedOut);
//! assert_eq!(*seen.lock().unwrap(), vec!["Uninitialized", "LoggedIn", "LoggedOut"]);
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "TELEMETRY: User Jason logging in from Seattle, WA",
//!         "Hello, Jason!",
//!         "Goodbye, Jason",
//!     ]
//! );
//! ```

pub mod actions;
pub mod auth;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod definition;
pub mod interpreter;
pub mod machine;

// Re-export commonly used types
pub use actions::{ActionError, ActionRegistry, OutputSink};
pub use builder::MachineBuilder;
pub use core::{Event, Schema, Snapshot, State, Trigger};
pub use definition::{DefinitionError, MachineDefinition};
pub use interpreter::{Interpreter, InterpreterError, InterpreterOptions, Status};
pub use machine::{create_machine, interpret, Machine};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the given default level.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
