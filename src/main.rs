//! Scripted authentication session.
//!
//! Builds the authentication machine, logs every event and transition, and
//! replays a fixed login/logout script against it.

use clap::Parser;
use session_machine::auth::{auth_machine, AuthEvent};
use session_machine::{init_logging, Event, OutputSink, VERSION};

#[derive(Parser, Debug)]
#[command(name = "session-machine", version, about = "Replay a scripted authentication session")]
struct Cli {
    /// Default log level; RUST_LOG takes precedence
    #[arg(long, env = "SESSION_MACHINE_LOG", default_value = "warn")]
    log_level: String,

    /// Print the final checkpoint as JSON
    #[arg(long)]
    checkpoint: bool,
}

/// Action output goes straight to stdout.
struct Console;

impl OutputSink for Console {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(&args.log_level);
    tracing::debug!("session-machine v{}", VERSION);

    let machine = auth_machine(Console)?;
    let mut service = machine.interpret();
    service.on_transition(|snapshot| println!("[[{}]]", snapshot.state));
    service.on_event(|event| println!("<! {}", event.name()));

    service.start()?;
    service.send(AuthEvent::login("Jason"))?;
    service.send(AuthEvent::Logout)?;
    service.send(AuthEvent::login("Skylar"))?;
    // Already logged in: no telemetry and no greeting.
    service.send(AuthEvent::login("Ignoramus"))?;

    tracing::debug!(
        transitions = service.history().len(),
        elapsed = ?service.history().duration(),
        "script finished"
    );

    if args.checkpoint {
        println!("{}", service.checkpoint().to_json_pretty()?);
    }
    Ok(())
}
