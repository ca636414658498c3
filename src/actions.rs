use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    fmt,
    io::{self, Write},
    process::{Command, Stdio},
    thread,
};

use crate::gestures::Gesture;

/// What a profile binding asks for when its gesture fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Attach a token (e.g. a shape name) to the emitted event line.
    Emit(String),
    /// Run a shell command; requires `allow_commands`.
    Command(String),
    None,
}

impl Action {
    pub fn parse(s: &str) -> Result<Action> {
        let s = s.trim();
        if s.is_empty() || s == "none" {
            return Ok(Action::None);
        }
        if let Some(rest) = s.strip_prefix("emit:") {
            let token = rest.trim();
            if token.is_empty() {
                return Err(anyhow!("emit: needs a token"));
            }
            return Ok(Action::Emit(token.to_string()));
        }
        if let Some(rest) = s.strip_prefix("cmd:") {
            let cmd = rest.trim();
            if cmd.is_empty() {
                return Err(anyhow!("cmd: needs a command"));
            }
            return Ok(Action::Command(cmd.to_string()));
        }
        Err(anyhow!("invalid action '{s}'"))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Emit(t) => write!(f, "emit:{t}"),
            Action::Command(c) => write!(f, "cmd:{c}"),
            Action::None => f.write_str("none"),
        }
    }
}

/// One line of output for the event consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub t: f64,
    pub gesture: Gesture,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Hands emitted gestures to whoever consumes them: JSON lines on a writer,
/// plus optional commands.
pub struct EventSink {
    allow_commands: bool,
    out: Box<dyn Write + Send>,
}

impl EventSink {
    pub fn new(out: Box<dyn Write + Send>, allow_commands: bool) -> Self {
        Self {
            allow_commands,
            out,
        }
    }

    pub fn stdout(allow_commands: bool) -> Self {
        Self::new(Box::new(io::stdout()), allow_commands)
    }

    pub fn noop() -> Self {
        Self::new(Box::new(io::sink()), false)
    }

    pub fn emit(&mut self, rec: &EventRecord) -> Result<()> {
        serde_json::to_writer(&mut self.out, rec)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// Spawn `cmd` through `sh -c`. A waiter thread reaps the child so the
    /// caller never blocks on it.
    pub fn run_command(&mut self, cmd: &str) -> Result<()> {
        if !self.allow_commands {
            warn!("refusing to run '{cmd}': allow_commands=false");
            return Ok(());
        }
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| anyhow!("failed to spawn '{cmd}': {e}"))?;
        let pid = child.id();
        info!("spawned '{cmd}' (pid={pid})");

        let label = cmd.to_string();
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!("'{label}' (pid={pid}) exited with {status}"),
            Err(e) => warn!("failed to wait for '{label}' (pid={pid}): {e}"),
        });
        Ok(())
    }
}
