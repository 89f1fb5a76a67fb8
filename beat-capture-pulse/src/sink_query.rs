//! Sink status queries backed by the PulseAudio command-line tools.
//!
//! `pacmd list-sinks` prints a block per sink with a `state: RUNNING` /
//! `state: SUSPENDED` / `state: IDLE` line; `pactl list sinks` prints the
//! same information as `State: RUNNING` and also works against PipeWire
//! through pipewire-pulse. Either way we keep only the state lines, in
//! enumeration order, and hand them to the resolver one at a time.
//!
//! Output is read as bytes and decoded lossily, since card and sink names
//! are not guaranteed to be UTF-8. The tools run with `LC_ALL=C` so the
//! state labels are never translated.

use std::io::{self, BufRead, BufReader, Split};
use std::process::{Child, ChildStdout, Command, Stdio};

use beat_capture_core::models::error::CaptureError;
use beat_capture_core::traits::sink_query::SinkStatusQuery;

/// Keeps the lines of the command's output that describe a sink's state.
pub type LineFilter = fn(&str) -> bool;

fn pacmd_state_line(line: &str) -> bool {
    line.contains("state:")
}

fn pactl_state_line(line: &str) -> bool {
    line.trim_start().starts_with("State:")
}

/// Runs an enumeration command and yields its sink state lines.
#[derive(Clone)]
pub struct CommandSinkQuery {
    program: String,
    args: Vec<String>,
    filter: LineFilter,
}

impl CommandSinkQuery {
    /// `pacmd list-sinks`, keeping `state:` lines.
    pub fn pacmd() -> Self {
        Self::new("pacmd", &["list-sinks"], pacmd_state_line)
    }

    /// `pactl list sinks`, keeping `State:` lines.
    pub fn pactl() -> Self {
        Self::new("pactl", &["list", "sinks"], pactl_state_line)
    }

    pub fn new(program: &str, args: &[&str], filter: LineFilter) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            filter,
        }
    }
}

impl Default for CommandSinkQuery {
    fn default() -> Self {
        Self::pacmd()
    }
}

impl SinkStatusQuery for CommandSinkQuery {
    type Lines = ProcessLines;

    fn query(&mut self) -> Result<ProcessLines, CaptureError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CaptureError::DeviceQuery(format!("failed to run {}: {}", self.program, e)))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CaptureError::DeviceQuery(format!("{} has no stdout", self.program))
        })?;

        log::debug!("listing sinks with {} {}", self.program, self.args.join(" "));

        Ok(ProcessLines {
            program: self.program.clone(),
            child,
            lines: BufReader::new(stdout).split(b'\n'),
            filter: self.filter,
            finished: false,
        })
    }
}

/// Filtered stdout lines of a running query process.
///
/// After the last line the exit status is checked; a failing command yields
/// one final error. Dropping it early kills and reaps the process.
pub struct ProcessLines {
    program: String,
    child: Child,
    lines: Split<BufReader<ChildStdout>>,
    filter: LineFilter,
    finished: bool,
}

impl Iterator for ProcessLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            match line {
                Ok(bytes) => {
                    let decoded = String::from_utf8_lossy(&bytes);
                    let line = decoded.strip_suffix('\r').unwrap_or(&decoded);
                    if (self.filter)(line) {
                        return Some(Ok(line.to_string()));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        self.finished = true;
        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(Err(io::Error::other(format!(
                "{} exited with {}",
                self.program, status
            )))),
            Err(e) => Some(Err(e)),
        }
    }
}

impl Drop for ProcessLines {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
