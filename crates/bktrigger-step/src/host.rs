//! Interfaces to the environment running the step.

use std::io::Write;
use std::sync::Mutex;

/// The job that invokes the step.
pub trait HostContext: Send + Sync {
    /// Human-readable name of the invoking job, used in default messages.
    fn display_name(&self) -> String;

    /// True when the invoking job has been paused or stopped.
    ///
    /// Polled once per wait. Some hosts suspend a job without cancelling it,
    /// so this is checked in addition to the cancellation token.
    fn is_paused(&self) -> bool;
}

/// Ordered, append-only destination for progress lines.
///
/// Writing is best effort and never fails the step.
pub trait ProgressSink: Send + Sync {
    fn line(&self, line: &str);
}

/// Build message used when the request carries none.
pub fn provenance_message(display_name: &str) -> String {
    format!("Triggered by Jenkins build \"{}\"", display_name)
}

/// Progress sink over any writer, one line per call.
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ProgressSink for ConsoleSink<W> {
    fn line(&self, line: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}
