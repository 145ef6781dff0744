//! Host context for command-line runs.

use std::path::PathBuf;

use bktrigger_step::HostContext;

/// The shell session running `bktrigger trigger`.
///
/// Reports paused once the stop file exists, so a wrapper script can end
/// the wait without sending a signal.
pub struct CliHost {
    display_name: Option<String>,
    stop_file: Option<PathBuf>,
}

impl CliHost {
    pub fn new(display_name: Option<String>, stop_file: Option<PathBuf>) -> Self {
        Self {
            display_name,
            stop_file,
        }
    }
}

impl HostContext for CliHost {
    fn display_name(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        match std::env::var("USER") {
            Ok(user) => format!("bktrigger run by {}", user),
            Err(_) => "bktrigger".to_string(),
        }
    }

    fn is_paused(&self) -> bool {
        self.stop_file.as_ref().is_some_and(|path| path.exists())
    }
}
