pub mod check;

use crate::issues::{Issue, Severity};

/// What a command produced, consumed by the reporter and the exit-code
/// mapping.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub issues: Vec<Issue>,
    pub files_checked: usize,
}

pub enum CommandSummary {
    Check,
    Init { created: bool },
}

impl CommandResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }
}
