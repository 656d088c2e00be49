use std::process::ExitCode;

/// Exit status following linter conventions.
///
/// - `Success` (0): no errors found (warnings and hints alone do not fail)
/// - `Failure` (1): errors found
/// - `Error` (2): the run itself failed (bad config, missing stylesheet, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
