//! Exit codes.

/// Exit codes for the SimDupe application.
///
/// - 0: Success (completed normally, including an empty catalog)
/// - 1: General error (missing argument, bad config)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the run completed.
    Success = 0,
    /// General error: the run could not start or failed.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "SD000",
            Self::GeneralError => "SD001",
        }
    }
}
