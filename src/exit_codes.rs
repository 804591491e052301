//! Exit codes for the odcli application
//!
//! Scripts only need to tell success from failure, so the client reports
//! exactly two codes.

/// Exit codes for odcli
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Failure (1) - Missing credentials, login failure or a failed operation
    Failure = 1,
}

impl OdExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            OdExitCode::Success => "Action completed successfully",
            OdExitCode::Failure => "Action completed with errors",
        }
    }
}

impl From<OdExitCode> for i32 {
    fn from(code: OdExitCode) -> Self {
        code.code()
    }
}
