use std::path::PathBuf;

/// Error taxonomy for scheduling runs.
///
/// Configuration and environment errors abort before any scheduling step;
/// `LaunchFailure` is reported per job and never halts the sequence.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cannot prepare directory '{path}': {source}")]
    EnvironmentUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Plot executable '{0}' not found in PATH or at the configured location")]
    ExecutableNotFound(String),

    #[error("Plot job '{job}' exited with code {exit_code}")]
    LaunchFailure { job: String, exit_code: i32 },

    #[error("Scheduling run interrupted before completion")]
    Interrupted,
}

impl PlotError {
    /// Shorthand for the most common rejection path.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
