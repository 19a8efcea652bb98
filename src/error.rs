use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runs array must not be empty")]
    EmptyBatch,
    #[error("repetitions must be at least 1")]
    ZeroRepetitions,
    #[error("invalid {kernel} parameters: {reason}")]
    InvalidParameters {
        kernel: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to parse run configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
