use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failures of an odds computation. An empty match history is not an error;
/// it is reported as `Ok(None)` by the engine.
#[derive(Error, Debug)]
pub enum OddsError {
    #[error("Failed to fetch match data: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid margin distribution: {0}")]
    Distribution(String),

    #[error("Non-finite value computed for {0}")]
    NonFinite(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed final score '{score}': leading margin token is not a positive integer")]
pub struct MarginParseError {
    pub score: String,
}
