use thiserror::Error;

use super::{CollectionError, ConfigError, HttpError, RunnerError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn collection<E>(error: E) -> Self
    where
        E: Into<CollectionError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn runner<E>(error: E) -> Self
    where
        E: Into<RunnerError>,
    {
        error.into().into()
    }

    /// True when a named request was missing from the collection.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Runner(RunnerError::RequestNotFound { .. }))
    }
}
