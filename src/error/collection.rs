use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Failed to read collection '{path}': {source}")]
    ReadCollection {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse collection '{path}': {source}")]
    ParseCollection {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
