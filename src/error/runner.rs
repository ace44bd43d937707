use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Request named '{name}' not found in collection.")]
    RequestNotFound { name: String },
}
