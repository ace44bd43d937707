mod app;
mod collection;
mod config;
mod http;
mod runner;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use collection::CollectionError;
pub use config::ConfigError;
pub use http::HttpError;
pub use runner::RunnerError;
pub use validation::ValidationError;
