//! HTTP execution of collection requests.
mod auth;
mod body;
mod client;
mod config;
mod response;
mod retry;

pub use client::{ApiClient, USER_AGENT};
pub use config::{BasicCredentials, ClientConfig, DEFAULT_TIMEOUT};
pub use response::ApiResponse;
pub use retry::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_RETRIES, MAX_BACKOFF, RETRYABLE_STATUSES, RetryPolicy,
};
