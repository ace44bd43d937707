//! Typed shortcuts for common Landslide endpoints.
use crate::collection::{AuthSpec, RequestItem, UrlSpec};
use crate::error::AppResult;
use crate::http::{ApiClient, ApiResponse};

pub const LOGIN_PATH: &str = "/api/login";
pub const TEST_SERVERS_PATH: &str = "/api/testServers";
pub const RUNNING_TESTS_PATH: &str = "/api/runningTests";

const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

/// Landslide endpoint wrapper over a shared [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct LandslideClient<'client> {
    api: &'client ApiClient,
}

impl<'client> LandslideClient<'client> {
    #[must_use]
    pub const fn new(api: &'client ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/login`. Credentials given here are sent as per-request
    /// basic auth when both are present; otherwise the client's default
    /// auth applies.
    #[must_use]
    pub fn login_request(username: Option<&str>, password: Option<&str>) -> RequestItem {
        let item = RequestItem::new("LS Login request", "POST", UrlSpec::raw(LOGIN_PATH))
            .with_header(ACCEPT_JSON.0, ACCEPT_JSON.1);
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                item.with_auth(AuthSpec::basic(username, password))
            }
            _ => item,
        }
    }

    #[must_use]
    pub fn test_servers_request() -> RequestItem {
        RequestItem::new("testServers", "GET", UrlSpec::raw(TEST_SERVERS_PATH))
            .with_header(ACCEPT_JSON.0, ACCEPT_JSON.1)
    }

    #[must_use]
    pub fn running_tests_request() -> RequestItem {
        RequestItem::new("runningTests", "GET", UrlSpec::raw(RUNNING_TESTS_PATH))
            .with_header(ACCEPT_JSON.0, ACCEPT_JSON.1)
    }

    /// # Errors
    ///
    /// Returns the client's error when the call fails.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<ApiResponse> {
        self.api
            .send(&Self::login_request(username, password))
            .await
    }

    /// # Errors
    ///
    /// Returns the client's error when the call fails.
    pub async fn test_servers(&self) -> AppResult<ApiResponse> {
        self.api.send(&Self::test_servers_request()).await
    }

    /// # Errors
    ///
    /// Returns the client's error when the call fails.
    pub async fn running_tests(&self) -> AppResult<ApiResponse> {
        self.api.send(&Self::running_tests_request()).await
    }
}
