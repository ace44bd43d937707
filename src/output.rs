//! Text rendering of responses for the command line.
use crate::http::ApiResponse;

pub const NO_ACTION_HINT: &str =
    "No action taken. Provide --run or set API_USERNAME/API_PASSWORD to try the login request.";

/// `HTTP <status>` followed by the body: pretty JSON when the response is
/// JSON and parses, raw text otherwise.
#[must_use]
pub fn render_response(response: &ApiResponse) -> String {
    format!("HTTP {}\n{}", response.status_code(), render_body(response))
}

/// `Login -> HTTP <status>` followed by the raw body text.
#[must_use]
pub fn render_login(response: &ApiResponse) -> String {
    format!("Login -> HTTP {}\n{}", response.status_code(), response.text())
}

fn render_body(response: &ApiResponse) -> String {
    if !response.is_json() {
        return response.text();
    }
    response
        .json()
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| response.text())
}
