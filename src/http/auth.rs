use base64::Engine as _;

/// `Authorization` header value for HTTP basic auth.
pub(crate) fn basic_auth_value(username: &str, password: Option<&str>) -> String {
    let token = format!("{}:{}", username, password.unwrap_or_default());
    let encoded = base64::engine::general_purpose::STANDARD.encode(token.as_bytes());
    format!("Basic {}", encoded)
}
