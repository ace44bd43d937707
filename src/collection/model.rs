use std::collections::BTreeMap;

use super::url::UrlSpec;

pub(crate) const DEFAULT_REQUEST_NAME: &str = "Unnamed";
pub(crate) const DEFAULT_METHOD: &str = "GET";

/// Whether a form part carries an inline value or references local files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPartKind {
    #[default]
    Text,
    File,
}

/// One entry of a `formdata` or `urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPart {
    pub key: Option<String>,
    pub value: Option<String>,
    pub kind: FormPartKind,
    /// Local paths uploaded for `File` parts.
    pub src: Vec<String>,
    pub disabled: bool,
}

impl FormPart {
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            kind: FormPartKind::File,
            src: vec![path.into()],
            ..Self::default()
        }
    }
}

/// Declarative request body, tagged by Postman body mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Raw(String),
    FormData(Vec<FormPart>),
    UrlEncoded(Vec<FormPart>),
    /// A mode this client does not encode (`file`, `graphql`, ...). Sent as
    /// no body.
    Unsupported(String),
}

/// Authentication declared on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSpec {
    pub kind: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthSpec {
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: "basic".to_owned(),
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.kind.eq_ignore_ascii_case("basic")
    }
}

/// One named HTTP request definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestItem {
    pub name: String,
    pub method: String,
    pub url: UrlSpec,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
    pub auth: Option<AuthSpec>,
}

impl RequestItem {
    /// Creates a request with no headers, body or auth. The method is
    /// upper-cased.
    #[must_use]
    pub fn new(name: impl Into<String>, method: &str, url: UrlSpec) -> Self {
        Self {
            name: name.into(),
            method: method.to_ascii_uppercase(),
            url,
            headers: BTreeMap::new(),
            body: None,
            auth: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthSpec) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Basic credentials declared on this request, if any.
    #[must_use]
    pub fn basic_credentials(&self) -> Option<(&str, Option<&str>)> {
        let auth = self.auth.as_ref().filter(|auth| auth.is_basic())?;
        Some((
            auth.username.as_deref().unwrap_or_default(),
            auth.password.as_deref(),
        ))
    }
}
