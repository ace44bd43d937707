//! URL resolution for collection requests.
//!
//! A Postman URL is either a raw string or a set of decomposed parts. A
//! non-empty `raw` always wins and is returned verbatim; otherwise the URL is
//! composed from protocol, host, port, path and query parts.
use url::Url;

const DEFAULT_SCHEME: &str = "http";

/// One query parameter of a decomposed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: Option<String>,
    pub disabled: bool,
}

/// A raw URL string or its decomposed parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSpec {
    pub raw: Option<String>,
    pub protocol: Option<String>,
    pub host: Vec<String>,
    pub port: Option<String>,
    pub path: Vec<String>,
    pub query: Vec<QueryParam>,
}

impl UrlSpec {
    /// A spec carrying only a raw URL (absolute, or a path relative to the
    /// client's base URL).
    #[must_use]
    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Produces the URL string for this spec. Never fails; an empty host
    /// list yields a URL with an empty host.
    #[must_use]
    pub fn resolve(&self) -> String {
        if let Some(raw) = self.raw.as_deref()
            && !raw.is_empty()
        {
            return raw.to_owned();
        }

        let scheme = self
            .protocol
            .as_deref()
            .filter(|protocol| !protocol.is_empty())
            .unwrap_or(DEFAULT_SCHEME);

        let path = format!("/{}", self.path.join("/")).replace("//", "/");
        let mut url = format!("{}://{}{}", scheme, self.authority(), path);

        let query = self.query_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    fn authority(&self) -> String {
        // Numeric segments are an IPv4 address; they take the same dotted
        // join as a hostname.
        let host = if !self.host.is_empty()
            && self
                .host
                .iter()
                .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
        {
            self.host.join(".")
        } else {
            self.host
                .iter()
                .filter(|segment| !segment.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(".")
        };

        match self.port.as_deref() {
            Some(port) if !port.is_empty() => format!("{}:{}", host, port),
            Some(_) | None => host,
        }
    }

    fn query_string(&self) -> String {
        self.query
            .iter()
            .filter(|param| !param.disabled && !param.key.is_empty())
            .map(|param| match param.value.as_deref() {
                Some(value) => format!("{}={}", param.key, value),
                None => param.key.clone(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The text after `scheme://` when the authority is empty, as in the
/// `http:///api/login` produced by a parts URL without host.
fn empty_authority_rest(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (is_scheme && (rest.is_empty() || rest.starts_with('/'))).then_some(rest)
}

/// True when `url` has a scheme but an empty authority.
#[must_use]
pub fn has_empty_authority(url: &str) -> bool {
    empty_authority_rest(url).is_some()
}

/// True when `url` carries its own scheme and host and must not be joined
/// onto a base URL.
#[must_use]
pub fn is_absolute(url: &str) -> bool {
    !has_empty_authority(url) && Url::parse(url).is_ok_and(|parsed| parsed.has_host())
}

/// Joins a resolved request URL onto an optional base URL.
///
/// Absolute URLs are returned unchanged. Anything else is treated as a path
/// and appended to the base with exactly one `/` at the join point. A URL
/// with an empty authority contributes only its path.
#[must_use]
pub fn join_url(base: Option<&str>, resolved: &str) -> String {
    match base {
        Some(base) if !base.is_empty() && !is_absolute(resolved) => {
            let path = empty_authority_rest(resolved).unwrap_or(resolved);
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
        Some(_) | None => resolved.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landslide_parts() -> UrlSpec {
        UrlSpec {
            raw: None,
            protocol: Some("http".to_owned()),
            host: vec![
                "10".to_owned(),
                "59".to_owned(),
                "224".to_owned(),
                "101".to_owned(),
            ],
            port: Some("8080".to_owned()),
            path: vec!["api".to_owned(), "login".to_owned()],
            query: Vec::new(),
        }
    }

    #[test]
    fn raw_takes_precedence_over_parts() -> Result<(), String> {
        let mut spec = landslide_parts();
        spec.raw = Some("https://example.com/raw?x=1".to_owned());
        let resolved = spec.resolve();
        if resolved != "https://example.com/raw?x=1" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn raw_is_not_normalized() -> Result<(), String> {
        let spec = UrlSpec::raw("  /api//login ");
        if spec.resolve() != "  /api//login " {
            return Err(format!("Unexpected url: {}", spec.resolve()));
        }
        Ok(())
    }

    #[test]
    fn composes_numeric_host_with_port_and_path() -> Result<(), String> {
        let resolved = landslide_parts().resolve();
        if resolved != "http://10.59.224.101:8080/api/login" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn empty_raw_falls_back_to_parts() -> Result<(), String> {
        let mut spec = landslide_parts();
        spec.raw = Some(String::new());
        let resolved = spec.resolve();
        if resolved != "http://10.59.224.101:8080/api/login" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn defaults_scheme_and_omits_missing_port() -> Result<(), String> {
        let spec = UrlSpec {
            host: vec!["api".to_owned(), "example".to_owned(), "com".to_owned()],
            path: vec!["v1".to_owned(), "items".to_owned()],
            ..UrlSpec::default()
        };
        let resolved = spec.resolve();
        if resolved != "http://api.example.com/v1/items" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn empty_host_does_not_fail() -> Result<(), String> {
        let spec = UrlSpec {
            path: vec!["api".to_owned()],
            ..UrlSpec::default()
        };
        let resolved = spec.resolve();
        if resolved != "http:///api" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn appends_enabled_query_params() -> Result<(), String> {
        let spec = UrlSpec {
            protocol: Some("https".to_owned()),
            host: vec!["example".to_owned(), "com".to_owned()],
            path: vec!["search".to_owned()],
            query: vec![
                QueryParam {
                    key: "q".to_owned(),
                    value: Some("rust".to_owned()),
                    disabled: false,
                },
                QueryParam {
                    key: "debug".to_owned(),
                    value: Some("1".to_owned()),
                    disabled: true,
                },
                QueryParam {
                    key: "flag".to_owned(),
                    value: None,
                    disabled: false,
                },
            ],
            ..UrlSpec::default()
        };
        let resolved = spec.resolve();
        if resolved != "https://example.com/search?q=rust&flag" {
            return Err(format!("Unexpected url: {}", resolved));
        }
        Ok(())
    }

    #[test]
    fn resolve_is_idempotent() -> Result<(), String> {
        let spec = landslide_parts();
        if spec.resolve() != spec.resolve() {
            return Err("Expected identical resolutions".to_owned());
        }
        Ok(())
    }

    #[test]
    fn join_keeps_absolute_urls() -> Result<(), String> {
        let joined = join_url(Some("http://base:8080"), "https://other.example/api");
        if joined != "https://other.example/api" {
            return Err(format!("Unexpected url: {}", joined));
        }
        Ok(())
    }

    #[test]
    fn join_places_single_separator() -> Result<(), String> {
        for (base, path) in [
            ("http://base:8080", "/api/login"),
            ("http://base:8080/", "/api/login"),
            ("http://base:8080/", "api/login"),
            ("http://base:8080", "api/login"),
        ] {
            let joined = join_url(Some(base), path);
            if joined != "http://base:8080/api/login" {
                return Err(format!("Unexpected join of {} + {}: {}", base, path, joined));
            }
        }
        Ok(())
    }

    #[test]
    fn join_keeps_base_path_prefix() -> Result<(), String> {
        let joined = join_url(Some("http://base/v1/"), "/items?x=1");
        if joined != "http://base/v1/items?x=1" {
            return Err(format!("Unexpected url: {}", joined));
        }
        Ok(())
    }

    #[test]
    fn join_treats_schemeless_host_as_path() -> Result<(), String> {
        let joined = join_url(Some("http://base"), "localhost:8080/api");
        if joined != "http://base/localhost:8080/api" {
            return Err(format!("Unexpected url: {}", joined));
        }
        Ok(())
    }

    #[test]
    fn join_without_base_returns_input() -> Result<(), String> {
        if join_url(None, "/api/login") != "/api/login" {
            return Err("Expected unchanged url without base".to_owned());
        }
        Ok(())
    }

    #[test]
    fn empty_host_joins_onto_base_url() -> Result<(), String> {
        let spec = UrlSpec {
            path: vec!["api".to_owned(), "login".to_owned()],
            ..UrlSpec::default()
        };
        let resolved = spec.resolve();
        if is_absolute(&resolved) || !has_empty_authority(&resolved) {
            return Err(format!("Expected relative url: {}", resolved));
        }
        let joined = join_url(Some("http://10.0.0.1:8080"), &resolved);
        if joined != "http://10.0.0.1:8080/api/login" {
            return Err(format!("Unexpected url: {}", joined));
        }
        Ok(())
    }

    #[test]
    fn empty_authority_needs_a_scheme() -> Result<(), String> {
        if has_empty_authority("/api?next=x:///y") || has_empty_authority("/api/login") {
            return Err("Expected paths to keep their authority check".to_owned());
        }
        if !is_absolute("http://10.0.0.1:8080/api") {
            return Err("Expected absolute url".to_owned());
        }
        Ok(())
    }
}
