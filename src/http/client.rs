use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Url};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::collection::{RequestItem, has_empty_authority, join_url};
use crate::error::{AppError, AppResult, HttpError};

use super::auth::basic_auth_value;
use super::body::{BodyPayload, EncodedBody, build_multipart, encode_body};
use super::config::ClientConfig;
use super::response::ApiResponse;
use super::retry::RetryPolicy;

pub const USER_AGENT: &str = concat!("landslide-rest/", env!("CARGO_PKG_VERSION"));

/// HTTP client that executes collection requests with the configured base
/// URL, default headers, default auth and retry policy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Builds the underlying connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error when a default header is invalid or the TLS backend
    /// cannot be initialised.
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            insert_header(&mut default_headers, key, value)?;
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        if !config.verify_ssl {
            debug!("TLS certificate verification disabled");
        }

        Ok(Self {
            client,
            config,
            default_headers,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Final URL for `item`: its resolved URL joined onto the base URL.
    #[must_use]
    pub fn prepare_url(&self, item: &RequestItem) -> String {
        join_url(self.config.base_url.as_deref(), &item.url.resolve())
    }

    /// Sends `item` with the client's default timeout.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_with_timeout`].
    pub async fn send(&self, item: &RequestItem) -> AppResult<ApiResponse> {
        self.send_with_timeout(item, None).await
    }

    /// Sends `item`, retrying retryable statuses and connect/timeout failures
    /// while the retry budget lasts. An exhausted retryable status yields the
    /// last response.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL, method or headers are invalid, a form
    /// file cannot be read, or the transport fails for good.
    pub async fn send_with_timeout(
        &self,
        item: &RequestItem,
        timeout: Option<Duration>,
    ) -> AppResult<ApiResponse> {
        let url_text = self.prepare_url(item);
        // `Url::parse` would read the first path segment as the host.
        if has_empty_authority(&url_text) {
            return Err(AppError::http(HttpError::InvalidUrl {
                url: url_text,
                source: url::ParseError::EmptyHost,
            }));
        }
        let url = Url::parse(&url_text).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: url_text.clone(),
                source: err,
            })
        })?;
        let method = Method::from_bytes(item.method.as_bytes()).map_err(|_err| {
            AppError::http(HttpError::InvalidMethod {
                method: item.method.clone(),
            })
        })?;

        let encoded = encode_body(item.body.as_ref());
        let headers = self.merge_headers(item, &encoded)?;
        let timeout = timeout.unwrap_or(self.config.timeout);
        let policy = self.config.retry;

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            let request = self.build_request(&method, &url, &headers, &encoded.payload, timeout)?;
            debug!(
                "{} {} attempt {}/{}",
                method,
                url_text,
                attempt,
                policy.max_attempts()
            );

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    if RetryPolicy::should_retry_status(status) && attempt < policy.max_attempts() {
                        let delay = policy.backoff_for_response(attempt, status, response.headers());
                        warn!(
                            "{} {} returned {}; retrying in {:?}",
                            method, url_text, status, delay
                        );
                        drop(response);
                        sleep(delay).await;
                        continue;
                    }
                    info!("{} {} -> {}", method, url_text, status.as_u16());
                    return read_response(response, &url_text).await;
                }
                Err(err) => {
                    if RetryPolicy::should_retry_error(&err) && attempt < policy.max_attempts() {
                        let delay = policy.backoff(attempt);
                        warn!(
                            "{} {} failed: {}; retrying in {:?}",
                            method, url_text, err, delay
                        );
                        sleep(delay).await;
                        continue;
                    }
                    warn!("{} {} failed after {} attempt(s)", method, url_text, attempt);
                    return Err(AppError::http(HttpError::RequestFailed {
                        url: url_text,
                        attempts: attempt,
                        source: err,
                    }));
                }
            }
        }
    }

    /// Default headers, then body-implied headers, then request headers, then
    /// the effective basic auth.
    fn merge_headers(&self, item: &RequestItem, encoded: &EncodedBody) -> AppResult<HeaderMap> {
        let mut headers = self.default_headers.clone();
        for (key, value) in &encoded.headers {
            insert_header(&mut headers, key, value)?;
        }
        for (key, value) in &item.headers {
            insert_header(&mut headers, key, value)?;
        }
        if encoded.is_multipart() {
            headers.remove(CONTENT_TYPE);
        }

        let credentials = item.basic_credentials().or_else(|| {
            self.config
                .default_auth
                .as_ref()
                .map(|auth| (auth.username.as_str(), auth.password.as_deref()))
        });
        if let Some((username, password)) = credentials {
            insert_header(
                &mut headers,
                AUTHORIZATION.as_str(),
                &basic_auth_value(username, password),
            )?;
        }
        Ok(headers)
    }

    fn build_request(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        payload: &BodyPayload,
        timeout: Duration,
    ) -> AppResult<Request> {
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .timeout(timeout);

        builder = match payload {
            BodyPayload::Empty => builder,
            BodyPayload::Json(text) | BodyPayload::Text(text) => builder.body(text.clone()),
            BodyPayload::Multipart(fields) => builder.multipart(build_multipart(fields)?),
            BodyPayload::UrlEncoded(pairs) => builder.form(pairs),
        };

        // Applied after the body so explicit headers replace the encoder's
        // own Content-Type.
        builder
            .headers(headers.clone())
            .build()
            .map_err(|err| {
                AppError::http(HttpError::RequestFailed {
                    url: url.to_string(),
                    attempts: 0,
                    source: err,
                })
            })
    }
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> AppResult<()> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_err| {
        AppError::http(HttpError::InvalidHeaderName {
            name: key.to_owned(),
        })
    })?;
    let value = HeaderValue::from_str(value).map_err(|_err| {
        AppError::http(HttpError::InvalidHeaderValue {
            name: key.to_owned(),
        })
    })?;
    headers.insert(name, value);
    Ok(())
}

async fn read_response(response: reqwest::Response, url: &str) -> AppResult<ApiResponse> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(|err| {
        AppError::http(HttpError::ReadBody {
            url: url.to_owned(),
            source: err,
        })
    })?;
    Ok(ApiResponse {
        status,
        headers,
        body,
    })
}
