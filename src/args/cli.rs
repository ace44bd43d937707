use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::http::DEFAULT_MAX_RETRIES;

use super::parsers::{
    parse_backoff_arg, parse_bool_env, parse_duration_arg, parse_header, parse_variable,
};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run requests from a Postman collection against a Landslide REST API, with retries, timeouts and basic auth."
)]
pub struct RunnerArgs {
    /// Path to the Postman collection JSON file
    #[arg(long = "collection", short = 'c')]
    pub collection: PathBuf,

    /// Base URL joined onto relative request URLs (e.g. http://10.0.0.1:8080)
    #[arg(long = "base-url", short = 'b', env = "API_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for default basic auth
    #[arg(long = "username", env = "API_USERNAME")]
    pub username: Option<String>,

    /// Password for default basic auth
    #[arg(long = "password", env = "API_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify TLS certificates
    #[arg(long = "verify-ssl")]
    pub verify_ssl: bool,

    /// List request names in the collection (takes precedence over --run)
    #[arg(long = "list")]
    pub list: bool,

    /// Run the request with this name
    #[arg(long = "run", value_name = "NAME")]
    pub run: Option<String>,

    /// Request timeout (supports ms/s/m/h, bare numbers are seconds)
    #[arg(long = "timeout", default_value = "30", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Retries for connect/timeout errors and 429/5xx responses
    #[arg(long = "retries", default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: u32,

    /// Backoff factor between retries (supports ms/s/m/h)
    #[arg(long = "backoff", default_value = "300ms", value_parser = parse_backoff_arg)]
    pub backoff: Duration,

    /// Extra default headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Template variables in 'KEY=VALUE' format (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    pub vars: Vec<(String, String)>,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); LANDSLIDE_LOG/RUST_LOG override
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl RunnerArgs {
    /// Username and password, only when both are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}
