use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{RunnerArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line or through the environment.
///
/// # Errors
///
/// Returns an error when a config header or duration is invalid.
pub fn apply_config(
    args: &mut RunnerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "base_url")
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = Some(base_url);
    }

    if !is_explicit(matches, "username")
        && let Some(username) = config.username.clone()
    {
        args.username = Some(username);
    }

    if !is_explicit(matches, "password")
        && let Some(password) = config.password.clone()
    {
        args.password = Some(password);
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration(false).map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "timeout",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "retries")
        && let Some(retries) = config.retries
    {
        args.retries = retries;
    }

    if !is_explicit(matches, "backoff")
        && let Some(backoff) = config.backoff.as_ref()
    {
        args.backoff = backoff.to_duration(true).map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "backoff",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "verify_ssl")
        && let Some(verify_ssl) = config.verify_ssl
    {
        args.verify_ssl = verify_ssl;
    }

    if !is_explicit(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    // Config variables sit under CLI ones; later `--var` entries win.
    if let Some(vars) = config.vars.as_ref() {
        let mut merged: Vec<(String, String)> = vars
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        merged.append(&mut args.vars);
        args.vars = merged;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
