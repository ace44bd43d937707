use clap::ArgMatches;
use tracing::debug;

use landslide_rest::args::RunnerArgs;
use landslide_rest::config::{apply_config, load_config};
use landslide_rest::error::AppResult;
use landslide_rest::http::{BasicCredentials, ClientConfig, RetryPolicy};

use super::types::{Action, RunPlan};

const DEFAULT_ACCEPT: (&str, &str) = ("Accept", "application/json");

pub(in crate::entry) fn build_plan(mut args: RunnerArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let mut client = ClientConfig::default()
        .with_timeout(args.timeout)
        .with_retry(RetryPolicy::new(args.retries, args.backoff))
        .with_verify_ssl(args.verify_ssl)
        .with_default_header(DEFAULT_ACCEPT.0, DEFAULT_ACCEPT.1);
    for (key, value) in &args.headers {
        client = client.with_default_header(key.clone(), value.clone());
    }
    if let Some(base_url) = args.base_url.as_deref().filter(|url| !url.is_empty()) {
        client = client.with_base_url(base_url);
    }

    let credentials = args
        .credentials()
        .map(|(username, password)| (username.to_owned(), password.to_owned()));
    if let Some((username, password)) = credentials.as_ref() {
        client = client.with_default_auth(BasicCredentials::new(username.clone(), password.clone()));
    }

    let action = if args.list {
        Action::List
    } else if let Some(name) = args.run.take() {
        Action::Run(name)
    } else if let Some((username, password)) = credentials {
        Action::Login { username, password }
    } else {
        Action::Idle
    };

    debug!(
        "Base URL: {}",
        client.base_url.as_deref().unwrap_or("<none>")
    );

    Ok(RunPlan {
        collection: args.collection,
        client,
        vars: args.vars,
        action,
    })
}
