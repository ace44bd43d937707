use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_value;
use crate::error::ValidationError;

/// Settings read from `landslide.toml` / `landslide.json`. Every field is
/// optional; values given on the command line or through the environment
/// take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<DurationValue>,
    pub retries: Option<u32>,
    pub backoff: Option<DurationValue>,
    pub verify_ssl: Option<bool>,
    pub headers: Option<Vec<String>>,
    pub vars: Option<BTreeMap<String, String>>,
}

/// A duration given either as whole seconds or as a string with a unit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, allow_zero: bool) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 && !allow_zero {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text, allow_zero),
        }
    }
}
