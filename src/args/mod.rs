//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;

#[cfg(test)]
mod test_support;

pub use cli::RunnerArgs;

pub(crate) use parsers::{parse_duration_value, parse_header, parse_variable};
