use clap::Parser;

use crate::error::{AppError, AppResult};

use super::RunnerArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<RunnerArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RunnerArgs::try_parse_from(args).map_err(AppError::from)
}
