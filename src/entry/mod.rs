mod plan;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use landslide_rest::args::RunnerArgs;
use landslide_rest::error::AppResult;
use plan::{build_plan, execute_plan};

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<(RunnerArgs, ArgMatches)> {
    let matches = RunnerArgs::command().get_matches();
    let args = RunnerArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: RunnerArgs, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(args, matches)?;
    execute_plan(plan).await
}
