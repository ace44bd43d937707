use tracing::error;

use landslide_rest::collection::Collection;
use landslide_rest::error::AppResult;
use landslide_rest::http::ApiClient;
use landslide_rest::landslide::LandslideClient;
use landslide_rest::output::{NO_ACTION_HINT, render_login, render_response};
use landslide_rest::runner::Runner;

use super::types::{Action, RunPlan};

pub(in crate::entry) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let collection = Collection::load(&plan.collection).inspect_err(|err| {
        error!("Failed to load collection: {}", err);
    })?;

    let client = ApiClient::new(plan.client)?;
    let runner = Runner::new(&client, collection).with_variables(plan.vars);

    match plan.action {
        Action::List => {
            for name in runner.list() {
                println!("{}", name);
            }
        }
        Action::Run(name) => {
            let response = runner.run_by_name(&name).await?;
            println!("{}", render_response(&response));
        }
        Action::Login { username, password } => {
            let response = LandslideClient::new(&client)
                .login(Some(&username), Some(&password))
                .await?;
            println!("{}", render_login(&response));
        }
        Action::Idle => println!("{}", NO_ACTION_HINT),
    }
    Ok(())
}
