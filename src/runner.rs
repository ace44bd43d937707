//! Name-based execution of collection requests.
use std::collections::BTreeMap;

use tracing::info;

use crate::collection::Collection;
use crate::error::{AppError, AppResult, RunnerError};
use crate::http::{ApiClient, ApiResponse};

/// Executes requests of a loaded collection by name.
#[derive(Debug)]
pub struct Runner<'client> {
    client: &'client ApiClient,
    collection: Collection,
    vars: BTreeMap<String, String>,
}

impl<'client> Runner<'client> {
    /// Creates a runner seeded with the collection's own variables.
    #[must_use]
    pub fn new(client: &'client ApiClient, collection: Collection) -> Self {
        let vars = collection.variables().clone();
        Self {
            client,
            collection,
            vars,
        }
    }

    /// Adds variable overrides; they replace collection variables of the
    /// same name.
    #[must_use]
    pub fn with_variables<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.vars.extend(overrides);
        self
    }

    /// Request names in load order, each listed once.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.collection.names()
    }

    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Renders and sends the request called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::RequestNotFound`] without touching the network
    /// when no request has that name, or the client's error when the call
    /// fails.
    pub async fn run_by_name(&self, name: &str) -> AppResult<ApiResponse> {
        let item = self.collection.get(name).ok_or_else(|| {
            AppError::runner(RunnerError::RequestNotFound {
                name: name.to_owned(),
            })
        })?;
        let rendered = item.render(&self.vars);
        info!("Running '{}' ({})", rendered.name, rendered.method);
        self.client.send(&rendered).await
    }
}
