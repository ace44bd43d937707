use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AppError, AppResult, CollectionError};

use super::document::{RawCollection, RawItem};
use super::model::RequestItem;

/// Requests of one Postman collection, flattened in document order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<RequestItem>,
    by_name: HashMap<String, usize>,
    variables: BTreeMap<String, String>,
}

impl Collection {
    /// Builds a collection from already flattened requests. On duplicate
    /// names the last request wins the lookup.
    #[must_use]
    pub fn from_items(items: Vec<RequestItem>) -> Self {
        let by_name = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.name.clone(), idx))
            .collect();
        Self {
            items,
            by_name,
            variables: BTreeMap::new(),
        }
    }

    /// Loads a collection file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid
    /// collection document.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::collection(CollectionError::ReadCollection {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        let collection = Self::parse(&content).map_err(|err| {
            AppError::collection(CollectionError::ParseCollection {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        info!(
            "Loaded {} request(s) from {}",
            collection.items.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Parses a collection from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid collection document.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        Self::parse(content).map_err(|err| {
            AppError::collection(CollectionError::ParseCollection {
                path: "<inline>".into(),
                source: err,
            })
        })
    }

    fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let document: RawCollection = serde_json::from_str(content)?;

        let mut items = Vec::new();
        flatten_items(document.item.as_deref().unwrap_or_default(), &mut items);

        let mut collection = Self::from_items(items);
        collection.variables = document
            .variable
            .iter()
            .flatten()
            .filter_map(|variable| variable.to_pair())
            .collect();
        Ok(collection)
    }

    #[must_use]
    pub fn items(&self) -> &[RequestItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RequestItem> {
        self.by_name
            .get(name)
            .and_then(|idx| self.items.get(*idx))
    }

    /// Unique request names, in the order each name first appears.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .map(|item| item.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Collection-level `{{name}}` variables.
    #[must_use]
    pub const fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Depth-first, left-to-right walk appending request leaves to `out`.
fn flatten_items(items: &[RawItem], out: &mut Vec<RequestItem>) {
    for item in items {
        if let Some(children) = item.children() {
            flatten_items(children, out);
        } else if let Some(request) = item.to_request_item() {
            out.push(request);
        } else {
            debug!(
                "Skipping entry without request: {}",
                item.name.as_deref().unwrap_or_default()
            );
        }
    }
}
