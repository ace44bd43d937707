//! Serde mirror of the Postman Collection v2.1 document.
//!
//! Only the fields the runner uses are declared; everything else in the
//! document is ignored. Conversion into the request model applies the
//! loader's defaults and filters.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::model::{
    AuthSpec, DEFAULT_METHOD, DEFAULT_REQUEST_NAME, FormPart, FormPartKind, RequestBody,
    RequestItem,
};
use super::url::{QueryParam, UrlSpec};

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawCollection {
    pub(super) item: Option<Vec<RawItem>>,
    pub(super) variable: Option<Vec<RawVariable>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawItem {
    pub(super) name: Option<String>,
    pub(super) item: Option<Vec<RawItem>>,
    pub(super) request: Option<RawRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawRequest {
    Url(String),
    Full(Box<RawRequestObject>),
}

#[derive(Debug, Deserialize)]
pub(super) struct RawRequestObject {
    method: Option<String>,
    url: Option<RawUrl>,
    header: Option<Vec<RawHeader>>,
    body: Option<RawBody>,
    auth: Option<RawAuth>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUrl {
    Raw(String),
    Parts(RawUrlParts),
}

#[derive(Debug, Deserialize)]
struct RawUrlParts {
    raw: Option<String>,
    protocol: Option<String>,
    host: Option<StringOrList>,
    port: Option<Value>,
    path: Option<StringOrList>,
    query: Option<Vec<RawQueryParam>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawQueryParam {
    key: Option<String>,
    value: Option<String>,
    #[serde(default)]
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    key: Option<String>,
    value: Option<Value>,
    #[serde(default)]
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    mode: Option<String>,
    raw: Option<String>,
    formdata: Option<Vec<RawFormPart>>,
    urlencoded: Option<Vec<RawFormPart>>,
}

#[derive(Debug, Deserialize)]
struct RawFormPart {
    key: Option<String>,
    value: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<String>,
    src: Option<StringOrList>,
    #[serde(default)]
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct RawAuth {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(flatten)]
    params: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawVariable {
    key: Option<String>,
    value: Option<Value>,
    #[serde(default)]
    disabled: bool,
}

/// Strings pass through, other scalars are stringified, null is absent.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

impl RawItem {
    /// Folder entries carry a nested `item` list.
    pub(super) fn children(&self) -> Option<&[RawItem]> {
        self.item.as_deref()
    }

    /// Converts a request leaf; `None` when the entry has no `request`.
    pub(super) fn to_request_item(&self) -> Option<RequestItem> {
        let request = self.request.as_ref()?;
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_REQUEST_NAME.to_owned());
        let item = match request {
            RawRequest::Url(url) => RequestItem::new(name, DEFAULT_METHOD, UrlSpec::raw(url.clone())),
            RawRequest::Full(request) => request.to_request_item(name),
        };
        Some(item)
    }
}

impl RawRequestObject {
    fn to_request_item(&self, name: String) -> RequestItem {
        let method = self.method.as_deref().unwrap_or(DEFAULT_METHOD);
        let url = self.url.as_ref().map(RawUrl::to_spec).unwrap_or_default();

        let mut item = RequestItem::new(name, method, url);
        for header in self.header.iter().flatten() {
            if header.disabled {
                continue;
            }
            let Some(key) = header.key.as_deref().filter(|key| !key.is_empty()) else {
                continue;
            };
            let Some(value) = header.value.as_ref().and_then(value_to_string) else {
                continue;
            };
            item.headers.insert(key.to_owned(), value);
        }
        item.body = self.body.as_ref().and_then(RawBody::to_body);
        item.auth = self.auth.as_ref().map(RawAuth::to_spec);
        item
    }
}

impl RawUrl {
    fn to_spec(&self) -> UrlSpec {
        match self {
            RawUrl::Raw(raw) => UrlSpec::raw(raw.clone()),
            RawUrl::Parts(parts) => UrlSpec {
                raw: parts.raw.clone(),
                protocol: parts.protocol.clone(),
                host: parts
                    .host
                    .as_ref()
                    .map(StringOrList::clone_vec)
                    .unwrap_or_default(),
                port: parts.port.as_ref().and_then(value_to_string),
                path: parts
                    .path
                    .as_ref()
                    .map(StringOrList::clone_vec)
                    .unwrap_or_default(),
                query: parts
                    .query
                    .iter()
                    .flatten()
                    .filter_map(|param| {
                        param.key.as_ref().map(|key| QueryParam {
                            key: key.clone(),
                            value: param.value.clone(),
                            disabled: param.disabled,
                        })
                    })
                    .collect(),
            },
        }
    }
}

impl StringOrList {
    fn clone_vec(&self) -> Vec<String> {
        match self {
            StringOrList::One(value) => vec![value.clone()],
            StringOrList::Many(values) => values.clone(),
        }
    }
}

impl RawBody {
    fn to_body(&self) -> Option<RequestBody> {
        let mode = self.mode.as_deref().filter(|mode| !mode.is_empty())?;
        let body = match mode {
            "raw" => RequestBody::Raw(self.raw.clone().unwrap_or_default()),
            "formdata" => RequestBody::FormData(convert_parts(self.formdata.as_deref())),
            "urlencoded" => RequestBody::UrlEncoded(convert_parts(self.urlencoded.as_deref())),
            other => RequestBody::Unsupported(other.to_owned()),
        };
        Some(body)
    }
}

fn convert_parts(parts: Option<&[RawFormPart]>) -> Vec<FormPart> {
    parts
        .unwrap_or_default()
        .iter()
        .map(|part| FormPart {
            key: part.key.clone(),
            value: part.value.as_ref().and_then(value_to_string),
            kind: match part.kind.as_deref() {
                Some("file") => FormPartKind::File,
                Some(_) | None => FormPartKind::Text,
            },
            src: part
                .src
                .as_ref()
                .map(StringOrList::clone_vec)
                .unwrap_or_default(),
            disabled: part.disabled,
        })
        .collect()
}

impl RawAuth {
    fn to_spec(&self) -> AuthSpec {
        let kind = self.kind.clone().unwrap_or_default();
        let credentials = self
            .params
            .get(&kind)
            .map(credential_entries)
            .unwrap_or_default();
        AuthSpec {
            username: credentials.get("username").cloned(),
            password: credentials.get("password").cloned(),
            kind,
        }
    }
}

/// Reads `[{key, value}, ...]` entries, or the legacy `{username, password}`
/// object form.
fn credential_entries(params: &Value) -> BTreeMap<String, String> {
    match params {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| {
                let key = entry.get("key")?.as_str()?;
                let value = entry.get("value").and_then(value_to_string)?;
                Some((key.to_owned(), value))
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| value_to_string(value).map(|text| (key.clone(), text)))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => BTreeMap::new(),
    }
}

impl RawVariable {
    pub(super) fn to_pair(&self) -> Option<(String, String)> {
        if self.disabled {
            return None;
        }
        let key = self.key.as_ref().filter(|key| !key.is_empty())?;
        let value = self
            .value
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_default();
        Some((key.clone(), value))
    }
}
