use std::path::PathBuf;

use reqwest::multipart::{Form, Part};

use crate::collection::{FormPart, FormPartKind, RequestBody};
use crate::error::{AppError, AppResult, HttpError};

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const TEXT_CONTENT_TYPE: &str = "text/plain";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One field of a multipart body. File contents are read when the request
/// is built, so every attempt re-reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MultipartField {
    Text { name: String, value: String },
    File { name: String, path: PathBuf },
}

/// A request body ready to be attached to a `reqwest` builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BodyPayload {
    Empty,
    /// Raw text that parsed as JSON; sent verbatim.
    Json(String),
    Text(String),
    Multipart(Vec<MultipartField>),
    UrlEncoded(Vec<(String, String)>),
}

/// Encoded body plus the headers the encoding implies. Explicit request
/// headers are merged over `headers` by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedBody {
    pub(crate) payload: BodyPayload,
    pub(crate) headers: Vec<(String, String)>,
}

impl EncodedBody {
    const fn empty() -> Self {
        Self {
            payload: BodyPayload::Empty,
            headers: Vec::new(),
        }
    }

    pub(crate) const fn is_multipart(&self) -> bool {
        matches!(self.payload, BodyPayload::Multipart(_))
    }
}

/// Maps a declarative body onto its wire form.
pub(crate) fn encode_body(body: Option<&RequestBody>) -> EncodedBody {
    let Some(body) = body else {
        return EncodedBody::empty();
    };
    match body {
        RequestBody::Raw(text) => encode_raw(text),
        RequestBody::FormData(parts) => EncodedBody {
            payload: BodyPayload::Multipart(multipart_fields(parts)),
            headers: Vec::new(),
        },
        RequestBody::UrlEncoded(parts) => EncodedBody {
            payload: BodyPayload::UrlEncoded(
                parts
                    .iter()
                    .filter_map(|part| {
                        text_pair(part).map(|(key, value)| (key.to_owned(), value.to_owned()))
                    })
                    .collect(),
            ),
            headers: vec![("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned())],
        },
        RequestBody::Unsupported(_) => EncodedBody::empty(),
    }
}

/// Text that parses as JSON goes out as JSON; anything else, the empty
/// string included, as plain text.
fn encode_raw(text: &str) -> EncodedBody {
    let (payload, content_type) = if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        (BodyPayload::Json(text.to_owned()), JSON_CONTENT_TYPE)
    } else {
        (BodyPayload::Text(text.to_owned()), TEXT_CONTENT_TYPE)
    };
    EncodedBody {
        payload,
        headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
    }
}

/// Key and value of an enabled text part that has both.
fn text_pair(part: &FormPart) -> Option<(&str, &str)> {
    if part.disabled || part.kind != FormPartKind::Text {
        return None;
    }
    let key = part.key.as_deref()?;
    let value = part.value.as_deref()?;
    Some((key, value))
}

fn multipart_fields(parts: &[FormPart]) -> Vec<MultipartField> {
    let mut fields = Vec::new();
    for part in parts.iter().filter(|part| !part.disabled) {
        let Some(name) = part.key.as_deref() else {
            continue;
        };
        match part.kind {
            FormPartKind::Text => {
                if let Some(value) = part.value.as_deref() {
                    fields.push(MultipartField::Text {
                        name: name.to_owned(),
                        value: value.to_owned(),
                    });
                }
            }
            FormPartKind::File => {
                fields.extend(part.src.iter().filter(|src| !src.is_empty()).map(|src| {
                    MultipartField::File {
                        name: name.to_owned(),
                        path: PathBuf::from(src),
                    }
                }));
            }
        }
    }
    fields
}

/// Builds a fresh multipart form, reading every referenced file.
///
/// # Errors
///
/// Returns an error when a referenced file cannot be read.
pub(crate) fn build_multipart(fields: &[MultipartField]) -> AppResult<Form> {
    let mut form = Form::new();
    for field in fields {
        match field {
            MultipartField::Text { name, value } => {
                form = form.text(name.clone(), value.clone());
            }
            MultipartField::File { name, path } => {
                let bytes = std::fs::read(path).map_err(|err| {
                    AppError::http(HttpError::ReadFormFile {
                        path: path.clone(),
                        source: err,
                    })
                })?;
                let file_name = path
                    .file_name()
                    .and_then(|value| value.to_str())
                    .unwrap_or("file")
                    .to_owned();
                form = form.part(name.clone(), Part::bytes(bytes).file_name(file_name));
            }
        }
    }
    Ok(form)
}
