use std::collections::BTreeMap;

use super::model::{AuthSpec, FormPart, RequestBody, RequestItem};
use super::url::{QueryParam, UrlSpec};

/// Replaces `{{name}}` placeholders with values from `vars`. Unknown names
/// are left in place.
#[must_use]
pub fn render_template(input: &str, vars: &BTreeMap<String, String>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let Some(start) = rest.find("{{") else {
            output.push_str(rest);
            break;
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let Some(after) = after_start.strip_prefix("{{") else {
            output.push_str(after_start);
            break;
        };
        let Some(end) = after.find("}}") else {
            output.push_str("{{");
            output.push_str(after);
            break;
        };
        let (key_part, after_end) = after.split_at(end);
        let key = key_part.trim();
        if let Some(value) = vars.get(key) {
            output.push_str(value);
        } else {
            output.push_str("{{");
            output.push_str(key_part);
            output.push_str("}}");
        }
        rest = match after_end.strip_prefix("}}") {
            Some(remaining) => remaining,
            None => {
                output.push_str(after_end);
                break;
            }
        };
    }

    output
}

fn render_opt(value: Option<&String>, vars: &BTreeMap<String, String>) -> Option<String> {
    value.map(|inner| render_template(inner, vars))
}

fn render_url(url: &UrlSpec, vars: &BTreeMap<String, String>) -> UrlSpec {
    UrlSpec {
        raw: render_opt(url.raw.as_ref(), vars),
        protocol: render_opt(url.protocol.as_ref(), vars),
        host: url
            .host
            .iter()
            .map(|segment| render_template(segment, vars))
            .collect(),
        port: render_opt(url.port.as_ref(), vars),
        path: url
            .path
            .iter()
            .map(|segment| render_template(segment, vars))
            .collect(),
        query: url
            .query
            .iter()
            .map(|param| QueryParam {
                key: render_template(&param.key, vars),
                value: render_opt(param.value.as_ref(), vars),
                disabled: param.disabled,
            })
            .collect(),
    }
}

fn render_parts(parts: &[FormPart], vars: &BTreeMap<String, String>) -> Vec<FormPart> {
    parts
        .iter()
        .map(|part| FormPart {
            key: render_opt(part.key.as_ref(), vars),
            value: render_opt(part.value.as_ref(), vars),
            kind: part.kind,
            src: part
                .src
                .iter()
                .map(|path| render_template(path, vars))
                .collect(),
            disabled: part.disabled,
        })
        .collect()
}

fn render_body(body: &RequestBody, vars: &BTreeMap<String, String>) -> RequestBody {
    match body {
        RequestBody::Raw(raw) => RequestBody::Raw(render_template(raw, vars)),
        RequestBody::FormData(parts) => RequestBody::FormData(render_parts(parts, vars)),
        RequestBody::UrlEncoded(parts) => RequestBody::UrlEncoded(render_parts(parts, vars)),
        RequestBody::Unsupported(mode) => RequestBody::Unsupported(mode.clone()),
    }
}

impl RequestItem {
    /// Returns a copy of this request with every `{{name}}` placeholder in
    /// its URL, headers, body and credentials replaced from `vars`.
    #[must_use]
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Self {
        if vars.is_empty() {
            return self.clone();
        }
        Self {
            name: self.name.clone(),
            method: self.method.clone(),
            url: render_url(&self.url, vars),
            headers: self
                .headers
                .iter()
                .map(|(key, value)| (render_template(key, vars), render_template(value, vars)))
                .collect(),
            body: self.body.as_ref().map(|body| render_body(body, vars)),
            auth: self.auth.as_ref().map(|auth| AuthSpec {
                kind: auth.kind.clone(),
                username: render_opt(auth.username.as_ref(), vars),
                password: render_opt(auth.password.as_ref(), vars),
            }),
        }
    }
}
