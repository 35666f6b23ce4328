//! Path and query rendering.
//!
//! Builds the final path component of a request: the first declared
//! server's base path, the operation's path template with `{name}`
//! placeholders substituted, and the query string assembled through the
//! style/explode serialization matrix. This is the encode counterpart of
//! inbound parameter decoding, with the same style-to-separator table.

use crate::errors::BuildError;
use crate::request::values::SuppliedValues;
use crate::spec::{Document, OperationMeta, ParameterLocation, ParameterMeta, ParameterStyle};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn template_var() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}/]+)\}").expect("template variable pattern"))
}

/// Substitute a server URL template's variables with their declared
/// defaults, then extract the path component the way route building does:
/// parse as a URL, falling back to a dummy host for relative entries.
fn base_path(doc: &Document) -> String {
    let server = match doc.first_server() {
        Some(server) => server,
        None => return String::new(),
    };
    let url_template = match server.get("url").and_then(Value::as_str) {
        Some(url) => url,
        None => return String::new(),
    };

    let variables = server.get("variables");
    let url_str = template_var().replace_all(url_template, |caps: &regex::Captures<'_>| {
        variables
            .and_then(|vars| vars.get(&caps[1]))
            .and_then(|var| var.get("default"))
            .map(scalar_text)
            .unwrap_or_else(|| caps[0].to_string())
    });

    url::Url::parse(&url_str)
        .or_else(|_| url::Url::parse(&format!("http://dummy{url_str}")))
        .map(|u| {
            let p = u.path().trim_end_matches('/');
            if p == "/" || p.is_empty() {
                String::new()
            } else {
                p.to_string()
            }
        })
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

fn escape_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => escape(&scalar_text(other)),
    }
}

fn style_separator(style: ParameterStyle) -> &'static str {
    match style {
        ParameterStyle::Form => "&",
        ParameterStyle::Matrix => ";",
        ParameterStyle::Label => ".",
        ParameterStyle::SpaceDelimited => "%20",
        ParameterStyle::PipeDelimited => "|",
        ParameterStyle::DeepObject => "&",
    }
}

/// Serialize one query parameter into its query-string fragment.
///
/// `name` is escaped here; nested structures compose bracketed names from
/// already-escaped segments, so nothing is escaped twice. Primitive values
/// always render as `name=value` regardless of style.
pub fn encode_query_param(
    name: &str,
    value: &Value,
    style: ParameterStyle,
    explode: bool,
) -> String {
    encode_fragment(&escape(name), value, style, explode)
}

fn encode_fragment(name_esc: &str, value: &Value, style: ParameterStyle, explode: bool) -> String {
    let sep = style_separator(style);
    match value {
        Value::Array(items) => {
            if explode {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Value::Array(_) | Value::Object(_) => {
                            encode_fragment(&format!("{name_esc}[]"), item, style, explode)
                        }
                        scalar => format!("{name_esc}[]={}", escape_scalar(scalar)),
                    })
                    .collect();
                parts.join(sep)
            } else if style == ParameterStyle::Form {
                // Unexploded form arrays surface as repeated pairs.
                items
                    .iter()
                    .map(|item| format!("{name_esc}={}", escape_scalar(item)))
                    .collect::<Vec<_>>()
                    .join(sep)
            } else {
                let joined = items
                    .iter()
                    .map(escape_scalar)
                    .collect::<Vec<_>>()
                    .join(sep);
                format!("{name_esc}={joined}")
            }
        }
        Value::Object(fields) => match style {
            ParameterStyle::DeepObject => fields
                .iter()
                .map(|(key, field)| {
                    let nested = format!("{name_esc}[{}]", escape(key));
                    match field {
                        Value::Array(_) | Value::Object(_) => {
                            encode_fragment(&nested, field, style, explode)
                        }
                        scalar => format!("{nested}={}", escape_scalar(scalar)),
                    }
                })
                .collect::<Vec<_>>()
                .join(sep),
            _ if explode => fields
                .iter()
                .map(|(key, field)| match field {
                    Value::Array(_) | Value::Object(_) => {
                        encode_fragment(&escape(key), field, style, explode)
                    }
                    scalar => format!("{}={}", escape(key), escape_scalar(scalar)),
                })
                .collect::<Vec<_>>()
                .join(sep),
            _ => {
                let joined = fields
                    .iter()
                    .flat_map(|(key, field)| [escape(key), escape_scalar(field)])
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{name_esc}={joined}")
            }
        },
        scalar => format!("{name_esc}={}", escape_scalar(scalar)),
    }
}

/// Render the request path: base path + substituted path template + query
/// string.
///
/// # Errors
///
/// * [`BuildError::MissingValue`] when a path parameter has no supplied
///   value
/// * [`BuildError::InvalidField`] when a query parameter declares the
///   legacy top-level `type` field
pub fn build_path(
    doc: &Document,
    op: &OperationMeta,
    params: &[ParameterMeta],
    values: &SuppliedValues,
) -> Result<String, BuildError> {
    let mut path = format!("{}{}", base_path(doc), op.path);

    for param in params
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
    {
        let value = values
            .get(&param.name)
            .ok_or_else(|| BuildError::MissingValue {
                parameter: param.name.clone(),
                location: ParameterLocation::Path,
            })?;
        path = path.replace(&format!("{{{}}}", param.name), &scalar_text(value));
    }

    let mut fragments = Vec::new();
    for param in params
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
    {
        let value = match values.get(&param.name) {
            Some(value) => value,
            None => continue,
        };
        if param.legacy_type.is_some() {
            return Err(BuildError::InvalidField {
                parameter: param.name.clone(),
                detail: "legacy top-level `type` is not allowed; declare a `schema`".to_string(),
            });
        }
        if param.schema.is_none() {
            continue;
        }
        let style = param.style.unwrap_or(ParameterStyle::Form);
        let explode = param.explode.unwrap_or(true);
        let fragment = encode_query_param(&param.name, value, style, explode);
        if !fragment.is_empty() {
            fragments.push(fragment);
        }
    }

    if !fragments.is_empty() {
        path.push('?');
        path.push_str(&fragments.join("&"));
    }
    Ok(path)
}
