//! Header assembly.
//!
//! Resolves header parameters from the supplied header values, negotiates
//! Accept and Content-Type from the operation's media-type lists, and
//! attaches Host when one is declared. Inbound parsing lowercases header
//! names at the edge; this is the outbound edge, so names are emitted in
//! their canonical transport form.

use crate::errors::BuildError;
use crate::request::values::SuppliedValues;
use crate::spec::{OperationMeta, ParameterLocation, ParameterMeta};
use serde_json::Value;
use std::collections::BTreeMap;

/// Map a header name to its canonical transport form. Names outside the
/// protocol set pass through unchanged.
pub fn canonical_header_name(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "accept" => "Accept".to_string(),
        "content-type" => "Content-Type".to_string(),
        "authorization" => "Authorization".to_string(),
        "host" => "Host".to_string(),
        _ => name.to_string(),
    }
}

fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the canonical header mapping for a request.
///
/// # Errors
///
/// [`BuildError::MissingValue`] when a header parameter has no supplied
/// value.
pub fn build_headers(
    op: &OperationMeta,
    params: &[ParameterMeta],
    supplied: &SuppliedValues,
    host_override: Option<&str>,
) -> Result<BTreeMap<String, String>, BuildError> {
    let mut headers = BTreeMap::new();

    for param in params
        .iter()
        .filter(|p| p.location == ParameterLocation::Header)
    {
        let value = supplied
            .get(&param.name)
            .ok_or_else(|| BuildError::MissingValue {
                parameter: param.name.clone(),
                location: ParameterLocation::Header,
            })?;
        headers.insert(canonical_header_name(&param.name), header_text(value));
    }

    if let Some(accept) = supplied.get("Accept") {
        headers.insert("Accept".to_string(), header_text(accept));
    } else if let Some(media_type) = op.produces.first() {
        headers.insert("Accept".to_string(), media_type.clone());
    }

    if let Some(content_type) = supplied.get("Content-Type") {
        headers.insert("Content-Type".to_string(), header_text(content_type));
    } else if let Some(media_type) = op.consumes.first() {
        headers.insert("Content-Type".to_string(), media_type.clone());
    }

    let host = host_override
        .map(str::to_string)
        .or_else(|| op.host.clone())
        .filter(|h| !h.trim().is_empty());
    if let Some(host) = host {
        headers.insert("Host".to_string(), host);
    }

    Ok(headers)
}
