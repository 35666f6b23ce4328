//! Body serialization.
//!
//! The resolved Content-Type header picks the strategy: form media types
//! collect `formData` parameters structurally, JSON media types serialize
//! the declared body parameter to text, anything else passes the body
//! value through untouched. No Content-Type means no payload.

use crate::errors::BuildError;
use crate::request::values::SuppliedValues;
use crate::spec::{ParameterLocation, ParameterMeta};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A request body in one of the three shapes the transport layer accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Serialized JSON text
    Text(String),
    /// Structural form fields; transport-level encoding is the
    /// dispatcher's concern
    Fields(Map<String, Value>),
    /// Unserialized passthrough for opaque media types
    Raw(Value),
}

fn json_media_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^application/.*json$|\+json$").expect("json media-type pattern"))
}

fn is_form(media_type: &str) -> bool {
    media_type == "application/x-www-form-urlencoded" || media_type.starts_with("multipart/form-data")
}

fn body_value<'a>(
    params: &[ParameterMeta],
    values: &'a SuppliedValues,
) -> Result<Option<&'a Value>, BuildError> {
    let param = match params
        .iter()
        .find(|p| p.location == ParameterLocation::Body)
    {
        Some(param) => param,
        None => return Ok(None),
    };
    values
        .get(&param.name)
        .map(Some)
        .ok_or_else(|| BuildError::MissingBodyParameter {
            parameter: param.name.clone(),
        })
}

/// Build the request payload for the resolved header mapping.
///
/// # Errors
///
/// [`BuildError::MissingBodyParameter`] when a declared body parameter has
/// no supplied value.
pub fn build_payload(
    params: &[ParameterMeta],
    values: &SuppliedValues,
    headers: &BTreeMap<String, String>,
) -> Result<Option<Payload>, BuildError> {
    let content_type = match headers.get("Content-Type") {
        Some(ct) => ct,
        None => return Ok(None),
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();

    if is_form(media_type) {
        let mut fields = Map::new();
        for param in params
            .iter()
            .filter(|p| p.location == ParameterLocation::FormData)
        {
            if let Some(value) = values.get(&param.name) {
                fields.insert(param.name.clone(), value.clone());
            }
        }
        return Ok(Some(Payload::Fields(fields)));
    }

    if json_media_type().is_match(media_type) {
        return Ok(body_value(params, values)?.map(|value| Payload::Text(value.to_string())));
    }

    Ok(body_value(params, values)?.map(|value| Payload::Raw(value.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param(name: &str, location: ParameterLocation) -> ParameterMeta {
        ParameterMeta {
            name: name.to_string(),
            location,
            required: true,
            schema: Some(json!({"type": "object"})),
            style: None,
            explode: None,
            legacy_type: None,
        }
    }

    fn headers_with(content_type: &str) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        headers
    }

    #[test]
    fn test_no_content_type_means_no_payload() {
        let payload = build_payload(
            &[param("pet", ParameterLocation::Body)],
            &SuppliedValues::new(),
            &BTreeMap::new(),
        )
        .expect("built");
        assert_eq!(payload, None);
    }

    #[test]
    fn test_json_body_is_serialized() {
        let mut values = SuppliedValues::new();
        values.insert("pet", json!({"name": "Fido"}));
        let payload = build_payload(
            &[param("pet", ParameterLocation::Body)],
            &values,
            &headers_with("application/json"),
        )
        .expect("built");
        assert_eq!(payload, Some(Payload::Text("{\"name\":\"Fido\"}".to_string())));
    }

    #[test]
    fn test_json_suffix_media_types_count() {
        let mut values = SuppliedValues::new();
        values.insert("doc", json!([1, 2]));
        for media_type in ["application/vnd.api+json", "application/hal+json; charset=utf-8"] {
            let payload = build_payload(
                &[param("doc", ParameterLocation::Body)],
                &values,
                &headers_with(media_type),
            )
            .expect("built");
            assert_eq!(payload, Some(Payload::Text("[1,2]".to_string())));
        }
    }

    #[test]
    fn test_missing_body_parameter_is_fatal() {
        let err = build_payload(
            &[param("pet", ParameterLocation::Body)],
            &SuppliedValues::new(),
            &headers_with("application/json"),
        )
        .expect_err("must fail");
        assert_eq!(
            err,
            BuildError::MissingBodyParameter {
                parameter: "pet".to_string()
            }
        );
        assert!(err.to_string().contains("`pet`"));
    }

    #[test]
    fn test_form_fields_are_structural() {
        let mut values = SuppliedValues::new();
        values.insert("name", json!("Fido"));
        values.insert("age", json!(3));
        let params = [
            param("name", ParameterLocation::FormData),
            param("age", ParameterLocation::FormData),
            param("ignored", ParameterLocation::Query),
        ];
        let payload = build_payload(
            &params,
            &values,
            &headers_with("application/x-www-form-urlencoded"),
        )
        .expect("built");
        let mut expected = Map::new();
        expected.insert("name".to_string(), json!("Fido"));
        expected.insert("age".to_string(), json!(3));
        assert_eq!(payload, Some(Payload::Fields(expected)));
    }

    #[test]
    fn test_multipart_takes_the_form_branch() {
        let mut values = SuppliedValues::new();
        values.insert("file", json!("blob"));
        let payload = build_payload(
            &[param("file", ParameterLocation::FormData)],
            &values,
            &headers_with("multipart/form-data; boundary=x"),
        )
        .expect("built");
        assert!(matches!(payload, Some(Payload::Fields(_))));
    }

    #[test]
    fn test_opaque_media_type_passes_through() {
        let mut values = SuppliedValues::new();
        values.insert("blob", json!("raw bytes"));
        let payload = build_payload(
            &[param("blob", ParameterLocation::Body)],
            &values,
            &headers_with("text/plain"),
        )
        .expect("built");
        assert_eq!(payload, Some(Payload::Raw(json!("raw bytes"))));
    }

    #[test]
    fn test_no_declared_body_means_no_payload() {
        let payload = build_payload(
            &[],
            &SuppliedValues::new(),
            &headers_with("application/json"),
        )
        .expect("built");
        assert_eq!(payload, None);
    }
}
