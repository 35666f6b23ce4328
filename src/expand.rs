//! Parameter expansion.
//!
//! Produces the single ordered parameter list every downstream builder
//! consumes: operation-level declarations first, then path-item-level,
//! then parameters derived from the security requirements. References are
//! resolved before anything else, duplicates collapse to their earliest
//! occurrence, and optional parameters nobody supplied a value for are
//! dropped outright.

use crate::errors::BuildError;
use crate::request::SuppliedValues;
use crate::resolver::Resolver;
use crate::security::derive_security_params;
use crate::spec::{Document, OperationMeta, ParameterLocation, ParameterMeta, ParameterStyle};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Parse one fully-resolved parameter fragment into a descriptor.
fn parse_parameter(fragment: &Value) -> Result<ParameterMeta, BuildError> {
    let map = fragment
        .as_object()
        .ok_or_else(|| BuildError::InvalidField {
            parameter: fragment.to_string(),
            detail: "parameter declaration is not a mapping".to_string(),
        })?;

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| BuildError::InvalidField {
            parameter: fragment.to_string(),
            detail: "missing `name`".to_string(),
        })?
        .to_string();

    let location_str = map
        .get("in")
        .and_then(Value::as_str)
        .ok_or_else(|| BuildError::InvalidField {
            parameter: name.clone(),
            detail: "missing `in` location".to_string(),
        })?;
    let location =
        ParameterLocation::parse(location_str).ok_or_else(|| BuildError::InvalidField {
            parameter: name.clone(),
            detail: format!("unknown parameter location `{location_str}`"),
        })?;

    let style = match map.get("style").and_then(Value::as_str) {
        Some(style_str) => {
            Some(
                ParameterStyle::parse(style_str).ok_or_else(|| BuildError::InvalidField {
                    parameter: name.clone(),
                    detail: format!("unknown serialization style `{style_str}`"),
                })?,
            )
        }
        None => None,
    };

    Ok(ParameterMeta {
        name,
        location,
        required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
        schema: map.get("schema").cloned(),
        style,
        explode: map.get("explode").and_then(Value::as_bool),
        legacy_type: map.get("type").cloned(),
    })
}

/// Expand an operation's parameters into the final ordered descriptor list.
///
/// Concatenates operation-level, path-item-level, and security-derived
/// parameters (in that order), resolves references on every element,
/// de-duplicates by name keeping the first occurrence, and drops optional
/// parameters with no entry in either supplied mapping. Required
/// parameters always survive; their missing values surface later, at the
/// point each one is consumed.
pub fn expand_parameters(
    doc: &Document,
    op: &OperationMeta,
    resolver: &Resolver<'_>,
    values: &SuppliedValues,
    headers: &SuppliedValues,
) -> Result<Vec<ParameterMeta>, BuildError> {
    let mut expanded = Vec::new();
    for fragment in op.parameters.iter().chain(op.path_item_parameters.iter()) {
        let resolved = resolver.resolve(fragment)?;
        expanded.push(parse_parameter(&resolved)?);
    }

    let requirements = op.security.clone().unwrap_or_else(|| doc.security());
    expanded.extend(derive_security_params(
        &requirements,
        &doc.security_schemes(),
    ));

    let mut seen = HashSet::new();
    expanded.retain(|p| seen.insert(p.name.clone()));
    expanded.retain(|p| p.required || values.contains(&p.name) || headers.contains(&p.name));

    debug!(
        parameter_count = expanded.len(),
        parameters = ?expanded.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "parameters expanded"
    );
    Ok(expanded)
}
