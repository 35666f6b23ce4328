//! Security-derived parameters.
//!
//! An operation's security requirements imply request parameters the
//! document never declares explicitly: an `apiKey` scheme means a key
//! header or query parameter, anything else means an `Authorization`
//! header. The deriver turns each referenced scheme into a synthetic
//! parameter descriptor so the downstream builders treat credentials like
//! any other parameter.

use crate::spec::{ParameterLocation, ParameterMeta, SecurityRequirement, SecuritySchemeDef};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Derive one synthetic parameter per scheme referenced by `requirements`.
///
/// The parameter is `required` only when the requirement set names exactly
/// one scheme in total; with alternatives listed, any one of them
/// satisfies the operation, so none is individually required. Requirements
/// naming schemes absent from the registry are skipped.
pub fn derive_security_params(
    requirements: &[SecurityRequirement],
    schemes: &HashMap<String, SecuritySchemeDef>,
) -> Vec<ParameterMeta> {
    let total: usize = requirements.iter().map(|req| req.len()).sum();
    let required = total == 1;

    let mut out = Vec::new();
    for requirement in requirements {
        for scheme_name in requirement.keys() {
            let scheme = match schemes.get(scheme_name) {
                Some(scheme) => scheme,
                None => {
                    debug!(scheme = %scheme_name, "security scheme not registered, skipping");
                    continue;
                }
            };
            let (name, location) = match credential_slot(scheme) {
                Some(slot) => slot,
                None => {
                    debug!(scheme = %scheme_name, "api key scheme missing name or location, skipping");
                    continue;
                }
            };
            out.push(ParameterMeta {
                name,
                location,
                required,
                schema: Some(json!({"type": "string"})),
                style: None,
                explode: None,
                legacy_type: None,
            });
        }
    }
    out
}

fn credential_slot(scheme: &SecuritySchemeDef) -> Option<(String, ParameterLocation)> {
    if scheme.scheme_type == "apiKey" {
        let name = scheme.name.clone()?;
        let location = scheme
            .location
            .as_deref()
            .and_then(ParameterLocation::parse)?;
        Some((name, location))
    } else {
        // bearer, basic, oauth2, openIdConnect all travel in Authorization.
        Some(("Authorization".to_string(), ParameterLocation::Header))
    }
}
