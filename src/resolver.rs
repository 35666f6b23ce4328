//! Reference resolution for document fragments.
//!
//! Replaces every `$ref` pointer inside a fragment with the object it
//! points to in the root document's `components` section. Resolution is a
//! pure function: the source document and fragment are borrowed immutably
//! and a newly constructed fragment is returned, so concurrent builds can
//! share one document without precautions.

use crate::errors::BuildError;
use crate::spec::Document;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Default bound on how many pointers one resolution chain may follow.
pub const DEFAULT_MAX_REF_DEPTH: usize = 32;

const ALLOWED_SECTIONS: [&str; 9] = [
    "schemas",
    "parameters",
    "responses",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
    "examples",
];

/// Resolves `$ref` pointers in fragments against one root document.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    doc: &'a Document,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Resolver {
            doc,
            max_depth: DEFAULT_MAX_REF_DEPTH,
        }
    }

    /// Bound the pointer-chain depth (see `REQWIRE_MAX_REF_DEPTH`).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Return a copy of `fragment` with every reference pointer replaced by
    /// the object it points to.
    ///
    /// A `{$ref: …}` object carrying sibling keys (the `schema: {$ref: …,
    /// nullable: true}` shape) is merged rather than wholesale-replaced:
    /// siblings are retained, resolved content wins on conflicts. The
    /// resolver re-descends into merged-in content, so chained references
    /// resolve fully. Resolution is idempotent.
    ///
    /// # Errors
    ///
    /// * [`BuildError::InvalidReference`] for a malformed pointer, a
    ///   section outside the components allow-list, or a malformed
    ///   external URI
    /// * [`BuildError::UnresolvableReference`] for a pointer with no
    ///   target in the document
    /// * [`BuildError::ReferenceCycle`] when a pointer is revisited within
    ///   one chain, or the chain exceeds the depth bound
    pub fn resolve(&self, fragment: &Value) -> Result<Value, BuildError> {
        let mut visited = HashSet::new();
        self.resolve_value(fragment, &mut visited)
    }

    fn resolve_value(
        &self,
        fragment: &Value,
        visited: &mut HashSet<String>,
    ) -> Result<Value, BuildError> {
        match fragment {
            Value::Object(map) => self.resolve_object(map, visited),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, visited))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_object(
        &self,
        map: &Map<String, Value>,
        visited: &mut HashSet<String>,
    ) -> Result<Value, BuildError> {
        let pointer = match map.get("$ref") {
            Some(Value::String(ptr)) => ptr.clone(),
            Some(other) => {
                return Err(BuildError::InvalidReference {
                    pointer: other.to_string(),
                })
            }
            None => {
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.resolve_value(value, visited)?);
                }
                return Ok(Value::Object(out));
            }
        };

        let target = self.lookup(&pointer)?;

        if visited.len() >= self.max_depth {
            return Err(BuildError::ReferenceCycle { pointer });
        }
        if !visited.insert(pointer.clone()) {
            return Err(BuildError::ReferenceCycle { pointer });
        }
        let resolved = self.resolve_value(target, visited)?;
        visited.remove(&pointer);

        if map.len() == 1 {
            return Ok(resolved);
        }

        // Sibling keys next to the $ref are retained; resolved content
        // wins on conflicts. A non-mapping target replaces wholesale.
        match resolved {
            Value::Object(resolved_map) => {
                let mut merged = Map::with_capacity(map.len() + resolved_map.len());
                for (key, value) in map {
                    if key != "$ref" {
                        merged.insert(key.clone(), self.resolve_value(value, visited)?);
                    }
                }
                for (key, value) in resolved_map {
                    merged.insert(key, value);
                }
                Ok(Value::Object(merged))
            }
            other => Ok(other),
        }
    }

    fn lookup(&self, pointer: &str) -> Result<&'a Value, BuildError> {
        let (section, name) = parse_pointer(pointer)?;
        self.doc
            .component(section, name)
            .ok_or_else(|| BuildError::UnresolvableReference {
                pointer: pointer.to_string(),
            })
    }
}

/// Split a pointer into its components section and object name.
///
/// Accepts `#/components/{section}/{name}` (local) and
/// `{uri}#/components/{section}/{name}` (external; the URI part must be
/// syntactically well formed). External pointers resolve against the same
/// root document; bundling external files is the caller's concern.
fn parse_pointer(pointer: &str) -> Result<(&str, &str), BuildError> {
    let invalid = || BuildError::InvalidReference {
        pointer: pointer.to_string(),
    };

    let (uri, fragment) = pointer.split_once('#').ok_or_else(invalid)?;
    if !uri.is_empty() && url::Url::parse(uri).is_err() {
        // Relative document references are legal; borrow the dummy-host
        // trick used for relative server URLs. The lenient parser would
        // percent-encode whitespace, so reject it up front.
        if uri.contains(char::is_whitespace) {
            return Err(invalid());
        }
        url::Url::parse(&format!("http://dummy/{uri}")).map_err(|_| invalid())?;
    }

    let rest = fragment.strip_prefix("/components/").ok_or_else(invalid)?;
    let (section, name) = rest.split_once('/').ok_or_else(invalid)?;
    if name.is_empty() || name.contains('/') {
        return Err(invalid());
    }
    if !ALLOWED_SECTIONS.contains(&section) {
        return Err(invalid());
    }
    Ok((section, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(json!({
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": { "tag": { "$ref": "#/components/schemas/Tag" } }
                    },
                    "Tag": { "type": "string" },
                    "Selfish": { "$ref": "#/components/schemas/Selfish" },
                    "A": { "$ref": "#/components/schemas/B" },
                    "B": { "$ref": "#/components/schemas/A" }
                },
                "parameters": {
                    "Limit": {
                        "name": "limit", "in": "query",
                        "schema": { "type": "integer" }
                    }
                }
            }
        }))
    }

    #[test]
    fn test_resolves_parameter_ref() {
        let d = doc();
        let resolved = Resolver::new(&d)
            .resolve(&json!({"$ref": "#/components/parameters/Limit"}))
            .expect("resolved");
        assert_eq!(resolved["name"], "limit");
        assert_eq!(resolved["in"], "query");
    }

    #[test]
    fn test_resolves_nested_schema_refs() {
        let d = doc();
        let resolved = Resolver::new(&d)
            .resolve(&json!({"schema": {"$ref": "#/components/schemas/Pet"}}))
            .expect("resolved");
        assert_eq!(resolved["schema"]["type"], "object");
        assert_eq!(resolved["schema"]["properties"]["tag"]["type"], "string");
    }

    #[test]
    fn test_sibling_keys_survive_merge() {
        let d = doc();
        let resolved = Resolver::new(&d)
            .resolve(&json!({
                "schema": { "$ref": "#/components/schemas/Tag", "nullable": true }
            }))
            .expect("resolved");
        assert_eq!(resolved["schema"]["type"], "string");
        assert_eq!(resolved["schema"]["nullable"], true);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let d = doc();
        let resolver = Resolver::new(&d);
        let once = resolver
            .resolve(&json!({"$ref": "#/components/schemas/Pet"}))
            .expect("first pass");
        let twice = resolver.resolve(&once).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_pointer() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "not-a-ref"}))
            .expect_err("must fail");
        assert_eq!(
            err,
            BuildError::InvalidReference {
                pointer: "not-a-ref".to_string()
            }
        );
        assert!(err.to_string().contains("not-a-ref"));
    }

    #[test]
    fn test_disallowed_section() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "#/components/definitions/Pet"}))
            .expect_err("must fail");
        assert!(matches!(err, BuildError::InvalidReference { .. }));
    }

    #[test]
    fn test_unresolvable_pointer() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "#/components/schemas/Ghost"}))
            .expect_err("must fail");
        assert_eq!(
            err,
            BuildError::UnresolvableReference {
                pointer: "#/components/schemas/Ghost".to_string()
            }
        );
    }

    #[test]
    fn test_external_pointer_resolves_against_root() {
        let d = doc();
        let resolved = Resolver::new(&d)
            .resolve(&json!({"$ref": "https://example.com/api.yaml#/components/schemas/Tag"}))
            .expect("resolved");
        assert_eq!(resolved["type"], "string");
    }

    #[test]
    fn test_malformed_external_uri() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "ht tp://bad uri#/components/schemas/Tag"}))
            .expect_err("must fail");
        assert!(matches!(err, BuildError::InvalidReference { .. }));
    }

    #[test]
    fn test_self_cycle_is_detected() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "#/components/schemas/Selfish"}))
            .expect_err("must fail");
        assert!(matches!(err, BuildError::ReferenceCycle { .. }));
    }

    #[test]
    fn test_mutual_cycle_is_detected() {
        let d = doc();
        let err = Resolver::new(&d)
            .resolve(&json!({"$ref": "#/components/schemas/A"}))
            .expect_err("must fail");
        assert!(matches!(err, BuildError::ReferenceCycle { .. }));
    }

    #[test]
    fn test_depth_cap() {
        let d = doc();
        let err = Resolver::new(&d)
            .with_max_depth(0)
            .resolve(&json!({"$ref": "#/components/schemas/Tag"}))
            .expect_err("must fail");
        assert!(matches!(err, BuildError::ReferenceCycle { .. }));
    }
}
