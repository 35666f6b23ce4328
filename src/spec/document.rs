use super::{SecurityRequirement, SecuritySchemeDef};
use serde_json::Value;
use std::collections::HashMap;

/// The root API description document.
///
/// Kept as the raw value tree (YAML documents deserialize into the same
/// tree), because request building has to walk fragments the typed OpenAPI
/// models reject: Swagger-2 flavoured `consumes`/`produces`/`host` fields,
/// `formData`/`body` parameter locations, and `$ref` pointers anywhere
/// inside a parameter or schema fragment. Immutable for the duration of a
/// build; builders borrow it, never copy it wholesale.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Document { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a reusable object under `components.{section}.{name}`.
    pub fn component(&self, section: &str, name: &str) -> Option<&Value> {
        self.root.get("components")?.get(section)?.get(name)
    }

    /// All registered security schemes, keyed by scheme name.
    ///
    /// Entries that do not deserialize into a scheme definition are
    /// dropped, the same way the route extractor skips unresolvable
    /// scheme references.
    pub fn security_schemes(&self) -> HashMap<String, SecuritySchemeDef> {
        self.root
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, raw)| {
                        serde_json::from_value::<SecuritySchemeDef>(raw.clone())
                            .ok()
                            .map(|def| (name.clone(), def))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Document-level security requirements.
    pub fn security(&self) -> Vec<SecurityRequirement> {
        self.root
            .get("security")
            .and_then(|s| serde_json::from_value(s.clone()).ok())
            .unwrap_or_default()
    }

    /// The first declared server entry, if any.
    pub fn first_server(&self) -> Option<&Value> {
        self.root.get("servers")?.as_array()?.first()
    }

    /// Document-level media-type list (`consumes` or `produces`).
    pub fn media_types(&self, field: &str) -> Vec<String> {
        media_type_list(self.root.get(field))
    }

    /// Document-level host, if declared non-blank.
    pub fn host(&self) -> Option<String> {
        non_blank_string(self.root.get("host"))
    }
}

pub(crate) fn media_type_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
