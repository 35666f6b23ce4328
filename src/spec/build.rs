use super::document::{media_type_list, non_blank_string, Document};
use super::types::{OperationMeta, SecurityRequirement};
use http::Method;
use serde_json::Value;

const METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

fn parse_method(verb: &str) -> Option<Method> {
    match verb {
        "get" => Some(Method::GET),
        "post" => Some(Method::POST),
        "put" => Some(Method::PUT),
        "delete" => Some(Method::DELETE),
        "patch" => Some(Method::PATCH),
        "options" => Some(Method::OPTIONS),
        "head" => Some(Method::HEAD),
        "trace" => Some(Method::TRACE),
        _ => None,
    }
}

fn parameter_fragments(value: Option<&Value>) -> Vec<Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.to_vec())
        .unwrap_or_default()
}

fn security_requirements(value: Option<&Value>) -> Option<Vec<SecurityRequirement>> {
    value.and_then(|s| serde_json::from_value(s.clone()).ok())
}

/// Extract per-operation metadata from the document's `paths` map.
///
/// Walks every path item and every known HTTP verb key, carrying raw
/// parameter fragments from both the operation and the path item (they may
/// contain `$ref` pointers; the expander resolves them later). Operation
/// level `security`, `consumes`, `produces`, and `host` fall back to the
/// document level here, so downstream builders read one place.
pub fn extract_operations(doc: &Document) -> Vec<OperationMeta> {
    let mut out = Vec::new();
    let paths = match doc.root().get("paths").and_then(Value::as_object) {
        Some(map) => map,
        None => return out,
    };

    for (path, item) in paths {
        let item_params = parameter_fragments(item.get("parameters"));
        for verb in METHODS {
            let operation = match item.get(verb) {
                Some(op) => op,
                None => continue,
            };
            let method = match parse_method(verb) {
                Some(m) => m,
                None => continue,
            };

            let consumes = {
                let own = media_type_list(operation.get("consumes"));
                if own.is_empty() {
                    doc.media_types("consumes")
                } else {
                    own
                }
            };
            let produces = {
                let own = media_type_list(operation.get("produces"));
                if own.is_empty() {
                    doc.media_types("produces")
                } else {
                    own
                }
            };

            out.push(OperationMeta {
                method,
                path: path.clone(),
                operation_id: operation
                    .get("operationId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                parameters: parameter_fragments(operation.get("parameters")),
                path_item_parameters: item_params.clone(),
                security: security_requirements(operation.get("security")),
                consumes,
                produces,
                host: non_blank_string(operation.get("host")).or_else(|| doc.host()),
            });
        }
    }
    out
}

/// Find an operation by `operationId` or by `"VERB /path"` selector.
pub fn find_operation<'a>(
    operations: &'a [OperationMeta],
    selector: &str,
) -> Option<&'a OperationMeta> {
    operations
        .iter()
        .find(|op| op.operation_id.as_deref() == Some(selector))
        .or_else(|| {
            let (verb, path) = selector.split_once(' ')?;
            operations
                .iter()
                .find(|op| op.method.as_str().eq_ignore_ascii_case(verb) && op.path == path)
        })
}
