use http::Method;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Where a declared parameter lives in the request.
///
/// This tool builds outbound requests from documents that may still carry
/// Swagger-2 flavoured declarations, so `formData` and `body` are
/// first-class locations alongside the OpenAPI 3 trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

impl ParameterLocation {
    /// Parse the document spelling of a location (the `in` field).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "formData" => Some(ParameterLocation::FormData),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialization strategy for composite parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterStyle {
    Form,
    Matrix,
    Label,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl ParameterStyle {
    /// Parse the document spelling of a style (the `style` field).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "form" => Some(ParameterStyle::Form),
            "matrix" => Some(ParameterStyle::Matrix),
            "label" => Some(ParameterStyle::Label),
            "spaceDelimited" => Some(ParameterStyle::SpaceDelimited),
            "pipeDelimited" => Some(ParameterStyle::PipeDelimited),
            "deepObject" => Some(ParameterStyle::DeepObject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterStyle::Form => "form",
            ParameterStyle::Matrix => "matrix",
            ParameterStyle::Label => "label",
            ParameterStyle::SpaceDelimited => "spaceDelimited",
            ParameterStyle::PipeDelimited => "pipeDelimited",
            ParameterStyle::DeepObject => "deepObject",
        }
    }
}

impl std::fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully-resolved parameter descriptor.
///
/// Produced by the expander from resolved document fragments; every
/// downstream builder consumes these. `legacy_type` carries a top-level
/// `type` field so the query builder can reject the pre-3.0 form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<Value>,
    pub style: Option<ParameterStyle>,
    pub explode: Option<bool>,
    pub legacy_type: Option<Value>,
}

/// A security requirement: scheme name to the scopes it is invoked with.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// A security scheme as registered under `components.securitySchemes`.
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySchemeDef {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "in", default)]
    pub location: Option<String>,
}

/// Per-operation metadata extracted from the document's `paths` map.
///
/// Parameter fragments are kept raw (they may contain `$ref` pointers);
/// the expander resolves and parses them. `consumes`, `produces`, and
/// `host` already carry the document-level fallback.
#[derive(Debug, Clone)]
pub struct OperationMeta {
    pub method: Method,
    pub path: String,
    pub operation_id: Option<String>,
    pub parameters: Vec<Value>,
    pub path_item_parameters: Vec<Value>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub host: Option<String>,
}

impl OperationMeta {
    /// Selector used by the CLI and lookup helpers: the `operationId` when
    /// declared, otherwise `VERB /path`.
    pub fn selector(&self) -> String {
        self.operation_id
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method, self.path))
    }
}
