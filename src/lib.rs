//! # reqwire
//!
//! **reqwire** turns an OpenAPI operation description plus a set of
//! concrete example values into a wire-ready HTTP request descriptor:
//! method, resolved path with query string, canonical header map, and a
//! serialized body. Dispatching the request and writing generated
//! documentation are the callers' jobs; this crate owns the hard middle.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`spec`]** - document loading and per-operation metadata extraction
//! - **[`resolver`]** - pure, cycle-guarded `$ref` resolution of document
//!   fragments
//! - **[`security`]** - synthetic parameters derived from security
//!   requirements
//! - **[`expand`]** - parameter merging, de-duplication, and filtering
//! - **[`request`]** - path/query rendering, header assembly, payload
//!   selection, and the [`RequestBuilder`] that orchestrates one build
//! - **[`errors`]** - the fatal error taxonomy for a build
//! - **[`runtime_config`]** - environment-variable configuration
//! - **[`cli`]** - the `reqwire` binary's command surface
//!
//! One build walks the pipeline in order: the expander resolves and merges
//! parameters (pulling in security-derived ones), then path, headers, and
//! payload are rendered in sequence — the payload branch keys off the
//! already-resolved Content-Type header.
//!
//! ## Example
//!
//! ```rust
//! use reqwire::{extract_operations, Document, RequestBuilder, SuppliedValues};
//! use serde_json::json;
//!
//! let doc = Document::new(json!({
//!     "paths": {
//!         "/pets/{id}": {
//!             "get": {
//!                 "operationId": "get_pet",
//!                 "parameters": [
//!                     { "name": "id", "in": "path", "required": true,
//!                       "schema": { "type": "string" } }
//!                 ]
//!             }
//!         }
//!     }
//! }));
//!
//! let operations = extract_operations(&doc);
//! let op = reqwire::find_operation(&operations, "get_pet").unwrap();
//!
//! let values =
//!     SuppliedValues::from_value("request parameters", &json!({ "id": "42" })).unwrap();
//! let request = RequestBuilder::new(&doc, op).with_values(values).build().unwrap();
//!
//! assert_eq!(request.method, http::Method::GET);
//! assert_eq!(request.path, "/pets/42");
//! ```
//!
//! ## Concurrency
//!
//! A build is synchronous and side-effect free: the document is borrowed
//! immutably and resolution returns new fragments, so any number of
//! builds may share one document across threads.

pub mod cli;
pub mod errors;
pub mod expand;
pub mod request;
pub mod resolver;
pub mod runtime_config;
pub mod security;
pub mod spec;

pub use errors::BuildError;
pub use expand::expand_parameters;
pub use request::{
    encode_query_param, Payload, RequestBuilder, RequestDescriptor, SuppliedValues,
};
pub use resolver::{Resolver, DEFAULT_MAX_REF_DEPTH};
pub use security::derive_security_params;
pub use spec::{
    extract_operations, find_operation, load_document, load_operations, Document, OperationMeta,
    ParameterLocation, ParameterMeta, ParameterStyle, SecurityRequirement, SecuritySchemeDef,
};
