//! Request assembly.
//!
//! One build is one synchronous, side-effect-free transformation: expand
//! the parameter list, render the path, resolve the headers, then pick the
//! body strategy off the resolved Content-Type. The resulting descriptor
//! is immutable; dispatching it (or recording it as a documentation
//! example) is the consumer's job.

use crate::errors::BuildError;
use crate::expand::expand_parameters;
use crate::request::headers::build_headers;
use crate::request::path::build_path;
use crate::request::payload::{build_payload, Payload};
use crate::request::values::SuppliedValues;
use crate::resolver::{Resolver, DEFAULT_MAX_REF_DEPTH};
use crate::spec::{Document, OperationMeta};
use http::Method;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// A wire-ready request: everything the transport layer needs to execute
/// the call. Constructed once per build, never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// Path including the query string
    pub path: String,
    /// Canonical header name to value
    pub headers: BTreeMap<String, String>,
    pub payload: Option<Payload>,
}

/// Assembles a [`RequestDescriptor`] from one operation's metadata and the
/// caller's supplied values.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    doc: &'a Document,
    op: &'a OperationMeta,
    values: SuppliedValues,
    headers: SuppliedValues,
    host: Option<String>,
    max_ref_depth: usize,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(doc: &'a Document, op: &'a OperationMeta) -> Self {
        RequestBuilder {
            doc,
            op,
            values: SuppliedValues::new(),
            headers: SuppliedValues::new(),
            host: None,
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
        }
    }

    /// Supply parameter values (path, query, formData, body).
    pub fn with_values(mut self, values: SuppliedValues) -> Self {
        self.values = values;
        self
    }

    /// Supply header values.
    pub fn with_headers(mut self, headers: SuppliedValues) -> Self {
        self.headers = headers;
        self
    }

    /// Override the Host header, winning over the document's declaration.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Bound reference-resolution depth (see `REQWIRE_MAX_REF_DEPTH`).
    pub fn with_max_ref_depth(mut self, max_ref_depth: usize) -> Self {
        self.max_ref_depth = max_ref_depth;
        self
    }

    /// Run the full pipeline: expand parameters, render path and headers,
    /// then the payload. Any failure aborts the build.
    pub fn build(&self) -> Result<RequestDescriptor, BuildError> {
        let resolver = Resolver::new(self.doc).with_max_depth(self.max_ref_depth);
        let params =
            expand_parameters(self.doc, self.op, &resolver, &self.values, &self.headers)?;

        let path = build_path(self.doc, self.op, &params, &self.values)?;
        let headers = build_headers(self.op, &params, &self.headers, self.host.as_deref())?;
        let payload = build_payload(&params, &self.values, &headers)?;

        debug!(
            method = %self.op.method,
            path = %path,
            header_count = headers.len(),
            has_payload = payload.is_some(),
            "request assembled"
        );

        Ok(RequestDescriptor {
            method: self.op.method.clone(),
            path,
            headers,
            payload,
        })
    }
}
