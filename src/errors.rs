use crate::spec::ParameterLocation;
use std::fmt;

/// Fatal request-build error.
///
/// Every variant aborts the current build; there is no partial-result or
/// best-effort mode. Messages carry the offending parameter or pointer so
/// the caller can fix the example values or the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A reference pointer is syntactically malformed or targets a section
    /// outside the components allow-list.
    InvalidReference {
        /// The offending pointer string
        pointer: String,
    },
    /// A well-formed reference pointer does not dereference to any object
    /// in the document.
    UnresolvableReference {
        /// The offending pointer string
        pointer: String,
    },
    /// A reference pointer was revisited within one resolution chain, or
    /// the chain exceeded the configured depth cap.
    ReferenceCycle {
        /// The pointer at which the cycle was detected
        pointer: String,
    },
    /// A path or header parameter required for rendering has no entry in
    /// the supplied mappings.
    MissingValue {
        /// Name of the parameter without a value
        parameter: String,
        /// Where the parameter was declared to live
        location: ParameterLocation,
    },
    /// A declared body parameter has no supplied value.
    MissingBodyParameter {
        /// Name of the body parameter without a value
        parameter: String,
    },
    /// A supplied request-parameter or request-header source is not a
    /// key-value mapping.
    InvalidArgument {
        /// Which supplied source was malformed
        source: String,
    },
    /// A parameter declares a disallowed or unrecognized field.
    InvalidField {
        /// Name of the offending parameter
        parameter: String,
        /// What exactly is wrong with it
        detail: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidReference { pointer } => {
                write!(f, "invalid reference `{}`", pointer)
            }
            BuildError::UnresolvableReference { pointer } => {
                write!(f, "unresolvable reference `{}`", pointer)
            }
            BuildError::ReferenceCycle { pointer } => {
                write!(f, "reference cycle detected while resolving `{}`", pointer)
            }
            BuildError::MissingValue {
                parameter,
                location,
            } => {
                write!(
                    f,
                    "missing value for {} parameter `{}`; supply it alongside the operation's example values",
                    location, parameter
                )
            }
            BuildError::MissingBodyParameter { parameter } => {
                write!(
                    f,
                    "missing body parameter `{}`; bind a value for it with the operation's example values",
                    parameter
                )
            }
            BuildError::InvalidArgument { source } => {
                write!(f, "{} must be a key-value mapping", source)
            }
            BuildError::InvalidField { parameter, detail } => {
                write!(f, "invalid field on parameter `{}`: {}", parameter, detail)
            }
        }
    }
}

impl std::error::Error for BuildError {}
