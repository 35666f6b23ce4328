mod build;
mod document;
mod load;
mod types;

pub use build::{extract_operations, find_operation};
pub use document::Document;
pub use load::{load_document, load_operations};
pub use types::{
    OperationMeta, ParameterLocation, ParameterMeta, ParameterStyle, SecurityRequirement,
    SecuritySchemeDef,
};
