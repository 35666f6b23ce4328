mod builder;
mod headers;
mod path;
mod payload;
mod values;

pub use builder::{RequestBuilder, RequestDescriptor};
pub use headers::{build_headers, canonical_header_name};
pub use path::{build_path, encode_query_param};
pub use payload::{build_payload, Payload};
pub use values::SuppliedValues;
