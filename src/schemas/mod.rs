pub mod schema;
pub mod validation;

pub use schema::{request_schema, SchemaHandle};
pub use validation::{decode_body, parse_request};
