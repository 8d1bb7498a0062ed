pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::Document;

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_json::from_str(input)?;
    Ok(doc)
}
