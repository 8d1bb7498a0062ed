use serde::Deserialize;

use super::schema::SchemaOrRef;

/// A media type object. Only the schema is consumed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}
