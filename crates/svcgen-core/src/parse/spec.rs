use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::PathItem;
use super::request_body::RequestBodyOrRef;
use super::schema::SchemaOrRef;

/// Top-level OpenAPI v3 document. Only the pieces the generator consumes
/// are modeled; every other top-level field is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,
}

/// Components object holding reusable definitions reachable via `#/...`
/// pointers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
}
