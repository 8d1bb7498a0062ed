//! Document conventions the descriptor builder assumes.
//!
//! These mirror the conventions of the API backend the generator targets:
//! a single recognized path placeholder, JSON-only bodies, a `default`
//! success response, and a two-layer `allOf` response envelope whose second
//! member carries the payload under `data`.

/// The only path placeholder recognized as a route parameter. `{userId}`
/// and friends are deliberately not treated as parameterized routes.
pub const PATH_PARAM: &str = "{id}";

/// Media type consulted for request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Response key treated as the success response. Status-code keys such as
/// `200` are not inspected.
pub const DEFAULT_RESPONSE: &str = "default";

/// Index of the payload member in the response envelope's `allOf` list.
/// Index 0 is the shared envelope wrapper and is ignored.
pub const ENVELOPE_PAYLOAD_INDEX: usize = 1;

/// Property of the envelope payload member that holds the actual response
/// schema.
pub const ENVELOPE_DATA_PROPERTY: &str = "data";

/// HTTP methods recognized on a path item. Other path-item keys
/// (`summary`, path-level `parameters`, ...) are skipped.
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete"];
