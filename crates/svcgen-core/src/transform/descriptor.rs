//! Per-operation descriptor building.
//!
//! One pass over the document's filtered, sorted path set produces two
//! parallel ordered lists: service descriptors (everything the services
//! template needs) and type descriptors (the resolved schemas the types
//! emitter compiles into `IParams` / `IBody` / `IRes` members).

use std::collections::HashSet;

use serde::Serialize;

use crate::conventions::{
    DEFAULT_RESPONSE, ENVELOPE_DATA_PROPERTY, ENVELOPE_PAYLOAD_INDEX, JSON_MEDIA_TYPE,
};
use crate::error::TransformError;
use crate::parse::operation::Operation;
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::Resolver;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::spec::Document;

use super::naming;
use super::required::complete_required;

/// The rendered type name for absent parameter and body slots.
const UNDEFINED_TYPE: &str = "undefined";

/// The rendered type name for operations without a `default` response.
const VOID_TYPE: &str = "void";

/// Everything the services template needs for one operation. Constructed
/// once, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub namespace: String,
    pub summary: String,
    pub path: String,
    pub tags: String,
    pub name: String,
    pub is_param_path: bool,
    pub has_params: bool,
    pub params_type: String,
    pub has_body: bool,
    pub body_type: String,
    pub method: String,
    pub has_response: bool,
    pub response_type: String,
    pub request_path: String,
}

/// A query-position parameter surfaced in an `IParams` interface.
#[derive(Debug, Clone)]
pub struct QueryParameter {
    pub name: String,
    pub required: bool,
    pub schema: Option<SchemaOrRef>,
}

/// The resolved schemas behind one operation's namespace. Each member is
/// independently optional; absence means the corresponding interface text
/// is simply not emitted.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub namespace: String,
    pub summary: String,
    pub path: String,
    pub tags: String,
    pub query_params: Vec<QueryParameter>,
    pub body_schema: Option<Schema>,
    pub response_schema: Option<Schema>,
}

/// Ordered output of one build pass. Both lists run in the same order:
/// path keys sorted lexicographically, methods in declaration order.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    pub services: Vec<ServiceDescriptor>,
    pub types: Vec<TypeDescriptor>,
}

/// Path filtering and rewriting options, taken from the configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Prefix stripped from every path before naming and type derivation.
    pub base_url: Option<String>,
    /// When non-empty, only these document paths are retained.
    pub include_paths: Vec<String>,
    /// Document paths removed after the include filter; exclusion wins for
    /// paths present in both.
    pub exclude_paths: Vec<String>,
}

/// Build the descriptor set for every operation in the document.
pub fn build(doc: &Document, options: &BuildOptions) -> Result<DescriptorSet, TransformError> {
    let mut path_keys: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
    path_keys.sort_unstable();

    if !options.include_paths.is_empty() {
        let include: HashSet<&str> = options.include_paths.iter().map(String::as_str).collect();
        path_keys.retain(|p| include.contains(p));
    }
    if !options.exclude_paths.is_empty() {
        let exclude: HashSet<&str> = options.exclude_paths.iter().map(String::as_str).collect();
        path_keys.retain(|p| !exclude.contains(p));
    }

    log::debug!("building descriptors for {} paths", path_keys.len());

    let mut resolver = Resolver::new(doc);
    let mut set = DescriptorSet::default();

    for key in path_keys {
        let item = &doc.paths[key];
        for (method, op) in &item.operations {
            let path = effective_path(key, options);
            set.services.push(build_service(path, method, op));
            set.types
                .push(build_types(&mut resolver, path, method, op)?);
        }
    }

    Ok(set)
}

/// The path as the generated client sees it: the configured base URL is
/// stripped as a prefix before any derivation.
fn effective_path<'a>(path: &'a str, options: &BuildOptions) -> &'a str {
    match options.base_url.as_deref() {
        Some(base) if !base.is_empty() => path.strip_prefix(base).unwrap_or(path),
        _ => path,
    }
}

fn build_service(path: &str, method: &str, op: &Operation) -> ServiceDescriptor {
    let namespace = naming::namespace(method, path);
    let is_param_path = naming::is_param_path(path);
    let has_params = !op.parameters.is_empty();
    let has_body = op.request_body.is_some();
    let has_response = op.responses.contains_key(DEFAULT_RESPONSE);

    let params_type = if !has_params {
        UNDEFINED_TYPE.to_string()
    } else if is_param_path {
        first_param_primitive(op)
    } else {
        format!("{namespace}.IParams")
    };
    let body_type = if has_body {
        format!("{namespace}.IBody")
    } else {
        UNDEFINED_TYPE.to_string()
    };
    let response_type = if has_response {
        format!("{namespace}.IRes")
    } else {
        VOID_TYPE.to_string()
    };

    ServiceDescriptor {
        namespace,
        summary: op.summary.clone().unwrap_or_default(),
        path: path.to_string(),
        tags: op.tags.join(","),
        name: naming::operation_name(method, path),
        is_param_path,
        has_params,
        params_type,
        has_body,
        body_type,
        method: method.to_string(),
        has_response,
        response_type,
        request_path: naming::request_path(path),
    }
}

/// The primitive `type` keyword of the first declared parameter's schema.
/// By convention the path parameter is listed first; any gap along the
/// lookup falls back to `undefined`.
fn first_param_primitive(op: &Operation) -> String {
    op.parameters
        .first()
        .and_then(|p| match p {
            ParameterOrRef::Parameter(param) => param.schema.as_ref(),
            ParameterOrRef::Ref { .. } => None,
        })
        .and_then(|s| match s {
            SchemaOrRef::Schema(schema) => schema.schema_type,
            SchemaOrRef::Ref { .. } => None,
        })
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| UNDEFINED_TYPE.to_string())
}

fn build_types(
    resolver: &mut Resolver<'_>,
    path: &str,
    method: &str,
    op: &Operation,
) -> Result<TypeDescriptor, TransformError> {
    let is_param_path = naming::is_param_path(path);

    // `{id}` routes pass their single path parameter positionally, so they
    // never get an `IParams` interface.
    let query_params = if !op.parameters.is_empty() && !is_param_path {
        op.parameters
            .iter()
            .filter_map(|p| match p {
                ParameterOrRef::Parameter(param)
                    if param.location == ParameterLocation::Query =>
                {
                    Some(QueryParameter {
                        name: param.name.clone(),
                        required: param.required,
                        schema: param.schema.clone(),
                    })
                }
                _ => None,
            })
            .collect()
    } else {
        Vec::new()
    };

    let body_schema = match &op.request_body {
        Some(body) => body_payload(resolver, body)?.map(|s| complete_required(&s)),
        None => None,
    };

    let response_schema = match envelope_payload(op) {
        Some(node) => {
            let deref = resolver.dereference(node)?;
            Some(complete_required(&deref))
        }
        None => None,
    };

    Ok(TypeDescriptor {
        namespace: naming::namespace(method, path),
        summary: op.summary.clone().unwrap_or_default(),
        path: path.to_string(),
        tags: op.tags.join(","),
        query_params,
        body_schema,
        response_schema,
    })
}

/// The request body's JSON-media-type schema with any top-level `$ref`
/// resolved one level. Nested refs are left for the compiler to name; a
/// missing media type or schema is a legitimate "no body type" state.
fn body_payload(
    resolver: &Resolver<'_>,
    body: &RequestBodyOrRef,
) -> Result<Option<Schema>, TransformError> {
    let body = match body {
        RequestBodyOrRef::RequestBody(rb) => rb.clone(),
        RequestBodyOrRef::Ref { ref_path } => resolver.request_body(ref_path)?,
    };
    match body.content.get(JSON_MEDIA_TYPE).and_then(|mt| mt.schema.as_ref()) {
        Some(node) => Ok(Some(resolver.resolve_once(node)?)),
        None => Ok(None),
    }
}

/// Extract the payload schema from the fixed response envelope:
/// `responses.default.content["application/json"].schema.allOf[1]
/// .properties.data`. Any absence along the way means "no response type".
fn envelope_payload(op: &Operation) -> Option<&SchemaOrRef> {
    let response = match op.responses.get(DEFAULT_RESPONSE)? {
        ResponseOrRef::Response(r) => r,
        ResponseOrRef::Ref { .. } => return None,
    };
    let media = response.content.get(JSON_MEDIA_TYPE)?;
    let schema = match media.schema.as_ref()? {
        SchemaOrRef::Schema(s) => s,
        SchemaOrRef::Ref { .. } => return None,
    };
    let payload = match schema.all_of.get(ENVELOPE_PAYLOAD_INDEX)? {
        SchemaOrRef::Schema(s) => s,
        SchemaOrRef::Ref { .. } => return None,
    };
    payload.properties.get(ENVELOPE_DATA_PROPERTY)
}
