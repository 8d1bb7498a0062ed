use std::collections::HashSet;

use indexmap::IndexMap;

use super::request_body::{RequestBody, RequestBodyOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::{Components, Document};
use crate::error::ResolveError;

/// Resolves `#/components/...` pointers against a document and rewrites
/// schema subtrees so that no `$ref` node remains.
///
/// Resolution always starts fresh from the document; nothing is cached and
/// the document itself is never mutated. Circular reference chains are
/// detected with a visited set and rejected.
pub struct Resolver<'a> {
    components: Option<&'a Components>,
    visited: HashSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            components: doc.components.as_ref(),
            visited: HashSet::new(),
        }
    }

    /// Look up the schema a `#/components/schemas/...` pointer names.
    /// One transitive hop is followed when the component entry is itself an
    /// alias reference.
    pub fn schema(&self, pointer: &str) -> Result<Schema, ResolveError> {
        let name = parse_ref_name(pointer, "schemas")?;
        let entry = self
            .components
            .and_then(|c| c.schemas.get(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(pointer.to_string()))?;
        match entry {
            SchemaOrRef::Schema(schema) => Ok(schema.as_ref().clone()),
            SchemaOrRef::Ref { ref_path: inner } => {
                let inner_name = parse_ref_name(inner, "schemas")?;
                match self.components.and_then(|c| c.schemas.get(inner_name)) {
                    Some(SchemaOrRef::Schema(schema)) => Ok(schema.as_ref().clone()),
                    _ => Err(ResolveError::RefTargetNotFound(pointer.to_string())),
                }
            }
        }
    }

    /// Look up the request body a `#/components/requestBodies/...` pointer
    /// names.
    pub fn request_body(&self, pointer: &str) -> Result<RequestBody, ResolveError> {
        let name = parse_ref_name(pointer, "requestBodies")?;
        self.components
            .and_then(|c| c.request_bodies.get(name))
            .and_then(|rb| match rb {
                RequestBodyOrRef::RequestBody(body) => Some(body.clone()),
                RequestBodyOrRef::Ref { .. } => None,
            })
            .ok_or_else(|| ResolveError::RefTargetNotFound(pointer.to_string()))
    }

    /// Resolve the top level of a schema node once, leaving nested `$ref`s
    /// in place.
    pub fn resolve_once(&self, node: &SchemaOrRef) -> Result<Schema, ResolveError> {
        match node {
            SchemaOrRef::Ref { ref_path } => self.schema(ref_path),
            SchemaOrRef::Schema(schema) => Ok(schema.as_ref().clone()),
        }
    }

    /// Deep rewrite: produce an equivalent schema in which every `$ref`
    /// node, however deeply nested, has been replaced by its resolved
    /// target. Re-running the rewrite on its own output is a no-op.
    pub fn dereference(&mut self, node: &SchemaOrRef) -> Result<Schema, ResolveError> {
        match node {
            SchemaOrRef::Ref { ref_path } => {
                if self.visited.contains(ref_path) {
                    return Err(ResolveError::CircularRef(ref_path.clone()));
                }
                self.visited.insert(ref_path.clone());
                let target = self.schema(ref_path)?;
                let result = self.dereference(&SchemaOrRef::Schema(Box::new(target)));
                self.visited.remove(ref_path);
                result
            }
            SchemaOrRef::Schema(schema) => self.dereference_schema(schema),
        }
    }

    fn dereference_schema(&mut self, schema: &Schema) -> Result<Schema, ResolveError> {
        let mut resolved = schema.clone();

        let mut properties = IndexMap::new();
        for (name, prop) in &schema.properties {
            let inner = self.dereference(prop)?;
            properties.insert(name.clone(), SchemaOrRef::Schema(Box::new(inner)));
        }
        resolved.properties = properties;

        if let Some(ref items) = schema.items {
            let inner = self.dereference(items)?;
            resolved.items = Some(Box::new(SchemaOrRef::Schema(Box::new(inner))));
        }

        resolved.all_of = schema
            .all_of
            .iter()
            .map(|sub| Ok(SchemaOrRef::Schema(Box::new(self.dereference(sub)?))))
            .collect::<Result<Vec<_>, ResolveError>>()?;

        Ok(resolved)
    }
}

/// Parse a `$ref` pointer like `#/components/schemas/Foo` and extract the
/// component name.
fn parse_ref_name<'a>(pointer: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = pointer
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(pointer.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(pointer.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, pointer
        )));
    }
    Ok(name)
}
