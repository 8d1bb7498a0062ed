use std::fmt;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use crate::conventions::HTTP_METHODS;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,
}

/// A path item. Operations are kept in document declaration order; keys
/// that are not recognized HTTP methods (`summary`, path-level
/// `parameters`, ...) are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub operations: IndexMap<String, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path item object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut operations = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if HTTP_METHODS.contains(&key.as_str()) {
                        let op: Operation = map.next_value()?;
                        operations.insert(key, op);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(PathItem { operations })
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}
