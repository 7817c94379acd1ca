use jsonschema::{Draft, JSONSchema};
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde_json::Value;
use std::{
    any::type_name,
    sync::{Arc, OnceLock},
};

use crate::{
    error::{ItineraryError, Result},
    types::ItineraryRequest,
};

/// Cached JSON schema for a request type, plus its compiled validator.
#[derive(Clone)]
pub struct SchemaHandle {
    schema_name: &'static str,
    schema_json: Arc<Value>,
    compiled: Arc<JSONSchema>,
}

impl std::fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaHandle")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaHandle {
    pub fn for_type<T: JsonSchema>() -> Result<Self> {
        Self::from_root_schema(short_type_name::<T>(), schema_for!(T))
    }

    pub fn from_root_schema(schema_name: &'static str, root: RootSchema) -> Result<Self> {
        let schema_json = serde_json::to_value(root)?;
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|err| {
                ItineraryError::Config(format!(
                    "Failed to prepare `{}` schema for validation: {}",
                    schema_name, err
                ))
            })?;

        Ok(Self {
            schema_name,
            schema_json: Arc::new(schema_json),
            compiled: Arc::new(compiled),
        })
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    pub fn validator(&self) -> &JSONSchema {
        self.compiled.as_ref()
    }
}

/// Schema for [`ItineraryRequest`], built once per process
pub fn request_schema() -> Result<&'static SchemaHandle> {
    static SCHEMA: OnceLock<SchemaHandle> = OnceLock::new();

    if let Some(schema) = SCHEMA.get() {
        return Ok(schema);
    }
    let handle = SchemaHandle::for_type::<ItineraryRequest>()?;
    Ok(SCHEMA.get_or_init(|| handle))
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
