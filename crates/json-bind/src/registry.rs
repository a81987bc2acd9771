//! SchemaRegistry: record schemas keyed by record type, frozen after
//! initialization.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::{FieldSpec, Schema};

/// Collects schemas during startup. Consumed by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistryBuilder {
    /// Register a schema from its fields and add it to the registry.
    pub fn register(
        &mut self,
        record_type: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Arc<Schema>> {
        let record_type = record_type.into();
        if self.schemas.contains_key(&record_type) {
            return Err(Error::DuplicateRecordType { record_type });
        }
        let schema = Schema::register(record_type, fields)?;
        self.insert(Arc::clone(&schema))?;
        Ok(schema)
    }

    /// Add an already registered schema, e.g. one shared as a nested kind.
    pub fn insert(&mut self, schema: Arc<Schema>) -> Result<()> {
        match self.schemas.entry(schema.record_type().to_owned()) {
            Entry::Occupied(entry) => Err(Error::DuplicateRecordType {
                record_type: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(schema);
                Ok(())
            }
        }
    }

    pub fn build(self) -> SchemaRegistry {
        tracing::debug!(schemas = self.schemas.len(), "schema registry frozen");
        SchemaRegistry {
            schemas: Arc::new(self.schemas),
        }
    }
}

/// Read-only schema lookup. Cheap to clone and share between threads.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Arc<HashMap<String, Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    pub fn get(&self, record_type: &str) -> Option<Arc<Schema>> {
        self.schemas.get(record_type).cloned()
    }

    pub fn contains(&self, record_type: &str) -> bool {
        self.schemas.contains_key(record_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered record types, sorted.
    pub fn record_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}
