use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use chrono::{DateTime, Utc};
use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    pub fn new(id: u64) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Boolean(bool),
}

impl FieldValue {
    /// Canonical string form used for keyword indexing and faceting.
    /// Timestamps discretize to day buckets.
    pub fn as_facet_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }
}

/// A unit of indexing. Immutable once indexed; an update is modeled as
/// delete-then-reinsert under the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub fields: HashMap<String, FieldValue>,
}

impl Document {
    pub fn new(id: DocId) -> Self {
        Document {
            id,
            fields: HashMap::new(),
        }
    }

    pub fn add_field(&mut self, name: String, value: FieldValue) {
        self.fields.insert(name, value);
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Build a document from a flat JSON object. Strings become text
    /// fields, numbers and booleans their typed counterparts; nested
    /// values and nulls are rejected.
    pub fn from_json(id: DocId, value: serde_json::Value) -> Result<Self> {
        let object = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::new(
                    ErrorKind::Parse,
                    format!("Expected JSON object, got {}", other),
                ));
            }
        };

        let mut doc = Document::new(id);
        for (name, field) in object {
            let value = match field {
                serde_json::Value::String(s) => FieldValue::Text(s),
                serde_json::Value::Number(n) => {
                    FieldValue::Number(n.as_f64().unwrap_or(0.0))
                }
                serde_json::Value::Bool(b) => FieldValue::Boolean(b),
                other => {
                    return Err(Error::new(
                        ErrorKind::Parse,
                        format!("Unsupported value for field '{}': {}", name, other),
                    ));
                }
            };
            doc.fields.insert(name, value);
        }

        Ok(doc)
    }
}
