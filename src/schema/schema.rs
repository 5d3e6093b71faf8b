use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Keyword,
    Number,
    Date,
    Boolean,
}

/// Field definition with analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    pub analyzer: Option<String>,  // Analyzer name for this field
}

/// Set of fields the engine knows about. Queries and facet requests may
/// only reference fields declared here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldDefinition>,
    pub default_analyzer: String,
}

impl Schema {
    pub fn new() -> Self {
        Schema {
            fields: Vec::new(),
            default_analyzer: "standard".to_string(),
        }
    }

    /// Full-text field, analyzed with the default (stemming) pipeline.
    pub fn add_text_field(mut self, name: &str) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            field_type: FieldType::Text,
            analyzer: None,
        });
        self
    }

    /// Exact-value field, indexed as a single lowercased token.
    pub fn add_keyword_field(mut self, name: &str) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            field_type: FieldType::Keyword,
            analyzer: None,
        });
        self
    }

    pub fn add_date_field(mut self, name: &str) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            field_type: FieldType::Date,
            analyzer: None,
        });
        self
    }

    pub fn add_number_field(mut self, name: &str) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            field_type: FieldType::Number,
            analyzer: None,
        });
        self
    }

    /// Override the analyzer of the most recently added field.
    pub fn with_analyzer(mut self, analyzer: &str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.analyzer = Some(analyzer.to_string());
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Analyzer name for a field: the explicit override if present, the
    /// default pipeline for text fields, the keyword pipeline otherwise.
    pub fn analyzer_for_field(&self, name: &str) -> &str {
        match self.field(name) {
            Some(field) => match &field.analyzer {
                Some(analyzer) => analyzer,
                None => match field.field_type {
                    FieldType::Text => &self.default_analyzer,
                    _ => "keyword",
                },
            },
            None => &self.default_analyzer,
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
