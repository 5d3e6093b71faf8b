use serde::{Serialize, Deserialize};

/// Main query enum representing all query types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Keyword(KeywordQuery),   // Analyzed match on one field
    Bool(BoolQuery),         // Boolean combinations
    MatchAll,                // Match all live documents
}

impl Query {
    pub fn keyword(field: &str, text: &str) -> Self {
        Query::Keyword(KeywordQuery {
            field: field.to_string(),
            text: text.to_string(),
        })
    }
}

/// Keyword query: the text runs through the field's analyzer, so query
/// and index agree on stemming. Multi-word text is conjunctive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordQuery {
    pub field: String,
    pub text: String,
}

/// Boolean query with must/should/must_not clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    pub must: Vec<Query>,      // All must match (AND)
    pub should: Vec<Query>,    // At least one must match (OR)
    pub must_not: Vec<Query>,  // None must match (NOT)
}

impl BoolQuery {
    pub fn new() -> Self {
        BoolQuery {
            must: Vec::new(),
            should: Vec::new(),
            must_not: Vec::new(),
        }
    }

    pub fn with_must(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    pub fn with_should(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    pub fn with_must_not(mut self, query: Query) -> Self {
        self.must_not.push(query);
        self
    }
}

impl Default for BoolQuery {
    fn default() -> Self {
        Self::new()
    }
}
