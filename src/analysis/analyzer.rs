use rust_stemmers::Algorithm;
use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{KeywordTokenizer, StandardTokenizer, Tokenizer};
use crate::core::error::{Error, ErrorKind, Result};

/// Text analysis pipeline: a tokenizer followed by a filter chain.
/// Analysis is deterministic and idempotent; queries and documents run
/// through the same pipeline so stemming equivalence holds.
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Standard full-text analyzer: lowercase, stopword removal, English
    /// stemming.
    pub fn standard_english() -> Self {
        Analyzer::new("standard".to_string(),
                      Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(StopWordFilter::english()))
            .add_filter(Box::new(StemmerFilter::new(Algorithm::English)))
    }

    /// Exact-value analyzer: the whole input as one lowercased token.
    pub fn keyword() -> Self {
        Analyzer::new("keyword".to_string(), Box::new(KeywordTokenizer))
            .add_filter(Box::new(LowercaseFilter))
    }
}

/// Registry for managing analyzers
pub struct AnalyzerRegistry {
    analyzers: RwLock<HashMap<String, Arc<Analyzer>>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        let registry = AnalyzerRegistry {
            analyzers: RwLock::new(HashMap::new()),
        };

        registry.register("standard", Analyzer::standard_english());
        registry.register("keyword", Analyzer::keyword());
        registry
    }

    pub fn register(&self, name: &str, analyzer: Analyzer) {
        self.analyzers.write().insert(name.to_string(), Arc::new(analyzer));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Analyzer>> {
        self.analyzers.read().get(name).cloned()
    }

    pub fn analyze(&self, analyzer_name: &str, text: &str) -> Result<Vec<Token>> {
        self.get(analyzer_name)
            .map(|analyzer| analyzer.analyze(text))
            .ok_or_else(|| Error {
                kind: ErrorKind::InvalidConfiguration,
                context: format!("Analyzer '{}' not registered", analyzer_name),
            })
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
