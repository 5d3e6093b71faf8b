use std::collections::HashMap;
use roaring::RoaringTreemap;
use serde::{Serialize, Deserialize};
use crate::analysis::token::Token;
use crate::core::types::{DocId, Document};
use crate::index::posting::{Posting, PostingList};

/// Posting key: a normalized term within a named field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldTerm {
    pub field: String,
    pub term: String,
}

impl FieldTerm {
    pub fn new(field: &str, term: &str) -> Self {
        FieldTerm {
            field: field.to_string(),
            term: term.to_string(),
        }
    }
}

/// In-memory inverted index store.
///
/// Holds the term postings, the live-document set, per-document token
/// counts for scoring, and the stored documents themselves (facet
/// aggregation and snapshots read field values back out). The forward
/// map from document to its posting keys makes deletion exact: no stale
/// posting survives an update.
pub struct InvertedIndex {
    postings: HashMap<FieldTerm, PostingList>,
    doc_terms: HashMap<DocId, Vec<FieldTerm>>,
    documents: HashMap<DocId, Document>,
    doc_lengths: HashMap<DocId, u32>,
    live_docs: RoaringTreemap,
    total_tokens: u64,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            doc_terms: HashMap::new(),
            documents: HashMap::new(),
            doc_lengths: HashMap::new(),
            live_docs: RoaringTreemap::new(),
            total_tokens: 0,
        }
    }

    /// Replace all postings of `doc` with freshly analyzed tokens.
    /// All-or-nothing per document: prior postings are dropped first,
    /// then the new ones inserted, under one `&mut self` borrow.
    pub fn upsert(&mut self, doc: Document, analyzed: Vec<(String, Vec<Token>)>) {
        self.delete(doc.id);

        let doc_id = doc.id;
        let mut keys = Vec::new();
        let mut token_count = 0u32;

        for (field, tokens) in analyzed {
            token_count += tokens.len() as u32;

            // Group token positions by term within this field
            let mut term_positions: HashMap<String, Vec<u32>> = HashMap::new();
            for token in tokens {
                term_positions.entry(token.text).or_default().push(token.position);
            }

            for (term, positions) in term_positions {
                let key = FieldTerm {
                    field: field.clone(),
                    term,
                };
                let posting = Posting {
                    doc_id,
                    term_freq: positions.len() as u32,
                    positions,
                };

                self.postings.entry(key.clone()).or_default().add_posting(posting);
                keys.push(key);
            }
        }

        self.doc_terms.insert(doc_id, keys);
        self.doc_lengths.insert(doc_id, token_count);
        self.total_tokens += token_count as u64;
        self.live_docs.insert(doc_id.0);
        self.documents.insert(doc_id, doc);
    }

    /// Remove all postings for the id; no-op if absent.
    pub fn delete(&mut self, doc_id: DocId) -> bool {
        let keys = match self.doc_terms.remove(&doc_id) {
            Some(keys) => keys,
            None => return false,
        };

        for key in keys {
            if let Some(list) = self.postings.get_mut(&key) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.postings.remove(&key);
                }
            }
        }

        if let Some(length) = self.doc_lengths.remove(&doc_id) {
            self.total_tokens -= length as u64;
        }
        self.live_docs.remove(doc_id.0);
        self.documents.remove(&doc_id);

        true
    }

    /// Postings for a (field, term) pair, ordered by doc id. Empty slice
    /// if the term is absent, never an error.
    pub fn postings_for(&self, field: &str, term: &str) -> &[Posting] {
        self.postings
            .get(&FieldTerm::new(field, term))
            .map(|list| list.postings.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.live_docs.contains(doc_id.0)
    }

    pub fn live_docs(&self) -> &RoaringTreemap {
        &self.live_docs
    }

    pub fn doc_count(&self) -> u64 {
        self.live_docs.len()
    }

    pub fn document(&self, doc_id: DocId) -> Option<&Document> {
        self.documents.get(&doc_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn avg_doc_length(&self) -> f32 {
        let count = self.doc_count();
        if count == 0 {
            0.0
        } else {
            self.total_tokens as f32 / count as f32
        }
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}
