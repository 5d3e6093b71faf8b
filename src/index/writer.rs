use std::sync::Arc;
use log::debug;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::analysis::token::Token;
use crate::core::error::Result;
use crate::core::types::{DocId, Document};
use crate::index::inverted::InvertedIndex;
use crate::schema::schema::Schema;

/// Single-writer indexer. Mutations are serialized through `lock`;
/// readers go through the shared `RwLock` and are only blocked while a
/// mutation or a rebuild swap holds the write side.
pub struct IndexWriter {
    index: Arc<RwLock<InvertedIndex>>,
    schema: Schema,
    analyzers: Arc<AnalyzerRegistry>,
    lock: Mutex<()>,
}

impl IndexWriter {
    pub fn new(
        index: Arc<RwLock<InvertedIndex>>,
        schema: Schema,
        analyzers: Arc<AnalyzerRegistry>,
    ) -> Self {
        IndexWriter {
            index,
            schema,
            analyzers,
            lock: Mutex::new(()),
        }
    }

    /// Analyze and (re)index one document. Analysis happens before the
    /// index write lock is taken, so readers only wait for the swap of
    /// posting lists, not for tokenization.
    pub fn upsert(&self, doc: Document) -> Result<()> {
        let _writer = self.lock.lock();

        let analyzed = analyze_document(&self.schema, &self.analyzers, &doc)?;
        debug!("upsert doc {} ({} fields)", doc.id.0, analyzed.len());
        self.index.write().upsert(doc, analyzed);

        Ok(())
    }

    /// Remove one document; returns false if the id was not indexed.
    pub fn delete(&self, doc_id: DocId) -> Result<bool> {
        let _writer = self.lock.lock();

        let removed = self.index.write().delete(doc_id);
        debug!("delete doc {} (removed: {})", doc_id.0, removed);

        Ok(removed)
    }

    /// Full reindex. The corpus is analyzed off-line (in parallel) and
    /// assembled into a fresh index; queries are blocked only while the
    /// rebuilt index is swapped in.
    pub fn rebuild(&self, corpus: Vec<Document>) -> Result<()> {
        let _writer = self.lock.lock();

        let analyzed: Vec<(Document, Vec<(String, Vec<Token>)>)> = corpus
            .into_par_iter()
            .map(|doc| {
                analyze_document(&self.schema, &self.analyzers, &doc)
                    .map(|tokens| (doc, tokens))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rebuilt = InvertedIndex::new();
        for (doc, tokens) in analyzed {
            rebuilt.upsert(doc, tokens);
        }
        debug!("rebuild complete: {} documents", rebuilt.doc_count());

        *self.index.write() = rebuilt;
        Ok(())
    }
}

/// Analyze every schema field present on the document with the field's
/// configured analyzer. Fields the schema does not declare are stored
/// but not indexed.
fn analyze_document(
    schema: &Schema,
    analyzers: &AnalyzerRegistry,
    doc: &Document,
) -> Result<Vec<(String, Vec<Token>)>> {
    let mut analyzed = Vec::with_capacity(doc.fields.len());

    for (name, value) in &doc.fields {
        if !schema.has_field(name) {
            debug!("field '{}' not in schema, stored unindexed", name);
            continue;
        }

        let analyzer_name = schema.analyzer_for_field(name);
        let tokens = analyzers.analyze(analyzer_name, &value.as_facet_value())?;
        analyzed.push((name.clone(), tokens));
    }

    Ok(analyzed)
}
