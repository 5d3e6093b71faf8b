use std::path::Path;
use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Serialize, Deserialize};
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::analysis::token::Token;
use crate::core::config::{Config, ScorerKind};
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document};
use crate::facet::engine::{FacetEngine, FacetSelection, FacetValue};
use crate::facet::request::FacetingRequest;
use crate::index::inverted::InvertedIndex;
use crate::index::writer::IndexWriter;
use crate::query::ast::Query;
use crate::query::executor::QueryExecutor;
use crate::query::results::{ResultSet, ScoredDocument};
use crate::schema::schema::Schema;
use crate::scoring::scorer::{BM25Scorer, Scorer, TfIdfScorer};
use crate::storage::snapshot;

/// Single document mutation. Applied mutations are visible to every
/// query issued after the call returns (read-after-write within one
/// logical session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mutation {
    Index(Document),
    Update(DocId, Document),
    Delete(DocId),
}

/// Engine handle: documents in, queries and facet requests in, ranked
/// results and facet counts out.
///
/// Every operation goes through this explicit handle. Mutations are
/// serialized by the writer; queries are read-only and run concurrently,
/// observing the index as of the moment they acquire the read side
/// (writes committed after a query begins need not be visible to it).
pub struct Engine {
    schema: Schema,
    config: Config,
    analyzers: Arc<AnalyzerRegistry>,
    index: Arc<RwLock<InvertedIndex>>,
    writer: IndexWriter,
    executor: QueryExecutor,
    facets: FacetEngine,
    scorer: Box<dyn Scorer>,
}

impl Engine {
    pub fn open(schema: Schema, config: Config) -> Result<Self> {
        let analyzers = Arc::new(AnalyzerRegistry::new());

        // Fail on dangling analyzer references now, not at first index
        for field in &schema.fields {
            let name = schema.analyzer_for_field(&field.name);
            if analyzers.get(name).is_none() {
                return Err(Error::invalid_configuration(format!(
                    "Field '{}' references unregistered analyzer '{}'",
                    field.name, name
                )));
            }
        }

        let index = Arc::new(RwLock::new(InvertedIndex::new()));
        let writer = IndexWriter::new(index.clone(), schema.clone(), analyzers.clone());
        let executor = QueryExecutor::new(schema.clone(), analyzers.clone());
        let facets = FacetEngine::new(schema.clone());
        let scorer: Box<dyn Scorer> = match config.scorer {
            ScorerKind::TfIdf => Box::new(TfIdfScorer::new(true)),
            ScorerKind::Bm25 => Box::new(BM25Scorer::default()),
        };

        Ok(Engine {
            schema,
            config,
            analyzers,
            index,
            writer,
            executor,
            facets,
            scorer,
        })
    }

    /// Index a new document (or reindex an existing id).
    pub fn index(&self, doc: Document) -> Result<()> {
        self.writer.upsert(doc)
    }

    /// Update under an explicit id: delete-then-reinsert. An unknown id
    /// degrades to a plain insert (upsert semantics), not an error.
    pub fn update(&self, doc_id: DocId, mut doc: Document) -> Result<()> {
        doc.id = doc_id;
        self.writer.upsert(doc)
    }

    /// Remove a document; removing an id that was never indexed is a
    /// no-op.
    pub fn remove(&self, doc_id: DocId) -> Result<()> {
        self.writer.delete(doc_id)?;
        Ok(())
    }

    /// Apply a single mutation.
    pub fn apply(&self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::Index(doc) => self.index(doc),
            Mutation::Update(doc_id, doc) => self.update(doc_id, doc),
            Mutation::Delete(doc_id) => self.remove(doc_id),
        }
    }

    /// Blocking full reindex of the given corpus. Queries are blocked
    /// only while the rebuilt index is swapped in.
    pub fn rebuild_all(&self, corpus: Vec<Document>) -> Result<()> {
        self.writer.rebuild(corpus)
    }

    /// Matching document ids, ascending.
    pub fn search(&self, query: &Query) -> Result<Vec<DocId>> {
        Ok(self.search_set(query)?.to_vec())
    }

    /// Matching documents as a result set, the form facet computation
    /// and drill-down consume.
    pub fn search_set(&self, query: &Query) -> Result<ResultSet> {
        let index = self.index.read();
        self.executor.execute(query, &index)
    }

    /// Relevance-ranked hits, ordered by score descending (doc id
    /// ascending on ties).
    pub fn search_ranked(&self, query: &Query) -> Result<Vec<ScoredDocument>> {
        let index = self.index.read();
        self.executor.execute_ranked(query, &index, self.scorer.as_ref())
    }

    /// Discrete facet counts for the result set.
    pub fn facet(&self, results: &ResultSet, request: &FacetingRequest) -> Result<Vec<FacetValue>> {
        let index = self.index.read();
        self.facets.compute_facets(results, request, &index)
    }

    /// Narrow a result set to documents holding any selected facet value.
    pub fn drill_down(&self, results: &ResultSet, selection: &FacetSelection) -> Result<ResultSet> {
        let index = self.index.read();
        self.facets.select_facets(results, selection, &index)
    }

    /// Diagnostic entry point: run a field's configured analyzer over
    /// arbitrary text and return the raw token list.
    pub fn analyze(&self, field: &str, text: &str) -> Result<Vec<Token>> {
        if !self.schema.has_field(field) {
            return Err(Error::invalid_field(field));
        }
        self.analyzers.analyze(self.schema.analyzer_for_field(field), text)
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.index.read().contains(doc_id)
    }

    pub fn doc_count(&self) -> u64 {
        self.index.read().doc_count()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Persist the live documents to the configured snapshot path.
    pub fn save_snapshot(&self) -> Result<()> {
        self.save_snapshot_to(&self.config.snapshot_path)
    }

    pub fn save_snapshot_to(&self, path: &Path) -> Result<()> {
        let index = self.index.read();
        snapshot::save(path, &index)
    }

    /// Load a snapshot and rebuild the index from it. Reload reproduces
    /// the query results of the index that was saved.
    pub fn load_snapshot(&self) -> Result<()> {
        self.load_snapshot_from(&self.config.snapshot_path)
    }

    pub fn load_snapshot_from(&self, path: &Path) -> Result<()> {
        let documents = snapshot::load(path)?;
        self.writer.rebuild(documents)
    }
}
