use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use roaring::RoaringTreemap;
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::core::error::{Error, Result};
use crate::index::inverted::InvertedIndex;
use crate::query::ast::{BoolQuery, KeywordQuery, Query};
use crate::query::results::{ResultSet, ScoredDocument};
use crate::schema::schema::Schema;
use crate::scoring::scorer::{DocStats, Scorer};

/// Compiles queries against an inverted index. Stateless: the index is
/// passed to every call, never held.
pub struct QueryExecutor {
    schema: Schema,
    analyzers: Arc<AnalyzerRegistry>,
}

impl QueryExecutor {
    pub fn new(schema: Schema, analyzers: Arc<AnalyzerRegistry>) -> Self {
        QueryExecutor { schema, analyzers }
    }

    pub fn execute(&self, query: &Query, index: &InvertedIndex) -> Result<ResultSet> {
        match query {
            Query::MatchAll => Ok(ResultSet::from_bitmap(index.live_docs().clone())),
            Query::Keyword(keyword) => self.execute_keyword(keyword, index),
            Query::Bool(boolean) => self.execute_bool(boolean, index),
        }
    }

    /// Ranked variant: same matching semantics, hits ordered by score
    /// descending with doc id ascending as the tie-break.
    pub fn execute_ranked(
        &self,
        query: &Query,
        index: &InvertedIndex,
        scorer: &dyn Scorer,
    ) -> Result<Vec<ScoredDocument>> {
        let results = self.execute(query, index)?;

        let mut terms = Vec::new();
        self.collect_terms(query, &mut terms)?;

        let mut scores: HashMap<u64, f32> =
            results.iter().map(|doc_id| (doc_id.0, 0.0)).collect();

        for (field, term) in &terms {
            let postings = index.postings_for(field, term);
            let doc_freq = postings.len() as u32;

            for posting in postings {
                if let Some(score) = scores.get_mut(&posting.doc_id.0) {
                    let stats = DocStats {
                        doc_length: index.doc_length(posting.doc_id) as usize,
                        avg_doc_length: index.avg_doc_length(),
                        total_docs: index.doc_count() as usize,
                    };
                    *score += scorer.score(posting, doc_freq, &stats);
                }
            }
        }

        let mut hits: Vec<ScoredDocument> = scores
            .into_iter()
            .map(|(id, score)| ScoredDocument {
                doc_id: crate::core::types::DocId(id),
                score,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.doc_id.0.cmp(&b.doc_id.0))
        });

        Ok(hits)
    }

    fn execute_keyword(&self, query: &KeywordQuery, index: &InvertedIndex) -> Result<ResultSet> {
        if !self.schema.has_field(&query.field) {
            return Err(Error::invalid_field(&query.field));
        }

        let analyzer_name = self.schema.analyzer_for_field(&query.field);
        let tokens = self.analyzers.analyze(analyzer_name, &query.text)?;
        if tokens.is_empty() {
            return Ok(ResultSet::new());
        }

        // Conjunctive across tokens: every analyzed term must match
        let mut matching: Option<RoaringTreemap> = None;
        for token in tokens {
            let mut docs = RoaringTreemap::new();
            for posting in index.postings_for(&query.field, &token.text) {
                docs.insert(posting.doc_id.0);
            }

            matching = Some(match matching {
                Some(acc) => &acc & &docs,
                None => docs,
            });

            if matching.as_ref().map(|m| m.is_empty()).unwrap_or(true) {
                break;
            }
        }

        Ok(ResultSet::from_bitmap(matching.unwrap_or_default()))
    }

    fn execute_bool(&self, query: &BoolQuery, index: &InvertedIndex) -> Result<ResultSet> {
        // Must clauses: all must match (AND)
        let mut results = if query.must.is_empty() {
            None
        } else {
            let mut acc: Option<ResultSet> = None;
            for clause in &query.must {
                let matched = self.execute(clause, index)?;
                acc = Some(match acc {
                    Some(prior) => prior.intersect(&matched),
                    None => matched,
                });
            }
            acc
        };

        // Should clauses: at least one must match (OR)
        if !query.should.is_empty() {
            let mut any = ResultSet::new();
            for clause in &query.should {
                any = any.union(&self.execute(clause, index)?);
            }
            results = Some(match results {
                Some(prior) => prior.intersect(&any),
                None => any,
            });
        }

        // No positive clause: start from every live document
        let mut results =
            results.unwrap_or_else(|| ResultSet::from_bitmap(index.live_docs().clone()));

        // Must not clauses: none must match (NOT)
        for clause in &query.must_not {
            results = results.difference(&self.execute(clause, index)?);
        }

        Ok(results)
    }

    /// Analyzed positive terms of the query, used for scoring. Negative
    /// clauses contribute matching constraints but no score.
    fn collect_terms(&self, query: &Query, terms: &mut Vec<(String, String)>) -> Result<()> {
        match query {
            Query::MatchAll => Ok(()),
            Query::Keyword(keyword) => {
                let analyzer_name = self.schema.analyzer_for_field(&keyword.field);
                for token in self.analyzers.analyze(analyzer_name, &keyword.text)? {
                    terms.push((keyword.field.clone(), token.text));
                }
                Ok(())
            }
            Query::Bool(boolean) => {
                for clause in boolean.must.iter().chain(boolean.should.iter()) {
                    self.collect_terms(clause, terms)?;
                }
                Ok(())
            }
        }
    }
}
