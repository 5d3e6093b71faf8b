use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};
use crate::facet::request::{FacetSortOrder, FacetingRequest};
use crate::index::inverted::InvertedIndex;
use crate::query::results::ResultSet;
use crate::schema::schema::Schema;

/// Discrete facet value with its count within the current result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u64,
}

/// Drill-down selection: documents holding any of the selected values
/// for the field stay in the narrowed result set (OR within one facet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSelection {
    pub field: String,
    pub values: Vec<String>,
}

impl FacetSelection {
    pub fn new(field: &str, values: Vec<String>) -> Self {
        FacetSelection {
            field: field.to_string(),
            values,
        }
    }

    pub fn single(field: &str, value: &str) -> Self {
        FacetSelection::new(field, vec![value.to_string()])
    }
}

/// Computes value→count aggregations over a result set and narrows
/// result sets by facet selection. Pure functions of (result set,
/// request/selection, index): no query state is carried across calls.
pub struct FacetEngine {
    schema: Schema,
}

impl FacetEngine {
    pub fn new(schema: Schema) -> Self {
        FacetEngine { schema }
    }

    /// Aggregate the field's discrete values over the result set.
    /// Counts reflect only documents in the result set, never the whole
    /// index; zero-count values (present in the live corpus, absent from
    /// the result set) appear only when the request asks for them.
    pub fn compute_facets(
        &self,
        results: &ResultSet,
        request: &FacetingRequest,
        index: &InvertedIndex,
    ) -> Result<Vec<FacetValue>> {
        if !self.schema.has_field(&request.field) {
            return Err(Error::invalid_field(&request.field));
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc_id in results.iter() {
            if let Some(doc) = index.document(doc_id) {
                if let Some(value) = doc.get_field(&request.field) {
                    *counts.entry(value.as_facet_value()).or_insert(0) += 1;
                }
            }
        }

        if request.include_zero_counts {
            for doc in index.documents() {
                if let Some(value) = doc.get_field(&request.field) {
                    counts.entry(value.as_facet_value()).or_insert(0);
                }
            }
        }

        let mut facets: Vec<FacetValue> = counts
            .into_iter()
            .map(|(value, count)| FacetValue { value, count })
            .collect();

        // Count ties break by natural value order for determinism
        match request.order {
            FacetSortOrder::CountDesc => {
                facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
            }
            FacetSortOrder::CountAsc => {
                facets.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.value.cmp(&b.value)));
            }
            FacetSortOrder::ValueAsc => {
                facets.sort_by(|a, b| a.value.cmp(&b.value));
            }
        }

        facets.truncate(request.max_facet_count);
        Ok(facets)
    }

    /// Drill-down: intersect the result set with the documents carrying
    /// any selected value. The narrowed set is a subset of the input by
    /// construction.
    pub fn select_facets(
        &self,
        results: &ResultSet,
        selection: &FacetSelection,
        index: &InvertedIndex,
    ) -> Result<ResultSet> {
        if !self.schema.has_field(&selection.field) {
            return Err(Error::invalid_field(&selection.field));
        }

        let mut narrowed = ResultSet::new();
        for doc_id in results.iter() {
            if let Some(doc) = index.document(doc_id) {
                if let Some(value) = doc.get_field(&selection.field) {
                    let facet_value = value.as_facet_value();
                    if selection.values.iter().any(|v| *v == facet_value) {
                        narrowed.insert(doc_id);
                    }
                }
            }
        }

        Ok(narrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;
    use crate::core::error::ErrorKind;
    use crate::core::types::{DocId, Document, FieldValue};

    fn schema() -> Schema {
        Schema::new()
            .add_text_field("message")
            .add_keyword_field("user_name")
    }

    fn index_with_users(users: &[(u64, &str)]) -> InvertedIndex {
        let analyzer = Analyzer::keyword();
        let mut index = InvertedIndex::new();
        for (id, user) in users {
            let doc = Document::new(DocId(*id))
                .with_field("user_name", FieldValue::Text(user.to_string()));
            let analyzed = vec![("user_name".to_string(), analyzer.analyze(user))];
            index.upsert(doc, analyzed);
        }
        index
    }

    fn all_docs(index: &InvertedIndex) -> ResultSet {
        ResultSet::from_bitmap(index.live_docs().clone())
    }

    #[test]
    fn counts_follow_the_result_set_not_the_index() {
        let index = index_with_users(&[(1, "alice"), (2, "alice"), (3, "bob")]);
        let engine = FacetEngine::new(schema());
        let request = FacetingRequest::builder("userNameFR", "user_name")
            .build()
            .unwrap();

        // Result set holding only doc 3: alice must not appear
        let subset: ResultSet = [DocId(3)].into_iter().collect();
        let facets = engine.compute_facets(&subset, &request, &index).unwrap();
        assert_eq!(facets, vec![FacetValue { value: "bob".to_string(), count: 1 }]);
    }

    #[test]
    fn zero_counts_only_on_request() {
        let index = index_with_users(&[(1, "alice"), (2, "bob")]);
        let engine = FacetEngine::new(schema());
        let subset: ResultSet = [DocId(1)].into_iter().collect();

        let without = FacetingRequest::builder("userNameFR", "user_name")
            .build()
            .unwrap();
        let facets = engine.compute_facets(&subset, &without, &index).unwrap();
        assert_eq!(facets.len(), 1);

        let with = FacetingRequest::builder("userNameFR", "user_name")
            .include_zero_counts(true)
            .build()
            .unwrap();
        let facets = engine.compute_facets(&subset, &with, &index).unwrap();
        assert_eq!(facets.len(), 2);
        assert!(facets.contains(&FacetValue { value: "bob".to_string(), count: 0 }));
    }

    #[test]
    fn count_ties_break_lexically() {
        let index = index_with_users(&[(1, "carol"), (2, "alice"), (3, "bob")]);
        let engine = FacetEngine::new(schema());
        let request = FacetingRequest::builder("userNameFR", "user_name")
            .build()
            .unwrap();

        let facets = engine
            .compute_facets(&all_docs(&index), &request, &index)
            .unwrap();
        let values: Vec<&str> = facets.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn drill_down_narrows_to_selected_values() {
        let index = index_with_users(&[(1, "alice"), (2, "bob"), (3, "alice"), (4, "carol")]);
        let engine = FacetEngine::new(schema());

        let original = all_docs(&index);
        let narrowed = engine
            .select_facets(&original, &FacetSelection::single("user_name", "alice"), &index)
            .unwrap();

        assert_eq!(narrowed.to_vec(), vec![DocId(1), DocId(3)]);
        assert!(narrowed.is_subset(&original));

        // OR semantics across selected values of one facet
        let either = engine
            .select_facets(
                &original,
                &FacetSelection::new("user_name", vec!["bob".to_string(), "carol".to_string()]),
                &index,
            )
            .unwrap();
        assert_eq!(either.to_vec(), vec![DocId(2), DocId(4)]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let index = index_with_users(&[(1, "alice")]);
        let engine = FacetEngine::new(schema());
        let request = FacetingRequest::builder("badFR", "no_such_field")
            .build()
            .unwrap();

        let err = engine
            .compute_facets(&all_docs(&index), &request, &index)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidField);
    }
}
