//! Perch is an embedded full-text search engine: an inverted index with a
//! stemming analysis pipeline, boolean/keyword queries, and discrete
//! faceted aggregation with drill-down selection.
//!
//! All operations go through an explicit [`Engine`] handle; there is no
//! ambient or thread-local session state.

pub mod analysis;
pub mod core;
pub mod facet;
pub mod index;
pub mod query;
pub mod schema;
pub mod scoring;
pub mod storage;

pub use crate::core::config::{Config, ScorerKind};
pub use crate::core::engine::{Engine, Mutation};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{DocId, Document, FieldValue};
pub use crate::facet::engine::{FacetSelection, FacetValue};
pub use crate::facet::request::{FacetSortOrder, FacetingRequest};
pub use crate::query::ast::{BoolQuery, KeywordQuery, Query};
pub use crate::query::results::{ResultSet, ScoredDocument};
pub use crate::schema::schema::{FieldDefinition, FieldType, Schema};
