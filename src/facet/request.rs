use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};

/// Sort order for computed facet values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetSortOrder {
    CountDesc,
    CountAsc,
    ValueAsc,
}

/// Discrete faceting request over one field. Built through
/// [`FacetingRequest::builder`]; misconfiguration fails at build time,
/// never at compute time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetingRequest {
    pub name: String,
    pub field: String,
    pub include_zero_counts: bool,
    pub max_facet_count: usize,
    pub order: FacetSortOrder,
}

impl FacetingRequest {
    pub fn builder(name: &str, field: &str) -> FacetingRequestBuilder {
        FacetingRequestBuilder {
            name: name.to_string(),
            field: field.to_string(),
            include_zero_counts: false,
            max_facet_count: None,
            order: FacetSortOrder::CountDesc,
        }
    }
}

pub struct FacetingRequestBuilder {
    name: String,
    field: String,
    include_zero_counts: bool,
    max_facet_count: Option<usize>,
    order: FacetSortOrder,
}

impl FacetingRequestBuilder {
    pub fn include_zero_counts(mut self, include: bool) -> Self {
        self.include_zero_counts = include;
        self
    }

    pub fn max_facet_count(mut self, max: usize) -> Self {
        self.max_facet_count = Some(max);
        self
    }

    pub fn order(mut self, order: FacetSortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn build(self) -> Result<FacetingRequest> {
        if self.max_facet_count == Some(0) {
            return Err(Error::invalid_configuration(format!(
                "Faceting request '{}': max_facet_count must be positive",
                self.name
            )));
        }

        Ok(FacetingRequest {
            name: self.name,
            field: self.field,
            include_zero_counts: self.include_zero_counts,
            // No cap requested: return every value
            max_facet_count: self.max_facet_count.unwrap_or(usize::MAX),
            order: self.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn zero_max_count_fails_at_build_time() {
        let err = FacetingRequest::builder("userNameFR", "user_name")
            .max_facet_count(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn defaults() {
        let request = FacetingRequest::builder("userNameFR", "user_name")
            .build()
            .unwrap();
        assert!(!request.include_zero_counts);
        assert_eq!(request.max_facet_count, usize::MAX);
        assert_eq!(request.order, FacetSortOrder::CountDesc);
    }
}
