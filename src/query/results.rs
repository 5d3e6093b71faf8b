use roaring::RoaringTreemap;
use crate::core::types::DocId;

/// Set of matching document ids. Iteration is always ascending, which
/// gives unranked queries their deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    docs: RoaringTreemap,
}

impl ResultSet {
    pub fn new() -> Self {
        ResultSet {
            docs: RoaringTreemap::new(),
        }
    }

    pub fn from_bitmap(docs: RoaringTreemap) -> Self {
        ResultSet { docs }
    }

    pub fn insert(&mut self, doc_id: DocId) {
        self.docs.insert(doc_id.0);
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.docs.contains(doc_id.0)
    }

    pub fn len(&self) -> u64 {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.iter().map(DocId)
    }

    pub fn to_vec(&self) -> Vec<DocId> {
        self.iter().collect()
    }

    pub fn intersect(&self, other: &ResultSet) -> ResultSet {
        ResultSet {
            docs: &self.docs & &other.docs,
        }
    }

    pub fn union(&self, other: &ResultSet) -> ResultSet {
        ResultSet {
            docs: &self.docs | &other.docs,
        }
    }

    pub fn difference(&self, other: &ResultSet) -> ResultSet {
        ResultSet {
            docs: &self.docs - &other.docs,
        }
    }

    pub fn is_subset(&self, other: &ResultSet) -> bool {
        self.docs.is_subset(&other.docs)
    }
}

impl FromIterator<DocId> for ResultSet {
    fn from_iter<I: IntoIterator<Item = DocId>>(iter: I) -> Self {
        ResultSet {
            docs: iter.into_iter().map(|d| d.0).collect(),
        }
    }
}

/// Hit with relevance score, produced by ranked search
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: f32,
}
