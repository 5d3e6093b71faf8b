use std::path::PathBuf;

/// Scoring function used by ranked search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    TfIdf,
    Bm25,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Scorer for `search_ranked`; unranked search always orders by
    /// document id ascending.
    pub scorer: ScorerKind,

    /// Default location for `save_snapshot` / `load_snapshot`.
    pub snapshot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scorer: ScorerKind::TfIdf,
            snapshot_path: PathBuf::from("./perch.snapshot"),
        }
    }
}
