use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::domain::MatchResult;

/// Output of one matcher pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub results: Vec<MatchResult>,
    pub queries: usize,
    /// Queries without any valid candidate
    pub dropped_queries: usize,
    /// Comparisons skipped because one side had no usable coordinates
    pub invalid_pairs: usize,
}

/// Summary of a complete pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub list_a_rows: usize,
    pub list_b_rows: usize,
    pub list_a_geocoded: usize,
    pub list_b_geocoded: usize,
    pub matched: usize,
    pub dropped: usize,
}
