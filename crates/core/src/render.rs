//! Row rendering for the results pane.

use crate::types::{ResultSet, SearchResult};
use std::fmt;

pub const SEPARATOR: &str = " | ";
pub const RANK_PREFIX: &str = "rank: ";

/// Display form of one result: `path`, `" | "`, `"rank: N"`, then a line break.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub path: String,
    pub rank: String,
}

impl ResultRow {
    pub fn fragments(&self) -> [&str; 3] {
        [&self.path, SEPARATOR, &self.rank]
    }
}

impl From<&SearchResult> for ResultRow {
    fn from(result: &SearchResult) -> Self {
        Self {
            path: result.path.clone(),
            rank: format!("{}{}", RANK_PREFIX, format_rank(result.rank)),
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.path, SEPARATOR, self.rank)
    }
}

/// Number-to-string the way a browser prints it: 3.0 -> "3", 0.5 -> "0.5",
/// 1e-7 -> "1e-7", 1e21 -> "1e+21"
pub fn format_rank(rank: f64) -> String {
    // -0 prints as "0"
    if rank == 0.0 {
        return "0".to_string();
    }
    if rank.is_nan() {
        return "NaN".to_string();
    }
    if rank.is_infinite() {
        return if rank > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = rank.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return rank.to_string();
    }

    // Exponent form outside [1e-6, 1e21), shortest round-trip mantissa
    let scientific = format!("{:e}", rank);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
        _ => scientific,
    }
}

/// Rows currently rendered in the results pane.
#[derive(Debug, Clone, Default)]
pub struct ResultsContainer {
    rows: Vec<ResultRow>,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn append(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Appends one row per result, in received order. Returns the number appended.
    pub fn render(&mut self, results: &ResultSet) -> usize {
        self.rows.extend(results.iter().map(ResultRow::from));
        results.len()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
