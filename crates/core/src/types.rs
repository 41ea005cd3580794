//! Search response model and its decoder.
//!
//! The backend answers with a JSON array of `[path, rank]` pairs. Decoding is
//! all-or-nothing: one malformed entry rejects the whole response.

use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON array of results, found {0}")]
    NotAnArray(&'static str),
    #[error("malformed result entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

/// One ranked hit as returned by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub path: String,
    pub rank: f64,
}

impl SearchResult {
    pub fn new(path: impl Into<String>, rank: f64) -> Self {
        Self { path: path.into(), rank }
    }

    fn from_entry(index: usize, entry: Value) -> Result<Self, DecodeError> {
        let malformed = |reason: String| DecodeError::MalformedEntry { index, reason };

        let pair = match entry {
            Value::Array(pair) => pair,
            other => return Err(malformed(format!("expected a [path, rank] pair, found {}", kind_of(&other)))),
        };
        if pair.len() != 2 {
            return Err(malformed(format!("expected 2 elements, found {}", pair.len())));
        }

        let mut items = pair.into_iter();
        let path = match items.next() {
            Some(Value::String(path)) => path,
            Some(other) => return Err(malformed(format!("path must be a string, found {}", kind_of(&other)))),
            None => return Err(malformed("missing path".to_string())),
        };
        let rank = match items.next() {
            Some(Value::Number(rank)) => rank
                .as_f64()
                .ok_or_else(|| malformed(format!("rank {} is not representable", rank)))?,
            Some(other) => return Err(malformed(format!("rank must be a number, found {}", kind_of(&other)))),
            None => return Err(malformed("missing rank".to_string())),
        };

        Ok(Self { path, rank })
    }
}

// Serializes back into the wire shape: ["path", rank]
impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.path, self.rank).serialize(serializer)
    }
}

/// Ordered results of a single search, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self { results }
    }

    /// Decodes a response body of the form `[["path", rank], ...]`.
    pub fn from_json(body: &[u8]) -> Result<Self, DecodeError> {
        let entries = match serde_json::from_slice::<Value>(body)? {
            Value::Array(entries) => entries,
            other => return Err(DecodeError::NotAnArray(kind_of(&other))),
        };

        let results = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| SearchResult::from_entry(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.results.serialize(serializer)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
