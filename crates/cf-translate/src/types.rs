//! Core types for cf-translate

use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// "A", "B1", "AA": the shape of every Codeforces problem index
static INDEX_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,2}[0-9]?$").expect("index shape pattern is valid"));

/// Identifies one problem: contest id plus problem index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemId {
    /// Numeric contest id
    pub contest_id: u32,
    /// Problem index within the contest, always upper-case (e.g. "A", "B1")
    pub index: String,
}

impl ProblemId {
    /// Create a problem id, normalising the index to upper-case
    ///
    /// The index is not validated; use [`ProblemId::parse`] for untrusted input.
    pub fn new(contest_id: u32, index: impl AsRef<str>) -> Self {
        Self {
            contest_id,
            index: index.as_ref().trim().to_uppercase(),
        }
    }

    /// Create a problem id from untrusted input
    ///
    /// The index ends up in file paths and index links, so anything other
    /// than one or two letters with an optional digit is rejected.
    pub fn parse(contest_id: u32, index: &str) -> Result<Self, Error> {
        Ok(Self {
            contest_id,
            index: normalize_index(index)?,
        })
    }

    /// Whether the index has the shape [`ProblemId::parse`] accepts
    pub fn has_valid_index(&self) -> bool {
        INDEX_SHAPE.is_match(&self.index)
    }
}

/// Upper-case and validate a problem index
pub fn normalize_index(index: &str) -> Result<String, Error> {
    let normalized = index.trim().to_uppercase();
    if INDEX_SHAPE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(Error::InvalidProblemIndex(index.to_string()))
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CF{}{}", self.contest_id, self.index)
    }
}

/// One sample test bundled with a statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

/// Structured statement extracted from a problem page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Title without the "A. " prefix
    pub title: String,
    /// Title as shown on the page
    pub full_title: String,
    pub description: String,
    pub input_section: String,
    pub output_section: String,
    pub examples: Vec<Example>,
    /// Empty when the statement has no note
    pub note: String,
}

/// Translated counterpart of a [`ProblemRecord`]
///
/// `examples` are copied from the source record and never translated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedRecord {
    pub title: String,
    pub description: String,
    pub input_section: String,
    pub output_section: String,
    pub examples: Vec<Example>,
    pub note: String,
}

/// Difficulty rating and topic tags of a problem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemMeta {
    /// `None` when the rating is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProblemMeta {
    /// Rating as shown in the index, `?` when unknown
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => rating.to_string(),
            None => "?".to_string(),
        }
    }
}
