// Part search filter
// Turns the optional search fields into a list of AND-ed predicates, each
// paired with the value bound to its placeholder

use crate::error::{CatalogError, CatalogResult};
use rusqlite::types::Value;
use serde::Deserialize;

/// Filter for `search_parts`
///
/// Only `category_id` is required. Every other field narrows the result
/// when present; an empty string counts as not supplied. All predicates
/// are combined with AND. There is no OR: a caller that wants "A or B" in
/// the description has to search twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartSearch {
    pub category_id: i64,
    pub manufacturer_id: Option<i64>,
    /// Substring of the manufacturer part number
    #[serde(rename = "manufacturer_pn")]
    pub manufacturer_part_number: Option<String>,
    /// Substring of the free-text description
    #[serde(rename = "description")]
    pub description_text: Option<String>,
    /// Exact package name, e.g. `0402`
    pub package: Option<String>,
    pub is_basic_parts: Option<bool>,
    pub is_preferred_parts: Option<bool>,
}

impl PartSearch {
    /// Search a single category with no other constraints
    pub fn in_category(category_id: i64) -> Self {
        Self {
            category_id,
            ..Self::default()
        }
    }

    /// Reject ids that can never match a row
    pub fn validate(&self) -> CatalogResult<()> {
        if self.category_id < 1 {
            return Err(CatalogError::InvalidArgument(format!(
                "category_id must be >= 1, got {}",
                self.category_id
            )));
        }
        if let Some(id) = self.manufacturer_id {
            if id < 1 {
                return Err(CatalogError::InvalidArgument(format!(
                    "manufacturer_id must be >= 1, got {}",
                    id
                )));
            }
        }
        Ok(())
    }

    /// Build the predicate list in a fixed order, category first
    pub fn predicates(&self) -> Predicates {
        let mut predicates = Predicates::new();

        predicates.push("category_id=?", self.category_id);

        if let Some(id) = self.manufacturer_id {
            predicates.push("manufacturer_id=?", id);
        }
        if let Some(pn) = non_empty(&self.manufacturer_part_number) {
            predicates.push("mfr LIKE ?", contains_pattern(pn));
        }
        if let Some(text) = non_empty(&self.description_text) {
            predicates.push("description LIKE ?", contains_pattern(text));
        }
        if let Some(package) = non_empty(&self.package) {
            predicates.push("package=?", package.to_string());
        }
        if let Some(basic) = self.is_basic_parts {
            predicates.push("basic=?", basic);
        }
        if let Some(preferred) = self.is_preferred_parts {
            predicates.push("preferred=?", preferred);
        }

        predicates
    }
}

/// `%value%` for a LIKE substring match
///
/// `%` and `_` inside the value keep their wildcard meaning.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", value)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Ordered list of `column <op> ?` clauses and their bound values
///
/// Clause text is always one of the fixed strings above; user input only
/// ever travels through the bound values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    clauses: Vec<&'static str>,
    params: Vec<Value>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: &'static str, value: impl Into<Value>) {
        self.clauses.push(clause);
        self.params.push(value.into());
    }

    pub fn clauses(&self) -> &[&'static str] {
        &self.clauses
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses joined with AND, ready to follow `WHERE`
    pub fn to_sql(&self) -> String {
        self.clauses.join(" AND ")
    }
}
