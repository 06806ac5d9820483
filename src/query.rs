//! Structured query filters.
//!
//! A [`QueryFilter`] is the JSON filter expression the model is asked to
//! produce: a map of field names to conditions, in MongoDB filter syntax.
//! This module owns validation of raw model output, the canonical serialized
//! form, and an interpreter used by the in-memory store backend.

use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::warn;

use crate::error::{AskdbError, Result};
use crate::llm::parser::extract_json;
use crate::store::Document;

/// A structured filter expression over the document collection.
///
/// Wraps a JSON object such as `{"Price": {"$gt": 50}}`. The empty filter
/// `{}` is the sentinel substituted when model output fails validation; when
/// executed directly it matches all documents, as `find({})` does.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryFilter(Map<String, Value>);

impl QueryFilter {
    /// Returns the empty sentinel filter.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses filter text as a JSON object.
    ///
    /// Rejects valid JSON that is not an object (arrays, bare scalars).
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AskdbError::query(format!("not valid JSON: {e}")))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AskdbError::query(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Validates raw model output into a filter.
    ///
    /// Strips markdown code fences, then parses. On any failure the empty
    /// sentinel is returned and a warning logged; the caller is expected to
    /// skip the question rather than halt.
    pub fn from_response(raw: &str) -> Self {
        let text = extract_json(raw);
        match Self::parse(&text) {
            Ok(filter) => filter,
            Err(e) => {
                warn!("Model output is not a valid query filter: {e}");
                Self::empty()
            }
        }
    }

    /// Returns the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the filter as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Returns the canonical compact JSON serialization.
    pub fn to_canonical_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Evaluates this filter against a document.
    ///
    /// Implements the operator subset the prompt teaches the model plus the
    /// `$and`/`$or` combinators. The empty filter matches every document.
    pub fn matches(&self, doc: &Document) -> bool {
        clauses_match(&self.0, doc)
    }
}

impl std::fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

/// Evaluates a filter object (top level or nested in `$and`/`$or`).
fn clauses_match(clauses: &Map<String, Value>, doc: &Document) -> bool {
    clauses.iter().all(|(key, cond)| match key.as_str() {
        "$and" => match cond.as_array() {
            Some(subs) => subs.iter().all(|s| object_matches(s, doc)),
            None => false,
        },
        "$or" => match cond.as_array() {
            Some(subs) => subs.iter().any(|s| object_matches(s, doc)),
            None => false,
        },
        field => condition_matches(doc.get(field), cond),
    })
}

/// Evaluates a nested filter that must itself be a JSON object.
fn object_matches(filter: &Value, doc: &Document) -> bool {
    match filter.as_object() {
        Some(map) => clauses_match(map, doc),
        None => false,
    }
}

/// Evaluates a single field condition.
///
/// An object whose keys all start with `$` is an operator map; anything else
/// is an implicit equality match.
fn condition_matches(field: Option<&Value>, cond: &Value) -> bool {
    if let Value::Object(ops) = cond {
        if !ops.is_empty() && ops.keys().all(|k| k.starts_with('$')) {
            return ops
                .iter()
                .all(|(op, operand)| operator_matches(op, field, operand));
        }
    }
    match field {
        Some(value) => values_equal(value, cond),
        None => false,
    }
}

/// Evaluates one operator against a (possibly absent) field value.
fn operator_matches(op: &str, field: Option<&Value>, operand: &Value) -> bool {
    match op {
        "$eq" => field.is_some_and(|v| values_equal(v, operand)),
        "$ne" => !field.is_some_and(|v| values_equal(v, operand)),
        "$gt" => ordering_matches(field, operand, |o| o == Ordering::Greater),
        "$gte" => ordering_matches(field, operand, |o| o != Ordering::Less),
        "$lt" => ordering_matches(field, operand, |o| o == Ordering::Less),
        "$lte" => ordering_matches(field, operand, |o| o != Ordering::Greater),
        "$in" => match (field, operand.as_array()) {
            (Some(v), Some(candidates)) => candidates.iter().any(|c| values_equal(v, c)),
            _ => false,
        },
        "$nin" => match operand.as_array() {
            // Mongo semantics: a missing field satisfies $nin.
            Some(candidates) => match field {
                Some(v) => !candidates.iter().any(|c| values_equal(v, c)),
                None => true,
            },
            None => false,
        },
        other => {
            warn!("Unsupported query operator '{other}', matching nothing");
            false
        }
    }
}

fn ordering_matches(
    field: Option<&Value>,
    operand: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    match field.and_then(|v| compare_values(v, operand)) {
        Some(ordering) => accept(ordering),
        None => false,
    }
}

/// Compares two JSON values where an ordering exists.
///
/// Numbers compare numerically across integer/float representations.
/// Strings compare lexicographically, which covers ISO-8601 dates.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Equality that treats 60 and 60.0 as the same value.
fn values_equal(a: &Value, b: &Value) -> bool {
    match compare_values(a, b) {
        Some(ordering) => ordering == Ordering::Equal,
        None => a == b,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
