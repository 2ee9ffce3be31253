//! Filter types for dynamic query building.
//!
//! A [`Filter`] is a conjunction of [`FilterField`] conditions. The
//! PostgreSQL repositories translate it into a parameterized `WHERE`
//! clause; the in-memory backend evaluates it against the record's JSON
//! form via [`Filter::matches`]. Field names are column names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// SQL `ILIKE` case-insensitive pattern match (`%` and `_` wildcards).
    ILike,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

/// A dynamic filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A UUID value (identifiers, including the tenant column).
    Uuid(Uuid),
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }

    /// Shorthand for a case-insensitive LIKE filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    fn matches(&self, record: &serde_json::Value) -> bool {
        let actual = record.get(&self.field);
        let is_null = actual.is_none_or(serde_json::Value::is_null);
        match self.op {
            FilterOp::IsNull => is_null,
            FilterOp::IsNotNull => !is_null,
            FilterOp::Eq => actual.is_some_and(|v| value_equals(v, &self.value)),
            FilterOp::Ne => !actual.is_some_and(|v| value_equals(v, &self.value)),
            FilterOp::ILike => match (actual.and_then(|v| v.as_str()), &self.value) {
                (Some(text), FilterValue::String(pattern)) => ilike(text, pattern),
                _ => false,
            },
        }
    }
}

/// A conjunction of filter conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    fields: Vec<FilterField>,
}

impl Filter {
    /// An empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition.
    pub fn and(mut self, field: FilterField) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds an equality condition.
    pub fn with_eq(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.and(FilterField::eq(field, value))
    }

    /// Replaces every condition on `field` with a single equality.
    pub fn set_eq(&mut self, field: &str, value: impl Into<FilterValue>) {
        self.fields.retain(|f| f.field != field);
        self.fields.push(FilterField::eq(field, value));
    }

    /// The value of the equality condition on `field`, if any.
    pub fn eq_value(&self, field: &str) -> Option<&FilterValue> {
        self.fields
            .iter()
            .find(|f| f.field == field && f.op == FilterOp::Eq)
            .map(|f| &f.value)
    }

    /// All conditions in insertion order.
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates the filter against a JSON object.
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        self.fields.iter().all(|f| f.matches(record))
    }
}

fn value_equals(actual: &serde_json::Value, expected: &FilterValue) -> bool {
    match expected {
        FilterValue::Uuid(id) => actual
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .is_some_and(|parsed| parsed == *id),
        FilterValue::String(s) => actual.as_str() == Some(s.as_str()),
        FilterValue::Integer(i) => actual.as_i64() == Some(*i),
        FilterValue::Boolean(b) => actual.as_bool() == Some(*b),
        FilterValue::Null => actual.is_null(),
    }
}

enum Token {
    AnyRun,
    AnyOne,
    Literal(char),
}

/// Case-insensitive SQL LIKE matching; backslash escapes the next character.
fn ilike(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();

    let mut tokens = Vec::new();
    let mut chars = pattern.to_lowercase().chars().collect::<Vec<_>>().into_iter();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            c => Token::Literal(c),
        });
    }

    // matched[j]: tokens consumed so far match text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;
    for token in &tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            Token::AnyRun => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen |= matched[j];
                    next[j] = seen;
                }
            }
            Token::AnyOne => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1];
                }
            }
            Token::Literal(c) => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1] && text[j - 1] == *c;
                }
            }
        }
        matched = next;
    }
    matched[text.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_eq_replaces_existing_conditions() {
        let mut filter = Filter::new()
            .with_eq("institute_id", Uuid::nil())
            .and(FilterField::new(
                "institute_id",
                FilterOp::IsNull,
                FilterValue::Null,
            ));
        let id = Uuid::new_v4();
        filter.set_eq("institute_id", id);

        assert_eq!(filter.fields().len(), 1);
        assert_eq!(filter.eq_value("institute_id"), Some(&FilterValue::Uuid(id)));
    }

    #[test]
    fn test_matches_uuid_and_string() {
        let id = Uuid::new_v4();
        let record = json!({ "institute_id": id.to_string(), "title": "Algebra I" });

        assert!(Filter::new().with_eq("institute_id", id).matches(&record));
        assert!(!Filter::new().with_eq("institute_id", Uuid::new_v4()).matches(&record));
        assert!(Filter::new().with_eq("title", "Algebra I").matches(&record));
    }

    #[test]
    fn test_null_checks() {
        let record = json!({ "institute_id": null });
        let is_null = Filter::new().and(FilterField::new(
            "institute_id",
            FilterOp::IsNull,
            FilterValue::Null,
        ));
        assert!(is_null.matches(&record));
        assert!(is_null.matches(&json!({})));
    }

    #[test]
    fn test_ilike_patterns() {
        assert!(ilike("Linear Algebra", "%algebra%"));
        assert!(ilike("Linear Algebra", "linear%"));
        assert!(!ilike("Linear Algebra", "algebra"));
        assert!(ilike("abc", "a_c"));
        assert!(ilike("", "%"));
        assert!(ilike("100% done", "%100\\%%"));
        assert!(!ilike("1000 done", "%100\\%%"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({ "anything": 1 })));
    }
}
