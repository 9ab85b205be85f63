use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Reads a typed value from a raw cell, but only when that value prints back as
    /// exactly `raw`. Anything else stays text, so "00501", "1e3" or "NaN" survive
    /// untouched. Empty cells become `Null`.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            if i.to_string() == raw {
                return FieldValue::Int(i);
            }
        }
        if let Ok(x) = raw.parse::<f64>() {
            let value = FieldValue::Float(x);
            if x.is_finite() && value.to_string() == raw {
                return value;
            }
        }
        match raw {
            "true" => FieldValue::Bool(true),
            "false" => FieldValue::Bool(false),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    /// Infers one column at a time. Numbers and booleans are kept only when every
    /// non-empty cell agrees; a single text cell turns the whole column into text.
    pub fn infer_column<'a, I>(cells: I) -> Vec<FieldValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let raws: Vec<&str> = cells.into_iter().collect();
        let values: Vec<FieldValue> = raws.iter().map(|raw| Self::infer(raw)).collect();

        let numeric = values
            .iter()
            .all(|v| matches!(v, FieldValue::Null | FieldValue::Int(_) | FieldValue::Float(_)));
        let boolean = values
            .iter()
            .all(|v| matches!(v, FieldValue::Null | FieldValue::Bool(_)));
        if numeric || boolean {
            return values;
        }

        raws.iter()
            .map(|raw| {
                if raw.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::Text(raw.to_string())
                }
            })
            .collect()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            // whole floats keep their ".0", the way pandas writes them back out
            FieldValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One input record, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackRow {
    fields: BTreeMap<String, FieldValue>,
}

impl FeedbackRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// String-coerced value of `column`, or `None` when the row has no such key.
    pub fn text(&self, column: &str) -> Option<String> {
        self.fields.get(column).map(|v| v.to_string())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTable {
    columns: Vec<String>,
    rows: Vec<FeedbackRow>,
}

impl FeedbackTable {
    pub fn new(columns: Vec<String>, rows: Vec<FeedbackRow>) -> Self {
        Self { columns, rows }
    }

    /// Builds a table whose header is the union of the rows' columns, in first-seen order.
    pub fn from_rows(rows: Vec<FeedbackRow>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn from_texts<I, S>(column: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = texts
            .into_iter()
            .map(|t| FeedbackRow::new().with(column, FieldValue::Text(t.into())))
            .collect();
        Self::new(vec![column.to_string()], rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeedbackRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(Error::MissingColumn {
                requested: column.to_string(),
                available: self.columns.clone(),
            })
        }
    }
}
