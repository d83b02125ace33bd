use crate::Value;
use std::{
    collections::{HashMap, hash_map},
    sync::Arc,
};

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;

/// Value returned by [`Row::get`] for columns the row does not carry.
static EMPTY: Value = Value::Varchar(String::new());

/// One decoded result row, indexed by column name.
///
/// NULL columns are not stored: a column is either present with a non NULL value or absent.
/// Absence and a present empty value are told apart with [`Row::exists`] and [`Value::is_empty`].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a row from column labels and values aligned by index.
    ///
    /// NULL values are dropped. When a label repeats, the last value wins.
    pub fn from_labeled(labels: &[String], values: impl IntoIterator<Item = Value>) -> Self {
        labels.iter().cloned().zip(values).collect()
    }

    /// Whether the row carries a non NULL value for `column`.
    pub fn exists(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Value of `column`, the empty string when the column is absent.
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&EMPTY)
    }

    pub fn get_column(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn raw_values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn into_raw_values(self) -> HashMap<String, Value> {
        self.values
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
