//! Two-column tabular view over training records.
//!
//! Serializes column-wise (`{"text": [...], "label": [...]}`), which is the
//! shape dataframe libraries accept for construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::models::{EntityAnnotations, TrainingRecord};

/// Aligned `text` and `label` columns, one row per training record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableColumns")]
pub struct Table {
    text: Vec<Option<String>>,
    label: Vec<EntityAnnotations>,
}

#[derive(Deserialize)]
struct TableColumns {
    text: Vec<Option<String>>,
    label: Vec<EntityAnnotations>,
}

impl TryFrom<TableColumns> for Table {
    type Error = String;

    fn try_from(columns: TableColumns) -> std::result::Result<Self, Self::Error> {
        if columns.text.len() != columns.label.len() {
            return Err(format!(
                "column lengths differ: text has {} rows, label has {}",
                columns.text.len(),
                columns.label.len()
            ));
        }
        Ok(Self {
            text: columns.text,
            label: columns.label,
        })
    }
}

impl Table {
    pub fn from_records(records: &[TrainingRecord]) -> Self {
        records.iter().cloned().collect()
    }

    /// Build a table from untyped JSON records.
    ///
    /// Expects an array of `[text, {"entities": [...]}]` pairs where `text`
    /// is a string or `null`. Any other shape is rejected with the index of
    /// the first offending row.
    pub fn from_value(value: &Value) -> Result<Self> {
        let rows = value.as_array().ok_or_else(|| {
            ConvertError::invalid_input("expected a sequence of [text, annotations] records")
        })?;

        let mut table = Table {
            text: Vec::with_capacity(rows.len()),
            label: Vec::with_capacity(rows.len()),
        };

        for (index, row) in rows.iter().enumerate() {
            let pair = match row.as_array() {
                Some(pair) if pair.len() == 2 => pair,
                _ => {
                    return Err(ConvertError::invalid_input(format!(
                        "row {}: expected a [text, annotations] pair",
                        index
                    )))
                }
            };
            let text = Option::<String>::deserialize(&pair[0]).map_err(|e| {
                ConvertError::invalid_input(format!("row {}: bad text: {}", index, e))
            })?;
            let annotations = EntityAnnotations::deserialize(&pair[1]).map_err(|e| {
                ConvertError::invalid_input(format!("row {}: bad annotations: {}", index, e))
            })?;
            table.text.push(text);
            table.label.push(annotations);
        }

        Ok(table)
    }

    pub fn text(&self) -> &[Option<String>] {
        &self.text
    }

    pub fn label(&self) -> &[EntityAnnotations] {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (Option<&str>, &EntityAnnotations)> + '_ {
        self.text
            .iter()
            .map(|t| t.as_deref())
            .zip(self.label.iter())
    }

    /// Turn the columns back into training records.
    pub fn into_records(self) -> Vec<TrainingRecord> {
        self.text
            .into_iter()
            .zip(self.label)
            .map(|(text, annotations)| TrainingRecord { text, annotations })
            .collect()
    }

    /// Number of entities per label name across all rows.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entity in self.label.iter().flat_map(|a| a.entities.iter()) {
            *counts.entry(entity.label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<TrainingRecord> for Table {
    fn from_iter<I: IntoIterator<Item = TrainingRecord>>(iter: I) -> Self {
        let (text, label) = iter
            .into_iter()
            .map(|record| (record.text, record.annotations))
            .unzip();
        Self { text, label }
    }
}

impl From<Vec<TrainingRecord>> for Table {
    fn from(records: Vec<TrainingRecord>) -> Self {
        records.into_iter().collect()
    }
}

/// Project training records into a two-column table.
pub fn to_table(records: &[TrainingRecord]) -> Table {
    Table::from_records(records)
}
