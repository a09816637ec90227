//! Import of Label Studio JSON exports into NER training records.
//!
//! An export is a JSON array of task objects. Each task carries its raw text
//! and a list of labeled spans; the loader drops spans whose start offset
//! falls inside another span (see [`overlapping_spans`]) and turns the rest
//! into `(start, end, label)` entities.

mod overlap;

pub use overlap::overlapping_spans;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::LoaderConfig;
use crate::error::{ConvertError, Result};
use crate::models::{DocumentRecord, Entity, TrainingRecord};

/// Statistics collected during import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Documents converted.
    pub documents: usize,
    /// Spans seen across all documents.
    pub spans: usize,
    /// Entities emitted.
    pub entities: usize,
    /// Spans dropped because their start fell inside another span.
    pub overlapping: usize,
    /// Spans dropped because they had no label name.
    pub unlabeled: usize,
    /// Entities dropped by the label allow-list.
    pub filtered: usize,
}

impl ImportStats {
    /// Merge stats from another instance.
    pub fn merge(&mut self, other: &ImportStats) {
        self.documents += other.documents;
        self.spans += other.spans;
        self.entities += other.entities;
        self.overlapping += other.overlapping;
        self.unlabeled += other.unlabeled;
        self.filtered += other.filtered;
    }
}

/// Converts annotation exports into training records.
#[derive(Debug, Clone, Default)]
pub struct AnnotationLoader {
    config: LoaderConfig,
}

impl AnnotationLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and convert a single export file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
        self.load_with_stats(path).map(|(records, _)| records)
    }

    /// Load a single export file, also returning conversion statistics.
    pub fn load_with_stats(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Vec<TrainingRecord>, ImportStats)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConvertError::file_access(path, e))?;
        tracing::debug!("Reading annotation export {}", path.display());

        self.config.validate()?;
        let tasks: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ConvertError::from_json(path, e))?;
        let (records, stats) = self.convert_tasks(&tasks)?;
        log_stats(&path.display().to_string(), &stats);
        Ok((records, stats))
    }

    /// Load several export files in order and concatenate their records.
    ///
    /// Fails on the first file that cannot be read or parsed.
    pub fn load_many<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<(Vec<TrainingRecord>, ImportStats)> {
        let mut all_records = Vec::new();
        let mut total = ImportStats::default();

        for path in paths {
            let (records, stats) = self.load_with_stats(path)?;
            all_records.extend(records);
            total.merge(&stats);
        }

        Ok((all_records, total))
    }

    /// Convert an export read from any reader.
    ///
    /// With no path to report, reader I/O failures surface as `Parse`.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<TrainingRecord>> {
        self.config.validate()?;
        let tasks: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
        self.convert_tasks(&tasks).map(|(records, _)| records)
    }

    /// Convert an export held in memory.
    pub fn parse_str(&self, json: &str) -> Result<Vec<TrainingRecord>> {
        self.config.validate()?;
        let tasks: Vec<Map<String, Value>> = serde_json::from_str(json)?;
        self.convert_tasks(&tasks).map(|(records, _)| records)
    }

    fn convert_tasks(
        &self,
        tasks: &[Map<String, Value>],
    ) -> Result<(Vec<TrainingRecord>, ImportStats)> {
        let mut stats = ImportStats::default();
        let mut records = Vec::with_capacity(tasks.len());

        for (index, task) in tasks.iter().enumerate() {
            let document =
                DocumentRecord::from_object(task, &self.config.text_key, &self.config.span_key)
                    .map_err(|e| {
                        tracing::debug!("Task {} does not match the export layout: {}", index, e);
                        ConvertError::Parse(e)
                    })?;
            records.push(self.convert_with_stats(&document, &mut stats));
        }

        Ok((records, stats))
    }

    /// Resolve overlaps for one document and emit its training record.
    pub fn convert_document(&self, document: &DocumentRecord) -> TrainingRecord {
        self.convert_with_stats(document, &mut ImportStats::default())
    }

    fn convert_with_stats(
        &self,
        document: &DocumentRecord,
        stats: &mut ImportStats,
    ) -> TrainingRecord {
        let spans = document.spans();
        let bounds: Vec<(i64, i64)> = spans.iter().map(|s| s.bounds()).collect();
        let overlapping = overlapping_spans(&bounds);

        let mut entities = Vec::with_capacity(spans.len());
        for (span, &is_overlapping) in spans.iter().zip(&overlapping) {
            if is_overlapping {
                tracing::debug!(
                    "Dropping span {}..{} ({}): start falls inside another span",
                    span.start,
                    span.end,
                    span.first_label().unwrap_or("unlabeled")
                );
                stats.overlapping += 1;
                continue;
            }
            let Some(label) = span.first_label() else {
                stats.unlabeled += 1;
                continue;
            };
            if !self.config.is_label_selected(label) {
                stats.filtered += 1;
                continue;
            }
            entities.push(Entity::new(span.start, span.end, label));
        }

        stats.documents += 1;
        stats.spans += spans.len();
        stats.entities += entities.len();

        TrainingRecord::new(document.text.clone(), entities)
    }
}

fn log_stats(source: &str, stats: &ImportStats) {
    tracing::info!(
        source,
        documents = stats.documents,
        spans = stats.spans,
        entities = stats.entities,
        overlapping = stats.overlapping,
        unlabeled = stats.unlabeled,
        filtered = stats.filtered,
        "Converted annotation export"
    );
    if stats.entities == 0 && stats.filtered > 0 {
        tracing::warn!(
            "Label filter removed all {} entities from {}",
            stats.filtered,
            source
        );
    }
}

/// Load a Label Studio export with the default configuration.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    AnnotationLoader::default().load(path)
}
