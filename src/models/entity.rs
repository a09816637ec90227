//! Output side of the conversion: entities grouped into training records.
//!
//! The JSON forms match what spaCy-style NER trainers consume:
//! an entity is `[start, end, "LABEL"]` and a record is
//! `["text", {"entities": [...]}]`.

use serde::{Deserialize, Serialize};

type EntityTuple = (i64, i64, String);
type RecordTuple = (Option<String>, EntityAnnotations);

/// A span that survived overlap resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EntityTuple", into = "EntityTuple")]
pub struct Entity {
    pub start: i64,
    pub end: i64,
    pub label: String,
}

impl Entity {
    pub fn new(start: i64, end: i64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

impl From<EntityTuple> for Entity {
    fn from((start, end, label): EntityTuple) -> Self {
        Self { start, end, label }
    }
}

impl From<Entity> for EntityTuple {
    fn from(entity: Entity) -> Self {
        (entity.start, entity.end, entity.label)
    }
}

/// The `{"entities": [...]}` half of a training record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAnnotations {
    pub entities: Vec<Entity>,
}

impl EntityAnnotations {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// One converted document: its text and the entities kept for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordTuple", into = "RecordTuple")]
pub struct TrainingRecord {
    /// Passed through from the export, including when it was absent.
    pub text: Option<String>,
    pub annotations: EntityAnnotations,
}

impl TrainingRecord {
    pub fn new(text: Option<String>, entities: Vec<Entity>) -> Self {
        Self {
            text,
            annotations: EntityAnnotations::new(entities),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.annotations.entities
    }
}

impl From<RecordTuple> for TrainingRecord {
    fn from((text, annotations): RecordTuple) -> Self {
        Self { text, annotations }
    }
}

impl From<TrainingRecord> for RecordTuple {
    fn from(record: TrainingRecord) -> Self {
        (record.text, record.annotations)
    }
}
