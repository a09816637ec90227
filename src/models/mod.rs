//! Data models for annotation conversion.

mod annotation;
mod entity;

pub use annotation::{DocumentRecord, Span};
pub use entity::{Entity, EntityAnnotations, TrainingRecord};
