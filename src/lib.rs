//! labelstudio-ner - Label Studio exports to NER training data.
//!
//! Reads a Label Studio JSON export, drops spans whose start offset falls
//! inside another span of the same document, and produces
//! `(text, {"entities": [(start, end, label), ...]})` records plus a
//! two-column table view of them.
//!
//! ```no_run
//! let records = labelstudio_ner::load("export.json")?;
//! let table = labelstudio_ner::to_table(&records);
//! assert_eq!(table.len(), records.len());
//! # Ok::<(), labelstudio_ner::ConvertError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod table;

pub use config::LoaderConfig;
pub use error::{ConvertError, Result};
pub use export::{read_training_data, save_training_data, to_json_string};
pub use import::{load, overlapping_spans, AnnotationLoader, ImportStats};
pub use models::{DocumentRecord, Entity, EntityAnnotations, Span, TrainingRecord};
pub use table::{to_table, Table};
