//! Input side of the conversion: documents and spans as exported by Label Studio.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A labeled character-offset interval from an annotation export.
///
/// Label Studio also writes the covered `text` on each span; it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
    /// Label names. Only the first one is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Span {
    pub fn new(start: i64, end: i64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            labels: Some(vec![label.into()]),
        }
    }

    /// A span carrying no label names at all.
    pub fn unlabeled(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            labels: None,
        }
    }

    /// `(start, end)` pair used by the overlap check.
    pub fn bounds(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    /// First label name, if the span has any.
    pub fn first_label(&self) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|s| s.as_str())
    }
}

/// One task of the export: raw text plus its spans.
///
/// Built with [`DocumentRecord::from_object`], which reads the key names
/// chosen in the loader config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRecord {
    pub text: Option<String>,
    /// Absent and `null` both mean "no spans".
    pub spans: Option<Vec<Span>>,
}

impl DocumentRecord {
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: Some(text.into()),
            spans: Some(spans),
        }
    }

    /// Read a document out of a raw export object using the given key names.
    ///
    /// Missing keys and `null` values become `None`; values of the wrong
    /// shape are reported as the underlying serde error.
    pub fn from_object(
        object: &Map<String, Value>,
        text_key: &str,
        span_key: &str,
    ) -> serde_json::Result<Self> {
        let text = match object.get(text_key) {
            Some(value) => Option::<String>::deserialize(value)?,
            None => None,
        };
        let spans = match object.get(span_key) {
            Some(value) => Option::<Vec<Span>>::deserialize(value)?,
            None => None,
        };
        Ok(Self { text, spans })
    }

    pub fn spans(&self) -> &[Span] {
        self.spans.as_deref().unwrap_or(&[])
    }
}
