//! Loader configuration.
//!
//! Every field has a default matching a stock Label Studio JSON-MIN export,
//! so an empty config file (or none at all) converts standard exports.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

pub const DEFAULT_TEXT_KEY: &str = "text";
pub const DEFAULT_SPAN_KEY: &str = "label";

/// Settings for [`AnnotationLoader`](crate::import::AnnotationLoader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Document key holding the raw text.
    pub text_key: String,
    /// Document key holding the span list. Label Studio names this after the
    /// labeling control, so projects with a renamed control need to set it.
    pub span_key: String,
    /// Label names to keep. `None` keeps every label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            text_key: DEFAULT_TEXT_KEY.to_string(),
            span_key: DEFAULT_SPAN_KEY.to_string(),
            labels: None,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConvertError::file_access(path, e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let config: LoaderConfig = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| ConvertError::Config(format!("Failed to parse TOML config: {}", e)))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| ConvertError::Config(format!("Failed to parse YAML config: {}", e)))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| ConvertError::Config(format!("Failed to parse JSON config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded loader config from {}", path.display());
        Ok(config)
    }

    /// Restrict output to the given label names.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_label_selected(&self, label: &str) -> bool {
        match &self.labels {
            Some(labels) => labels.iter().any(|l| l == label),
            None => true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.text_key.is_empty() {
            return Err(ConvertError::Config("text_key must not be empty".into()));
        }
        if self.span_key.is_empty() {
            return Err(ConvertError::Config("span_key must not be empty".into()));
        }
        if self.text_key == self.span_key {
            return Err(ConvertError::Config(format!(
                "text_key and span_key must differ (both are '{}')",
                self.text_key
            )));
        }
        if matches!(&self.labels, Some(labels) if labels.is_empty()) {
            // An empty allow-list would silently drop every entity.
            return Err(ConvertError::Config(
                "labels must name at least one label when set".into(),
            ));
        }
        Ok(())
    }
}
