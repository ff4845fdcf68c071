//! Detector metadata and trait.

use std::fmt;

/// Metadata describing a detection stage.
///
/// Stages identify themselves to the pipeline, which logs each stage as it
/// runs. Ids use a `category/name` path, e.g. `detect/cycles`.
#[derive(Debug, Clone)]
pub struct DetectorMetadata {
    /// Unique detector identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
}

impl DetectorMetadata {
    /// Create metadata with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Display for DetectorMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A detection stage in the analysis pipeline.
pub trait Detector {
    /// Returns the detector's metadata.
    fn metadata(&self) -> &DetectorMetadata;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = DetectorMetadata::new("detect/cycles").with_description("Bounded cycle search");
        assert_eq!(meta.id, "detect/cycles");
        assert_eq!(meta.description, "Bounded cycle search");
        assert_eq!(meta.to_string(), "detect/cycles");
    }
}
