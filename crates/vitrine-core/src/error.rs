//! Error types for the presentation core.

use serde::{Deserialize, Serialize};

/// Error type for direct engine operations. Host signals never produce these;
/// stale signals are logged and dropped instead (see engine.rs).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum VitrineError {
    /// Lightbox activation with an index outside the current sequence
    #[error("image index {index} out of range for gallery of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Lightbox activation while the overlay exit transition is running
    #[error("lightbox is mid-close; activation rejected")]
    OverlayBusy,

    /// Direct call referencing a gallery item the engine never issued
    #[error("unknown gallery item: {id}")]
    UnknownItem { id: u32 },

    /// Direct call referencing a target the engine never issued
    #[error("unknown target: {id}")]
    UnknownTarget { id: u32 },

    /// Gallery manifest failed semantic validation
    #[error("gallery manifest rejected: {reason}")]
    ManifestRejected { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic core error
    #[error("{message}")]
    Generic { message: String },
}

pub type Result<T> = core::result::Result<T, VitrineError>;

impl VitrineError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OverlayBusy | Self::ManifestRejected { .. } | Self::SerializationError { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. }
            | Self::UnknownItem { .. }
            | Self::UnknownTarget { .. } => "usage",
            Self::OverlayBusy => "state",
            Self::ManifestRejected { .. } => "manifest",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = VitrineError::new("test error");
        assert!(matches!(error, VitrineError::Generic { .. }));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(VitrineError::OverlayBusy.is_recoverable());
        let fatal = VitrineError::IndexOutOfRange { index: 9, len: 3 };
        assert!(!fatal.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let usage = VitrineError::UnknownItem { id: 7 };
        assert_eq!(usage.category(), "usage");
        assert_eq!(VitrineError::OverlayBusy.category(), "state");
    }

    #[test]
    fn test_serialization() {
        let error = VitrineError::IndexOutOfRange { index: 4, len: 2 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: VitrineError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
