//! Error types for fit/transform operations.

use crate::preprocessing::traits::TransformerKind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Error type for transformer operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Data has the wrong type or dimensionality for the component.
    #[error("{context}: invalid shape: expected {expected}, got {got}")]
    Shape {
        context: String,
        expected: String,
        got: String,
    },
    /// `transform` was called before `fit`.
    #[error("{kind} is not fitted: call fit before transform")]
    NotFitted { kind: TransformerKind },
    /// An aggregate was requested over a column with no valid values.
    #[error("column '{column}' has no valid values to aggregate")]
    EmptyColumn { column: String },
    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),
    /// Column count differs from the one seen during fit.
    #[error("feature mismatch: expected {expected} columns, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    /// Configuration or override options are invalid.
    #[error("invalid {kind} configuration: {message}")]
    InvalidConfig {
        kind: TransformerKind,
        message: String,
    },
    /// A pipeline stage failed.
    #[error("pipeline stage {index} ({kind}) failed: {source}")]
    Stage {
        index: usize,
        kind: TransformerKind,
        #[source]
        source: Box<TransformError>,
    },
    /// The transformer inside a wrapper failed.
    #[error("wrapped {kind} failed: {source}")]
    Wrapped {
        kind: TransformerKind,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    /// Shape error for a component that received the wrong kind of data.
    pub fn shape(kind: &TransformerKind, expected: impl Into<String>, got: impl Into<String>) -> Self {
        TransformError::Shape {
            context: kind.to_string(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Wrap an error raised by pipeline stage `index`.
    pub fn in_stage(self, index: usize, kind: TransformerKind) -> Self {
        TransformError::Stage {
            index,
            kind,
            source: Box::new(self),
        }
    }

    /// Wrap an error raised by the inner transformer of a wrapper.
    pub fn wrapped(self, kind: TransformerKind) -> Self {
        TransformError::Wrapped {
            kind,
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping nested stage and wrapper failures.
    pub fn root_cause(&self) -> &TransformError {
        match self {
            TransformError::Stage { source, .. } | TransformError::Wrapped { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}
