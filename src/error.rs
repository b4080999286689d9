//! Error types for the unidoc library.

use std::io;
use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias for unidoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, styling or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// A part was appended to a composite whose children were sealed.
    #[error("cannot append to {kind}: child sequence is not appendable")]
    NotAppendable {
        /// Kind of the composite that rejected the append
        kind: NodeKind,
    },

    /// Two style values of incompatible variants were compared or merged.
    #[error("incompatible style variants: cannot merge {from} into {to}")]
    IncompatibleStyles {
        /// Variant name of the source style
        from: &'static str,
        /// Variant name of the target style
        to: &'static str,
    },

    /// A color literal could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A style sheet definition is malformed.
    #[error("style sheet error: {0}")]
    StyleSheet(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Error raised by a renderer.
    #[error("rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotAppendable {
            kind: NodeKind::Table,
        };
        assert_eq!(
            err.to_string(),
            "cannot append to Table: child sequence is not appendable"
        );

        let err = Error::IncompatibleStyles {
            from: "Layout",
            to: "Text",
        };
        assert_eq!(
            err.to_string(),
            "incompatible style variants: cannot merge Layout into Text"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
