//! Submodule defining the errors used across the crate.

use std::io;
use std::path::PathBuf;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, deriving or rendering benchmark results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input artifact or document does not exist.
    #[error("{} does not exist", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// The input exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        /// The path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The artifact is not valid structured data.
    #[error("{} is not a valid benchmark record: {reason}", path.display())]
    Malformed {
        /// The artifact path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// A required field is absent from the record.
    #[error("{} is missing required field `{field}`", path.display())]
    MissingField {
        /// The artifact path.
        path: PathBuf,
        /// Name of the absent field.
        field: &'static str,
    },
    /// A field is present but has the wrong type or breaks an invariant.
    #[error("{}: field `{field}` {reason}", path.display())]
    InvalidField {
        /// The artifact path.
        path: PathBuf,
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The name, primary and derived sequences disagree in length.
    #[error(
        "metric sequences differ in length: {names} names, {primary} primary values, {derived} derived values"
    )]
    ShapeMismatch {
        /// Number of algorithm names.
        names: usize,
        /// Number of primary metric values.
        primary: usize,
        /// Number of derived metric values.
        derived: usize,
    },
    /// Drawing the chart failed.
    #[error("cannot render chart to {}: {reason}", path.display())]
    Render {
        /// The chart destination.
        path: PathBuf,
        /// Backend message.
        reason: String,
    },
    /// An output artifact could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// The destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Coarse failure classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input is absent or unavailable.
    NotFound,
    /// An input failed to parse or violates a record invariant.
    MalformedInput,
    /// Parallel metric sequences disagree in length.
    ShapeMismatch,
    /// An output could not be produced.
    WriteFailure,
}

impl ErrorKind {
    /// Stable label used in diagnostics, e.g. `error[malformed-input]`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::MalformedInput => "malformed-input",
            ErrorKind::ShapeMismatch => "shape-mismatch",
            ErrorKind::WriteFailure => "write-failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Error {
    /// The failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } | Error::Unreadable { .. } => ErrorKind::NotFound,
            Error::Malformed { .. } | Error::MissingField { .. } | Error::InvalidField { .. } => {
                ErrorKind::MalformedInput
            }
            Error::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Error::Render { .. } | Error::Write { .. } => ErrorKind::WriteFailure,
        }
    }

    /// Map a read failure on `path` to `NotFound` or `Unreadable`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Unreadable { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_not_found_maps_to_not_found() {
        let err = Error::from_read("a.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "a.json does not exist");
    }

    #[test]
    fn test_read_permission_maps_to_unreadable() {
        let err = Error::from_read("a.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::Unreadable { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_messages_name_field_and_path() {
        let err = Error::MissingField {
            path: PathBuf::from("benches/benchmark_results.json"),
            field: "sequence_length",
        };
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(
            err.to_string(),
            "benches/benchmark_results.json is missing required field `sequence_length`"
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ErrorKind::NotFound.label(), "not-found");
        assert_eq!(ErrorKind::MalformedInput.to_string(), "malformed-input");
        assert_eq!(
            Error::ShapeMismatch {
                names: 2,
                primary: 2,
                derived: 1
            }
            .kind()
            .label(),
            "shape-mismatch"
        );
        assert_eq!(ErrorKind::WriteFailure.label(), "write-failure");
    }
}
