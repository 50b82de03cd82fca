//! Data loading module: reads the benchmark record written by the benchmark run.
//!
//! The record is a single JSON object. Fields are pulled out one by one so a
//! missing or mistyped field is reported by name, then the record invariants
//! are checked before anything downstream sees the values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::errors::{Error, Result};

/// Throughput measurements of a single benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Compared algorithms, in display order.
    pub algorithm_names: Vec<String>,
    /// Bases processed per microsecond, one per algorithm.
    pub processing_speeds: Vec<f64>,
    /// Number of bases in each sequence.
    pub sequence_length: u64,
    /// Number of generated sequences.
    pub num_sequences: u64,
    /// Number of compared sequence pairs.
    pub num_pairs: u64,
    /// Total bases processed in one pass.
    pub total_bases: u64,
    /// Headline bases per microsecond.
    pub bases_per_microsecond: f64,
    /// Headline sequences per microsecond.
    pub sequences_per_microsecond: f64,
}

fn field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    name: &'static str,
    path: &Path,
) -> Result<T> {
    let value = object.get(name).ok_or_else(|| Error::MissingField {
        path: path.to_path_buf(),
        field: name,
    })?;
    T::deserialize(value).map_err(|e| Error::InvalidField {
        path: path.to_path_buf(),
        field: name,
        reason: e.to_string(),
    })
}

fn invalid(path: &Path, field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidField {
        path: path.to_path_buf(),
        field,
        reason: reason.into(),
    }
}

impl BenchmarkResult {
    /// Load and validate the record stored at `path`.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] if the file does not exist.
    /// * [`Error::Malformed`] if it is not a JSON object, including bytes that
    ///   are not valid UTF-8.
    /// * [`Error::MissingField`] / [`Error::InvalidField`] naming the offending field.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::from_read(path, e))?;
        let result = Self::parse(&bytes, path)?;
        tracing::debug!(
            path = %path.display(),
            algorithms = result.algorithm_names.len(),
            "loaded benchmark results"
        );
        Ok(result)
    }

    /// Parse a record from raw JSON bytes; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Same as [`BenchmarkResult::load`], minus the I/O failures.
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| Error::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let Value::Object(object) = value else {
            return Err(Error::Malformed {
                path: path.to_path_buf(),
                reason: "expected a JSON object at the top level".to_string(),
            });
        };

        let result = Self {
            algorithm_names: field(&object, "algorithm_names", path)?,
            processing_speeds: field(&object, "processing_speeds", path)?,
            sequence_length: field(&object, "sequence_length", path)?,
            num_sequences: field(&object, "num_sequences", path)?,
            num_pairs: field(&object, "num_pairs", path)?,
            total_bases: field(&object, "total_bases", path)?,
            bases_per_microsecond: field(&object, "bases_per_microsecond", path)?,
            sequences_per_microsecond: field(&object, "sequences_per_microsecond", path)?,
        };
        result.validate(path)?;
        Ok(result)
    }

    /// Check the record invariants.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidField`] naming the first field that breaks an invariant.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.algorithm_names.is_empty() {
            return Err(invalid(path, "algorithm_names", "must not be empty"));
        }
        if self.processing_speeds.len() != self.algorithm_names.len() {
            return Err(invalid(
                path,
                "processing_speeds",
                format!(
                    "has {} values but `algorithm_names` has {}",
                    self.processing_speeds.len(),
                    self.algorithm_names.len()
                ),
            ));
        }
        if let Some((i, speed)) = self
            .processing_speeds
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite())
        {
            return Err(invalid(
                path,
                "processing_speeds",
                format!("contains non-finite value {speed} at index {i}"),
            ));
        }
        if self.sequence_length == 0 {
            return Err(invalid(path, "sequence_length", "must be greater than zero"));
        }
        for (name, value) in [
            ("bases_per_microsecond", self.bases_per_microsecond),
            ("sequences_per_microsecond", self.sequences_per_microsecond),
        ] {
            if !value.is_finite() {
                return Err(invalid(path, name, format!("is not finite ({value})")));
            }
        }
        Ok(())
    }

    /// Write the record as pretty JSON, the same shape [`BenchmarkResult::load`] reads.
    ///
    /// # Errors
    ///
    /// [`Error::Write`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        crate::fsutil::atomic_write_bytes(path, json.as_bytes())
    }
}
