//! README placeholder substitution.
//!
//! The report document carries bracketed tokens such as `[NUM_PAIRS]`. The set
//! of tokens is fixed by [`PLACEHOLDERS`]; anything else in the document,
//! including unknown bracketed words, is copied through untouched.

use std::path::Path;

use crate::data::BenchmarkResult;
use crate::errors::{Error, Result};
use crate::fsutil;

/// A named placeholder and the formatter for its backing field.
#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    /// Token name without delimiters, e.g. `NUM_SEQUENCES`.
    pub name: &'static str,
    /// Renders the backing field of the record.
    pub render: fn(&BenchmarkResult) -> String,
}

impl Placeholder {
    /// The delimited token as it appears in the document, e.g. `[NUM_SEQUENCES]`.
    #[must_use]
    pub fn token(&self) -> String {
        format!("[{}]", self.name)
    }
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

/// Every placeholder the updater knows about.
pub const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        name: "NUM_SEQUENCES",
        render: |r| r.num_sequences.to_string(),
    },
    Placeholder {
        name: "SEQUENCE_LENGTH",
        render: |r| r.sequence_length.to_string(),
    },
    Placeholder {
        name: "NUM_PAIRS",
        render: |r| r.num_pairs.to_string(),
    },
    Placeholder {
        name: "TOTAL_BASES",
        render: |r| r.total_bases.to_string(),
    },
    Placeholder {
        name: "BASES_PER_MICROSECOND",
        render: |r| two_decimals(r.bases_per_microsecond),
    },
    Placeholder {
        name: "SEQUENCES_PER_MICROSECOND",
        render: |r| two_decimals(r.sequences_per_microsecond),
    },
];

/// Outcome of rendering a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The document with every known token replaced.
    pub text: String,
    /// Number of token occurrences replaced.
    pub replaced: usize,
}

/// Replace every occurrence of every known token in `document`.
///
/// All values are rendered before the document is touched.
#[must_use]
pub fn render(document: &str, result: &BenchmarkResult) -> Substitution {
    let values: Vec<(String, String)> = PLACEHOLDERS
        .iter()
        .map(|p| (p.token(), (p.render)(result)))
        .collect();

    let mut text = document.to_string();
    let mut replaced = 0;
    for (token, value) in &values {
        let count = text.matches(token.as_str()).count();
        if count > 0 {
            text = text.replace(token.as_str(), value);
            replaced += count;
        }
    }
    Substitution { text, replaced }
}

/// Rewrite the document at `report` in place with the values of `result`.
///
/// The document is read in full, substituted in memory and written back in a
/// single atomic replace. A document without placeholders is left as is.
///
/// # Errors
///
/// [`Error::NotFound`] if the document does not exist, [`Error::Write`] if it
/// cannot be replaced.
pub fn update_report(report: &Path, result: &BenchmarkResult) -> Result<Substitution> {
    let document = std::fs::read_to_string(report).map_err(|e| Error::from_read(report, e))?;
    let substitution = render(&document, result);

    if substitution.replaced == 0 {
        tracing::warn!(path = %report.display(), "no placeholders found in report");
    }
    fsutil::atomic_write_bytes(report, substitution.text.as_bytes())?;
    tracing::info!(
        path = %report.display(),
        replaced = substitution.replaced,
        "updated report"
    );
    Ok(substitution)
}

/// Report entry point: load `results` and rewrite `report` with its values.
///
/// Nothing is written when loading fails.
///
/// # Errors
///
/// Any error of [`BenchmarkResult::load`] or [`update_report`].
pub fn update_readme(results: &Path, report: &Path) -> Result<Substitution> {
    let result = BenchmarkResult::load(results)?;
    update_report(report, &result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_result() -> BenchmarkResult {
        BenchmarkResult {
            algorithm_names: vec!["BitHamProcessor".to_string()],
            processing_speeds: vec![3.14159],
            sequence_length: 10,
            num_sequences: 1000,
            num_pairs: 499500,
            total_bases: 4995000,
            bases_per_microsecond: 3.14159,
            sequences_per_microsecond: 0.314159,
        }
    }

    #[test]
    fn test_placeholder_names_are_unique() {
        let mut names: Vec<&str> = PLACEHOLDERS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PLACEHOLDERS.len());
        assert_eq!(PLACEHOLDERS.len(), 6);
    }

    #[test]
    fn test_formatting_precision() {
        let r = create_test_result();
        let out = render("[BASES_PER_MICROSECOND] / [NUM_SEQUENCES]", &r);
        assert_eq!(out.text, "3.14 / 1000");
        assert_eq!(out.replaced, 2);
    }

    #[test]
    fn test_all_tokens() {
        let r = create_test_result();
        let doc = "[NUM_SEQUENCES]|[SEQUENCE_LENGTH]|[NUM_PAIRS]|[TOTAL_BASES]|\
                   [BASES_PER_MICROSECOND]|[SEQUENCES_PER_MICROSECOND]";
        let out = render(doc, &r);
        assert_eq!(out.text, "1000|10|499500|4995000|3.14|0.31");
        assert_eq!(out.replaced, 6);
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let mut r = create_test_result();
        r.bases_per_microsecond = 12.5;
        let doc = "Speed: [BASES_PER_MICROSECOND] b/µs, again [BASES_PER_MICROSECOND] b/µs";
        let out = render(doc, &r);
        assert_eq!(out.text, "Speed: 12.50 b/µs, again 12.50 b/µs");
        assert_eq!(out.replaced, 2);
    }

    #[test]
    fn test_unknown_tokens_untouched() {
        let r = create_test_result();
        let doc = "[UNKNOWN] [num_pairs] [NUM_PAIRS [NUM_PAIRS]] NUM_PAIRS";
        let out = render(doc, &r);
        assert_eq!(out.text, "[UNKNOWN] [num_pairs] [NUM_PAIRS 499500] NUM_PAIRS");
        assert_eq!(out.replaced, 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let r = create_test_result();
        let doc = "# Results\n\n| Pairs | [NUM_PAIRS] |\n| Speed | [SEQUENCES_PER_MICROSECOND] |\n";
        let once = render(doc, &r);
        let twice = render(&once.text, &r);
        assert_eq!(once.text, twice.text);
        assert_eq!(twice.replaced, 0);
    }

    #[test]
    fn test_document_without_tokens() {
        let r = create_test_result();
        let doc = "plain text\nwith ünïcode and [brackets]\n";
        let out = render(doc, &r);
        assert_eq!(out.text, doc);
        assert_eq!(out.replaced, 0);
    }

    #[test]
    fn test_update_report_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        let err = update_report(&path, &create_test_result()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_update_report_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "pairs=[NUM_PAIRS]\n").unwrap();

        let out = update_report(&path, &create_test_result()).unwrap();
        assert_eq!(out.replaced, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pairs=499500\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_update_report_through_symlink_keeps_mode() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("docs").join("README.md");
        fs::create_dir_all(real.parent().unwrap()).unwrap();
        fs::write(&real, "pairs=[NUM_PAIRS]\n").unwrap();
        fs::set_permissions(&real, fs::Permissions::from_mode(0o644)).unwrap();
        let link = dir.path().join("README.md");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        update_report(&link, &create_test_result()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "pairs=499500\n");
        let mode = fs::metadata(&real).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
