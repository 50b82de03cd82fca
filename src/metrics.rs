//! Derived metrics: per-sequence throughput and the per-algorithm series.

use crate::data::BenchmarkResult;
use crate::errors::{Error, Result};

/// Sequences processed per microsecond, one per algorithm.
///
/// Divides every bases-per-microsecond speed by the sequence length. The
/// loader guarantees `sequence_length > 0`.
#[must_use]
pub fn per_item(result: &BenchmarkResult) -> Vec<f64> {
    let length = result.sequence_length as f64;
    result
        .processing_speeds
        .iter()
        .map(|speed| speed / length)
        .collect()
}

/// Throughput of one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmThroughput {
    /// Algorithm name.
    pub name: String,
    /// Bases per microsecond (measured).
    pub per_base: f64,
    /// Sequences per microsecond (derived).
    pub per_sequence: f64,
}

/// Ordered per-algorithm throughput, the input of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputSeries {
    entries: Vec<AlgorithmThroughput>,
}

impl ThroughputSeries {
    /// Pair names with their measured and derived throughput.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if the three sequences differ in length.
    pub fn new(names: &[String], primary: &[f64], derived: &[f64]) -> Result<Self> {
        if names.len() != primary.len() || primary.len() != derived.len() {
            return Err(Error::ShapeMismatch {
                names: names.len(),
                primary: primary.len(),
                derived: derived.len(),
            });
        }
        let entries = names
            .iter()
            .zip(primary)
            .zip(derived)
            .map(|((name, &per_base), &per_sequence)| AlgorithmThroughput {
                name: name.clone(),
                per_base,
                per_sequence,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Derive per-sequence throughput from `result` and pair everything up.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if the record was built without validation and
    /// its name and speed lists differ in length.
    pub fn from_result(result: &BenchmarkResult) -> Result<Self> {
        let derived = per_item(result);
        Self::new(&result.algorithm_names, &result.processing_speeds, &derived)
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmThroughput> {
        self.entries.iter()
    }

    /// Number of algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Algorithm names in display order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// The fastest algorithm by bases per microsecond; ties keep the first.
    #[must_use]
    pub fn fastest(&self) -> Option<&AlgorithmThroughput> {
        self.entries
            .iter()
            .reduce(|best, e| if e.per_base > best.per_base { e } else { best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_result(speeds: &[f64], sequence_length: u64) -> BenchmarkResult {
        BenchmarkResult {
            algorithm_names: (0..speeds.len()).map(|i| format!("algo_{i}")).collect(),
            processing_speeds: speeds.to_vec(),
            sequence_length,
            num_sequences: 1536,
            num_pairs: 1178880,
            total_bases: 11788800,
            bases_per_microsecond: 1.0,
            sequences_per_microsecond: 0.1,
        }
    }

    #[test]
    fn test_per_item_divides_by_sequence_length() {
        let mut r = create_test_result(&[2.0, 8.0], 4);
        r.algorithm_names = vec!["naive".into(), "simd".into()];
        assert_eq!(per_item(&r), vec![0.5, 2.0]);
    }

    #[test]
    fn test_round_trip_law() {
        let speeds = [0.1, 3.14159, 42.0, 1234.5678, 1e-6, 9.99e9];
        for len in [1, 3, 7, 10, 1000] {
            let r = create_test_result(&speeds, len);
            let derived = per_item(&r);
            assert_eq!(derived.len(), speeds.len());
            for (d, s) in derived.iter().zip(&speeds) {
                let back = d * len as f64;
                assert!((back - s).abs() <= s.abs() * 1e-12, "{back} != {s}");
            }
        }
    }

    #[test]
    fn test_per_item_does_not_mutate_input() {
        let r = create_test_result(&[5.0], 10);
        let before = r.clone();
        let _ = per_item(&r);
        assert_eq!(r, before);
    }

    #[test]
    fn test_series_pairs_by_index() {
        let r = create_test_result(&[2.0, 8.0, 4.0], 4);
        let s = ThroughputSeries::from_result(&r).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.names(), vec!["algo_0", "algo_1", "algo_2"]);
        let pairs: Vec<(f64, f64)> = s.iter().map(|e| (e.per_base, e.per_sequence)).collect();
        assert_eq!(pairs, vec![(2.0, 0.5), (8.0, 2.0), (4.0, 1.0)]);
        assert_eq!(s.fastest().unwrap().name, "algo_1");
    }

    #[test]
    fn test_series_shape_mismatch() {
        let names = vec!["a".to_string(), "b".to_string()];
        let err = ThroughputSeries::new(&names, &[1.0, 2.0], &[1.0]).unwrap_err();
        match err {
            Error::ShapeMismatch {
                names,
                primary,
                derived,
            } => assert_eq!((names, primary, derived), (2, 2, 1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unvalidated_record_mismatch_is_reported() {
        let mut r = create_test_result(&[1.0, 2.0], 2);
        r.algorithm_names.pop();
        assert!(matches!(
            ThroughputSeries::from_result(&r),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_fastest_tie_keeps_first() {
        let r = create_test_result(&[3.0, 3.0], 1);
        let s = ThroughputSeries::from_result(&r).unwrap();
        assert_eq!(s.fastest().unwrap().name, "algo_0");
    }
}
