//! Brute-force pairwise coverage checking.
//!
//! Independent of the generator: given domain sizes and a set of index
//! tuples, report every pair of values (from two different domains) that no
//! tuple carries, and every tuple that does not fit the domains at all.
//! Domain pairs are checked in parallel.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::domain::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoverageError {
    #[error("value pairs of domains {first} and {second} do not fit in usize")]
    TooManyPairs { first: usize, second: usize },
}

/// A pair of values that must appear together in some tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairTarget {
    pub first: Value,
    pub second: Value,
}

/// A tuple that cannot be checked against the domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleDefect {
    WrongLength {
        tuple: usize,
        expected: usize,
        actual: usize,
    },
    OutOfRange {
        tuple: usize,
        domain: usize,
        value: usize,
        size: usize,
    },
}

/// Result of checking a tuple set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Number of value pairs that must be covered.
    pub total_pairs: usize,
    /// Number of those pairs found in at least one tuple.
    pub covered_pairs: usize,
    /// Uncovered pairs, in enumeration order.
    pub missing: Vec<PairTarget>,
    /// Tuples skipped because of their shape or values.
    pub defects: Vec<TupleDefect>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.defects.is_empty()
    }

    /// Fraction of pairs covered (1.0 when there is nothing to cover).
    pub fn coverage_fraction(&self) -> f64 {
        if self.total_pairs == 0 {
            return 1.0;
        }
        self.covered_pairs as f64 / self.total_pairs as f64
    }
}

/// Every pair target for these sizes, in the generator's requirement order.
pub fn pair_targets(domain_sizes: &[usize]) -> Vec<PairTarget> {
    let mut targets = Vec::new();
    for (i, j) in domain_pairs(domain_sizes.len()) {
        for a in 0..domain_sizes[i] {
            for b in 0..domain_sizes[j] {
                targets.push(PairTarget {
                    first: Value::new(i, a),
                    second: Value::new(j, b),
                });
            }
        }
    }
    targets
}

/// Check which pair targets `tuples` cover.
///
/// Fails only when the number of value pairs overflows `usize`.
pub fn verify_coverage(
    domain_sizes: &[usize],
    tuples: &[Vec<usize>],
) -> Result<CoverageReport, CoverageError> {
    let pairs = domain_pairs(domain_sizes.len());
    let mut total = 0usize;
    for &(i, j) in &pairs {
        total = domain_sizes[i]
            .checked_mul(domain_sizes[j])
            .and_then(|n| total.checked_add(n))
            .ok_or(CoverageError::TooManyPairs {
                first: i,
                second: j,
            })?;
    }

    let defects = find_defects(domain_sizes, tuples);
    let defective: HashSet<usize> = defects.iter().map(defect_tuple).collect();
    let valid: Vec<&[usize]> = tuples
        .iter()
        .enumerate()
        .filter(|(idx, _)| !defective.contains(idx))
        .map(|(_, t)| t.as_slice())
        .collect();

    let per_pair: Vec<(usize, usize, Vec<PairTarget>)> = pairs
        .into_par_iter()
        .map(|(i, j)| check_domain_pair(domain_sizes, &valid, i, j))
        .collect();

    let mut report = CoverageReport {
        total_pairs: 0,
        covered_pairs: 0,
        missing: Vec::new(),
        defects,
    };
    for (total, covered, missing) in per_pair {
        report.total_pairs += total;
        report.covered_pairs += covered;
        report.missing.extend(missing);
    }
    Ok(report)
}

fn domain_pairs(count: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..count {
        for j in (i + 1)..count {
            pairs.push((i, j));
        }
    }
    pairs
}

fn check_domain_pair(
    sizes: &[usize],
    tuples: &[&[usize]],
    i: usize,
    j: usize,
) -> (usize, usize, Vec<PairTarget>) {
    // Products were checked for overflow in verify_coverage.
    let (size_i, size_j) = (sizes[i], sizes[j]);
    let mut seen = vec![false; size_i * size_j];
    for tuple in tuples {
        seen[tuple[i] * size_j + tuple[j]] = true;
    }

    let missing: Vec<PairTarget> = seen
        .iter()
        .enumerate()
        .filter(|(_, hit)| !**hit)
        .map(|(combo, _)| PairTarget {
            first: Value::new(i, combo / size_j),
            second: Value::new(j, combo % size_j),
        })
        .collect();

    let total = seen.len();
    (total, total - missing.len(), missing)
}

fn find_defects(sizes: &[usize], tuples: &[Vec<usize>]) -> Vec<TupleDefect> {
    let mut defects = Vec::new();
    for (idx, tuple) in tuples.iter().enumerate() {
        if tuple.len() != sizes.len() {
            defects.push(TupleDefect::WrongLength {
                tuple: idx,
                expected: sizes.len(),
                actual: tuple.len(),
            });
            continue;
        }
        if let Some(domain) = tuple.iter().zip(sizes).position(|(value, size)| value >= size) {
            defects.push(TupleDefect::OutOfRange {
                tuple: idx,
                domain,
                value: tuple[domain],
                size: sizes[domain],
            });
        }
    }
    defects
}

fn defect_tuple(defect: &TupleDefect) -> usize {
    match defect {
        TupleDefect::WrongLength { tuple, .. } | TupleDefect::OutOfRange { tuple, .. } => *tuple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_targets_count() {
        // 3x2 + 3x2 + 2x2 = 16
        assert_eq!(pair_targets(&[3, 2, 2]).len(), 16);
        assert!(pair_targets(&[4]).is_empty());
    }

    #[test]
    fn test_full_product_is_complete() {
        let mut tuples = Vec::new();
        for a in 0..2 {
            for b in 0..3 {
                tuples.push(vec![a, b]);
            }
        }
        let report = verify_coverage(&[2, 3], &tuples).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.total_pairs, 6);
        assert_eq!(report.covered_pairs, 6);
        assert_eq!(report.coverage_fraction(), 1.0);
    }

    #[test]
    fn test_reports_missing_pairs_in_order() {
        let tuples = vec![vec![0, 0], vec![1, 1]];
        let report = verify_coverage(&[2, 2], &tuples).unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.covered_pairs, 2);
        assert_eq!(
            report.missing,
            vec![
                PairTarget {
                    first: Value::new(0, 0),
                    second: Value::new(1, 1)
                },
                PairTarget {
                    first: Value::new(0, 1),
                    second: Value::new(1, 0)
                },
            ]
        );
        assert_eq!(report.coverage_fraction(), 0.5);
    }

    #[test]
    fn test_malformed_tuples_reported_not_counted() {
        let tuples = vec![vec![0, 0], vec![0], vec![1, 7]];
        let report = verify_coverage(&[2, 2], &tuples).unwrap();
        assert_eq!(
            report.defects,
            vec![
                TupleDefect::WrongLength {
                    tuple: 1,
                    expected: 2,
                    actual: 1
                },
                TupleDefect::OutOfRange {
                    tuple: 2,
                    domain: 1,
                    value: 7,
                    size: 2
                },
            ]
        );
        assert_eq!(report.covered_pairs, 1);
        assert_eq!(report.missing.len(), 3);
    }

    #[test]
    fn test_pair_count_overflow_is_an_error() {
        assert_eq!(
            verify_coverage(&[usize::MAX, 2], &[]),
            Err(CoverageError::TooManyPairs {
                first: 0,
                second: 1
            })
        );
        assert!(verify_coverage(&[usize::MAX / 2, 2, 2], &[]).is_err());
    }
}
