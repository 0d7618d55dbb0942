use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{CountingError, Result};

/// Minimum number of counting qubits for a single assumed solution count:
/// grow `t` until rounding the encoded phase to a `t`-bit index and decoding
/// it back lands within `tolerance` of the true count.
fn counting_qubits_for_solution_count(
    solution_count: usize,
    num_oracle_qubits: usize,
    tolerance: f64,
    max_counting_qubits: usize,
) -> Result<usize> {
    let max_solutions = (1u64 << num_oracle_qubits) as f64;
    let s = solution_count as f64;
    let angle = (s / max_solutions).sqrt().asin();

    let mut t = 1;
    loop {
        t += 1;
        if t > max_counting_qubits {
            return Err(CountingError::Convergence {
                max_counting_qubits,
            });
        }

        let index = (2f64.powi(t as i32 + 1) / TAU * angle).round();
        let theta = index / 2f64.powi(t as i32) * TAU;
        let decoded = max_solutions * (theta / 2.0).sin().powi(2);
        if (s - decoded).abs() <= tolerance {
            return Ok(t);
        }
    }
}

/// Analytic search for the counting-register size: the smallest `t` (at
/// least 2) such that the phase-index round trip stays within `tolerance`
/// for every possible solution count `0..=2^m`. Deterministic per
/// `(m, tolerance)` pair.
pub fn counting_qubits_for_tolerance(
    tolerance: f64,
    num_oracle_qubits: usize,
    max_counting_qubits: usize,
) -> Result<usize> {
    if tolerance <= 0.0 {
        return Err(CountingError::Configuration(format!(
            "tolerance must be positive, got {tolerance}"
        )));
    }

    let mut t = 2;
    for solution_count in 0..=1usize << num_oracle_qubits {
        t = t.max(counting_qubits_for_solution_count(
            solution_count,
            num_oracle_qubits,
            tolerance,
            max_counting_qubits,
        )?);
    }

    debug!(
        tolerance,
        oracle_qubits = num_oracle_qubits,
        counting_qubits = t,
        "sized counting register"
    );
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_oracle_qubits_at_half_tolerance() {
        // Worst case over s in 0..=4 is s = 1 (and s = 3), which round-trips
        // to within 0.415 at t = 3.
        assert_eq!(counting_qubits_for_tolerance(0.5, 2, 24).unwrap(), 3);
    }

    #[test]
    fn test_three_oracle_qubits_at_half_tolerance() {
        assert_eq!(counting_qubits_for_tolerance(0.5, 3, 24).unwrap(), 5);
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = counting_qubits_for_tolerance(0.5, 3, 24).unwrap();
        let second = counting_qubits_for_tolerance(0.5, 3, 24).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tighter_tolerance_needs_more_qubits() {
        let loose = counting_qubits_for_tolerance(0.5, 3, 24).unwrap();
        let tight = counting_qubits_for_tolerance(0.05, 3, 24).unwrap();
        assert!(tight > loose);
    }

    #[test]
    fn test_fails_instead_of_searching_forever() {
        assert!(matches!(
            counting_qubits_for_tolerance(1e-9, 3, 8),
            Err(CountingError::Convergence {
                max_counting_qubits: 8
            })
        ));
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        assert!(matches!(
            counting_qubits_for_tolerance(0.0, 2, 24),
            Err(CountingError::Configuration(_))
        ));
    }
}
