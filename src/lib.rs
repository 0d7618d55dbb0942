//! Quantum counting of truth-table solutions.
//!
//! Converts a truth table into a DNF formula, compiles it into a phase-flip
//! oracle, wraps the oracle in a Grover operator, and estimates the number
//! of true rows via quantum phase estimation on a state-vector simulator,
//! together with the Brassard-Hoyer-Tapp analytic error bound.
//!
//! ```
//! use qcount::{CountingConfig, QuantumCounter};
//!
//! let counter = QuantumCounter::new(CountingConfig::with_tolerance(0.5)).unwrap();
//! let result = counter.count_truth_table("1100").unwrap();
//! assert!((result.estimated_solutions - 2.0).abs() <= result.upper_error_bound);
//! ```

pub mod circuit;
pub mod counting;
pub mod error;
pub mod formula;
pub mod gate;
pub mod grover;
pub mod interpret;
pub mod measure;
pub mod oracle;
pub mod phase_estimation;
pub mod precision;
pub mod qstate;
pub mod test_util;

use num_complex::Complex;

pub type Qbit = Complex<f64>;

pub use circuit::Circuit;
pub use counting::{CountingConfig, QuantumCounter};
pub use error::{CountingError, Result};
pub use formula::Formula;
pub use gate::{Gate, PhasePredicate};
pub use grover::GroverOperator;
pub use interpret::CountingResult;
pub use measure::{measure_subset, Histogram, SamplingMode};
pub use oracle::PhaseOracle;
pub use qstate::QState;
