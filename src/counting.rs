use crate::error::{CountingError, Result};
use crate::formula::Formula;
use crate::interpret::{interpret_measurement, CountingResult};
use crate::measure::SamplingMode;
use crate::oracle::PhaseOracle;
use crate::phase_estimation::estimate_phase;
use crate::precision::counting_qubits_for_tolerance;

/// Default cap on the total register size; the state vector grows as
/// `2^(m+t)`, so anything much larger stops being simulable.
pub const DEFAULT_QUBIT_CEILING: usize = 24;

/// Default cap on the precision search.
pub const DEFAULT_MAX_COUNTING_QUBITS: usize = 24;

/// Per-run configuration. Exactly one of `tolerance` and `counting_qubits`
/// must be set: either the counting register is sized analytically for the
/// tolerance, or its size is fixed directly.
#[derive(Clone, Copy, Debug)]
pub struct CountingConfig {
    pub tolerance: Option<f64>,
    pub counting_qubits: Option<usize>,
    pub qubit_ceiling: usize,
    pub max_counting_qubits: usize,
    pub sampling: SamplingMode,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            tolerance: None,
            counting_qubits: None,
            qubit_ceiling: DEFAULT_QUBIT_CEILING,
            max_counting_qubits: DEFAULT_MAX_COUNTING_QUBITS,
            sampling: SamplingMode::Deterministic,
        }
    }
}

impl CountingConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: Some(tolerance),
            ..Self::default()
        }
    }

    pub fn with_counting_qubits(counting_qubits: usize) -> Self {
        Self {
            counting_qubits: Some(counting_qubits),
            ..Self::default()
        }
    }

    pub fn qubit_ceiling(mut self, qubit_ceiling: usize) -> Self {
        self.qubit_ceiling = qubit_ceiling;
        self
    }

    pub fn sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    fn validate(&self) -> Result<()> {
        match (self.tolerance, self.counting_qubits) {
            (None, None) => Err(CountingError::Configuration(
                "either a tolerance or a counting-qubit count must be supplied".into(),
            )),
            (Some(_), Some(_)) => Err(CountingError::Configuration(
                "tolerance and counting-qubit count are mutually exclusive".into(),
            )),
            (Some(tolerance), None) if tolerance <= 0.0 => {
                Err(CountingError::Configuration(format!(
                    "tolerance must be positive, got {tolerance}"
                )))
            }
            (None, Some(0)) => Err(CountingError::Configuration(
                "counting-qubit count must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// The full counting pipeline: truth table (or oracle) in, solution-count
/// estimate and error bound out. Each run allocates its own state vector
/// and discards it after measurement; nothing persists between runs.
pub struct QuantumCounter {
    config: CountingConfig,
}

impl QuantumCounter {
    pub fn new(config: CountingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of counting qubits a run against an `m`-qubit oracle will use.
    pub fn counting_qubits_for(&self, num_oracle_qubits: usize) -> Result<usize> {
        match (self.config.counting_qubits, self.config.tolerance) {
            (Some(t), _) => Ok(t),
            (None, Some(tolerance)) => counting_qubits_for_tolerance(
                tolerance,
                num_oracle_qubits,
                self.config.max_counting_qubits,
            ),
            (None, None) => unreachable!("validated at construction"),
        }
    }

    /// Counts the true rows of a `'0'`/`'1'` truth table of length `2^m`.
    pub fn count_truth_table(&self, bit_string: &str) -> Result<CountingResult> {
        let formula = Formula::from_bit_string(bit_string)?;
        let oracle = PhaseOracle::from_formula(&formula);
        self.run(&oracle)
    }

    /// Counts with a caller-supplied oracle. The oracle must act on exactly
    /// `num_oracle_qubits` qubits.
    pub fn count_with_oracle(
        &self,
        oracle: &PhaseOracle,
        num_oracle_qubits: usize,
    ) -> Result<CountingResult> {
        if oracle.num_qubits() != num_oracle_qubits {
            return Err(CountingError::QubitMismatch {
                expected: num_oracle_qubits,
                actual: oracle.num_qubits(),
            });
        }
        self.run(oracle)
    }

    fn run(&self, oracle: &PhaseOracle) -> Result<CountingResult> {
        let m = oracle.num_qubits();
        let t = self.counting_qubits_for(m)?;
        let measured_index =
            estimate_phase(oracle, t, self.config.qubit_ceiling, self.config.sampling)?;
        Ok(interpret_measurement(measured_index, t, m))
    }
}
