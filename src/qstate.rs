use std::fmt::Display;

use nalgebra::DVector;
use num_complex::Complex;

use crate::error::{CountingError, Result};
use crate::Qbit;

/// A normalized complex amplitude vector over `2^n` basis states.
///
/// Basis index bit `q` holds the value of qubit `q` (little endian).
pub struct QState {
    pub(crate) state: DVector<Qbit>,
}

impl QState {
    pub fn new(state: &[Qbit]) -> Result<Self> {
        let len = state.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(CountingError::InvalidInput(
                "state vector length must be a non-zero power of 2".into(),
            ));
        }

        let state = DVector::from_row_slice(state);
        Ok(Self { state })
    }

    pub fn zero_state(num_of_qbits: usize) -> Self {
        let mut state = DVector::zeros(1 << num_of_qbits);
        state[0] = Complex::new(1.0, 0.0); // |0...0> state
        Self { state }
    }

    pub fn from_str(qbits: &str) -> Result<Self> {
        let index = usize::from_str_radix(qbits, 2)
            .map_err(|e| CountingError::InvalidInput(format!("not a basis-state label: {e}")))?;
        let mut state = DVector::zeros(1 << qbits.len());
        state[index] = Complex::new(1.0, 0.0);

        Ok(Self { state })
    }

    pub fn num_of_qbits(&self) -> usize {
        self.state.len().ilog2() as usize
    }

    /// Squared magnitude of the full vector; 1 within floating tolerance for
    /// any reachable state.
    pub fn norm_sqr(&self) -> f64 {
        self.state.iter().map(|amplitude| amplitude.norm_sqr()).sum()
    }

    pub fn amplitude(&self, basis_index: usize) -> Qbit {
        self.state[basis_index]
    }
}

impl Display for QState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bin_width = self.num_of_qbits();

        for (i, value) in self.state.iter().enumerate() {
            writeln!(f, "|{:0width$b}>: {}", i, value, width = bin_width)?;
        }

        Ok(())
    }
}

impl From<QState> for DVector<Qbit> {
    fn from(qstate: QState) -> Self {
        qstate.state
    }
}
