use std::sync::Arc;

use crate::error::{CountingError, Result};
use crate::formula::Formula;
use crate::gate::PhasePredicate;

/// A phase-flip oracle over `m` qubits: a diagonal unitary that multiplies
/// the amplitude of every marked basis state by -1 and acts as identity on
/// everything else, including any extra qubits in the register.
#[derive(Clone, Debug)]
pub struct PhaseOracle {
    num_qubits: usize,
    marked: Arc<Vec<bool>>,
}

impl PhaseOracle {
    /// Builds an oracle from an explicit mark table of length `2^m`.
    pub fn new(num_qubits: usize, marked: Vec<bool>) -> Result<Self> {
        if marked.len() != 1 << num_qubits {
            return Err(CountingError::InvalidInput(format!(
                "mark table has {} entries, expected {}",
                marked.len(),
                1usize << num_qubits
            )));
        }
        Ok(Self {
            num_qubits,
            marked: Arc::new(marked),
        })
    }

    /// Compiles a DNF formula into its sign pattern by evaluating it against
    /// every assignment.
    pub fn from_formula(formula: &Formula) -> Self {
        let num_qubits = formula.num_of_literals();
        let marked = (0..1usize << num_qubits)
            .map(|assignment| formula.evaluate(assignment))
            .collect();
        Self {
            num_qubits,
            marked: Arc::new(marked),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn flips(&self, basis_index: usize) -> bool {
        self.marked[basis_index]
    }

    /// Number of marked basis states, i.e. the count the algorithm estimates.
    pub fn solution_count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }

    /// The oracle's predicate rebased so its register starts at `offset`
    /// within a wider circuit; bits outside the register are ignored.
    pub(crate) fn predicate_at(&self, offset: usize) -> PhasePredicate {
        let marked = Arc::clone(&self.marked);
        let mask = (1usize << self.num_qubits) - 1;
        PhasePredicate::new(move |basis_index| marked[(basis_index >> offset) & mask])
    }
}
