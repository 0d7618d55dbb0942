use crate::circuit::Circuit;
use crate::error::{CountingError, Result};
use crate::gate::{Gate, PhasePredicate};
use crate::oracle::PhaseOracle;
use crate::qstate::QState;

/// The amplitude-amplification operator `G = D . Oracle`, where
/// `D = 2|s><s| - I` is the diffusion over the oracle register, placed at
/// `offset` inside a wider circuit.
///
/// `D` is realized as Hadamard-on-all, a reflection about the all-zero
/// pattern, Hadamard-on-all. The reflection keeps the sign of `|0...0>` and
/// flips every other pattern (`2|0><0| - I`); with that convention `G` has
/// eigenphase `theta = 2*asin(sqrt(s/2^m))`, which is what the result
/// interpreter decodes, for every solution count including `s = 0`.
pub struct GroverOperator {
    circuit: Circuit,
    offset: usize,
    num_oracle_qubits: usize,
}

impl GroverOperator {
    pub fn new(oracle: &PhaseOracle, num_of_qbits: usize, offset: usize) -> Result<Self> {
        let num_oracle_qubits = oracle.num_qubits();
        if offset + num_oracle_qubits > num_of_qbits {
            return Err(CountingError::QubitOutOfRange {
                index: offset + num_oracle_qubits - 1,
                num_of_qbits,
            });
        }

        let register_mask = ((1usize << num_oracle_qubits) - 1) << offset;

        let mut circuit = Circuit::new(num_of_qbits);
        circuit.push(Gate::PhaseFlip(oracle.predicate_at(offset)))?;
        for q in offset..offset + num_oracle_qubits {
            circuit.push(Gate::H(q))?;
        }
        circuit.push(Gate::PhaseFlip(PhasePredicate::new(move |basis_index| {
            basis_index & register_mask != 0
        })))?;
        for q in offset..offset + num_oracle_qubits {
            circuit.push(Gate::H(q))?;
        }

        Ok(Self {
            circuit,
            offset,
            num_oracle_qubits,
        })
    }

    pub fn num_oracle_qubits(&self) -> usize {
        self.num_oracle_qubits
    }

    pub fn apply_in_place(&self, qstate: &mut QState) -> Result<()> {
        self.circuit.apply_in_place(qstate)
    }

    /// The controlled variant: identity on the oracle register when the
    /// control qubit is 0, `G` when it is 1. The control must lie outside
    /// the oracle register.
    pub fn controlled(&self, control: usize) -> Result<Circuit> {
        if (self.offset..self.offset + self.num_oracle_qubits).contains(&control) {
            return Err(CountingError::DuplicateQubit { index: control });
        }
        self.circuit.controlled(control)
    }
}
