use nalgebra::DVector;
use num_complex::Complex;

use crate::error::{CountingError, Result};
use crate::gate::Gate;
use crate::qstate::QState;
use crate::Qbit;

/// An ordered gate sequence over a fixed register.
///
/// Application updates amplitudes in place and only visits the amplitude
/// pairs/groups selected by each gate's target and control bits; no
/// `2^n x 2^n` operator is ever materialized.
pub struct Circuit {
    gates: Vec<Gate>,
    num_of_qbits: usize,
}

impl Circuit {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            gates: Vec::new(),
            num_of_qbits,
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.num_of_qbits {
            return Err(CountingError::QubitOutOfRange {
                index,
                num_of_qbits: self.num_of_qbits,
            });
        }
        Ok(())
    }

    /// Appends a gate after validating its qubit indices.
    pub fn push(&mut self, gate: Gate) -> Result<()> {
        if let Some(max) = gate.max_qubit() {
            self.check_index(max)?;
        }
        if let Gate::Controlled { control, gate } = &gate {
            if gate.moves_qubit(*control) {
                return Err(CountingError::DuplicateQubit { index: *control });
            }
        }
        match &gate {
            Gate::Swap(a, b) if a == b => {
                return Err(CountingError::DuplicateQubit { index: *a });
            }
            Gate::ControlledPhase {
                control, target, ..
            } if control == target => {
                return Err(CountingError::DuplicateQubit { index: *control });
            }
            _ => {}
        }
        self.gates.push(gate);
        Ok(())
    }

    pub fn h(mut self, index: usize) -> Result<Self> {
        self.push(Gate::H(index))?;
        Ok(self)
    }

    pub fn x(mut self, index: usize) -> Result<Self> {
        self.push(Gate::X(index))?;
        Ok(self)
    }

    pub fn swap(mut self, index1: usize, index2: usize) -> Result<Self> {
        self.push(Gate::Swap(index1, index2))?;
        Ok(self)
    }

    pub fn controlled_phase(mut self, control: usize, target: usize, angle: f64) -> Result<Self> {
        self.push(Gate::ControlledPhase {
            control,
            target,
            angle,
        })?;
        Ok(self)
    }

    pub fn control(mut self, control: usize, gate: Gate) -> Result<Self> {
        self.push(gate.controlled(control))?;
        Ok(self)
    }

    /// The same circuit with every gate conditioned on `control`; identity
    /// when the control qubit is 0. The control must lie outside every
    /// qubit the circuit moves amplitude across.
    pub fn controlled(&self, control: usize) -> Result<Circuit> {
        let mut circuit = Circuit::new(self.num_of_qbits);
        for gate in &self.gates {
            circuit.push(gate.clone().controlled(control))?;
        }
        Ok(circuit)
    }

    pub fn apply(&self, qstate: &QState) -> Result<QState> {
        let mut result = QState {
            state: qstate.state.clone(),
        };
        self.apply_in_place(&mut result)?;
        Ok(result)
    }

    /// Runs every gate against the state without copying the amplitudes.
    /// Repeated operator powers call this in a tight loop.
    pub fn apply_in_place(&self, qstate: &mut QState) -> Result<()> {
        if qstate.num_of_qbits() != self.num_of_qbits {
            return Err(CountingError::QubitMismatch {
                expected: self.num_of_qbits,
                actual: qstate.num_of_qbits(),
            });
        }
        for gate in &self.gates {
            apply_gate(&mut qstate.state, gate, 0);
        }
        Ok(())
    }
}

/// Dispatch-by-tag applicator. `control_mask` collects the control bits of
/// enclosing `Controlled` gates; only basis states with all of them set are
/// touched. Gate validation at `push` time guarantees the mask is disjoint
/// from every qubit a gate moves amplitude across.
fn apply_gate(state: &mut DVector<Qbit>, gate: &Gate, control_mask: usize) {
    let len = state.len();
    match gate {
        Gate::H(q) => {
            let bit = 1 << q;
            let scale = std::f64::consts::FRAC_1_SQRT_2;
            for i in 0..len {
                if i & bit == 0 && i & control_mask == control_mask {
                    let j = i | bit;
                    let a = state[i];
                    let b = state[j];
                    state[i] = (a + b) * scale;
                    state[j] = (a - b) * scale;
                }
            }
        }
        Gate::X(q) => {
            let bit = 1 << q;
            for i in 0..len {
                if i & bit == 0 && i & control_mask == control_mask {
                    let j = i | bit;
                    state.swap_rows(i, j);
                }
            }
        }
        Gate::PhaseFlip(predicate) => {
            for i in 0..len {
                if i & control_mask == control_mask && predicate.eval(i) {
                    state[i] = -state[i];
                }
            }
        }
        Gate::Swap(a, b) => {
            let bit_a = 1 << a;
            let bit_b = 1 << b;
            for i in 0..len {
                if i & bit_a != 0 && i & bit_b == 0 && i & control_mask == control_mask {
                    let j = i ^ (bit_a | bit_b);
                    state.swap_rows(i, j);
                }
            }
        }
        Gate::ControlledPhase {
            control,
            target,
            angle,
        } => {
            let mask = (1 << control) | (1 << target);
            let phase = Complex::from_polar(1.0, *angle);
            for i in 0..len {
                if i & mask == mask && i & control_mask == control_mask {
                    state[i] *= phase;
                }
            }
        }
        Gate::Controlled { control, gate } => {
            apply_gate(state, gate, control_mask | (1 << control));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_complex_eq;
    use crate::gate::PhasePredicate;

    #[test]
    fn test_bell_state() -> Result<()> {
        let q00 = QState::from_str("00").unwrap();
        let result = Circuit::new(q00.num_of_qbits())
            .h(0)?
            .control(0, Gate::X(1))?
            .apply(&q00)?;

        // Bell state |00> + |11>
        assert_approx_complex_eq!(1.0 / 2f64.sqrt(), 0.0, result.state[0]);
        assert_approx_complex_eq!(0.0, 0.0, result.state[1]);
        assert_approx_complex_eq!(0.0, 0.0, result.state[2]);
        assert_approx_complex_eq!(1.0 / 2f64.sqrt(), 0.0, result.state[3]);

        Ok(())
    }

    #[test]
    fn test_controlled_hadamard_stack() -> Result<()> {
        // H, controlled-H, H on the control exposes a sign error in any of
        // the three kernels.
        let q00 = QState::from_str("00").unwrap();
        let result = Circuit::new(q00.num_of_qbits())
            .h(0)?
            .control(0, Gate::H(1))?
            .h(0)?
            .apply(&q00)?;

        assert_approx_complex_eq!((2f64.sqrt() + 2.0) / 4.0, 0.0, result.state[0]);
        assert_approx_complex_eq!((-2f64.sqrt() + 2.0) / 4.0, 0.0, result.state[1]);
        assert_approx_complex_eq!(2f64.sqrt() / 4.0, 0.0, result.state[2]);
        assert_approx_complex_eq!(-2f64.sqrt() / 4.0, 0.0, result.state[3]);

        Ok(())
    }

    #[test]
    fn test_swap_exchanges_qubits() -> Result<()> {
        let q01 = QState::from_str("01").unwrap(); // qubit 0 = 1, qubit 1 = 0
        let result = Circuit::new(2).swap(0, 1)?.apply(&q01)?;
        assert_approx_complex_eq!(1.0, 0.0, result.state[0b10]);
        Ok(())
    }

    #[test]
    fn test_phase_flip_sign_pattern() -> Result<()> {
        let mut circuit = Circuit::new(2);
        circuit.push(Gate::PhaseFlip(PhasePredicate::new(|i| i == 0b01)))?;

        let plus = Circuit::new(2).h(0)?.h(1)?.apply(&QState::from_str("00")?)?;
        let flipped = circuit.apply(&plus)?;

        assert_approx_complex_eq!(0.5, 0.0, flipped.state[0]);
        assert_approx_complex_eq!(-0.5, 0.0, flipped.state[1]);
        assert_approx_complex_eq!(0.5, 0.0, flipped.state[2]);
        assert_approx_complex_eq!(0.5, 0.0, flipped.state[3]);

        Ok(())
    }

    #[test]
    fn test_controlled_gate_with_control_zero_is_identity() -> Result<()> {
        let q00 = QState::from_str("00").unwrap();
        let result = Circuit::new(2).control(0, Gate::X(1))?.apply(&q00)?;
        assert_approx_complex_eq!(1.0, 0.0, result.state[0]);
        Ok(())
    }

    #[test]
    fn test_controlled_phase_only_hits_both_ones() -> Result<()> {
        let plus = Circuit::new(2).h(0)?.h(1)?.apply(&QState::from_str("00")?)?;
        let result = Circuit::new(2)
            .controlled_phase(0, 1, std::f64::consts::PI / 2.0)?
            .apply(&plus)?;

        assert_approx_complex_eq!(0.5, 0.0, result.state[0b00]);
        assert_approx_complex_eq!(0.5, 0.0, result.state[0b01]);
        assert_approx_complex_eq!(0.5, 0.0, result.state[0b10]);
        assert_approx_complex_eq!(0.0, 0.5, result.state[0b11]);

        Ok(())
    }

    #[test]
    fn test_rejects_out_of_range_and_duplicate_qubits() {
        assert!(matches!(
            Circuit::new(2).h(2),
            Err(CountingError::QubitOutOfRange { .. })
        ));
        assert!(matches!(
            Circuit::new(2).swap(1, 1),
            Err(CountingError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            Circuit::new(2).control(1, Gate::X(1)),
            Err(CountingError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_application_preserves_norm() -> Result<()> {
        let circuit = Circuit::new(3)
            .h(0)?
            .control(0, Gate::H(2))?
            .swap(1, 2)?
            .controlled_phase(2, 0, 0.37)?;
        let result = circuit.apply(&QState::from_str("000")?)?;
        assert!((result.norm_sqr() - 1.0).abs() < 1e-9);
        Ok(())
    }
}
