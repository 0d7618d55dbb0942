use std::fmt;
use std::sync::Arc;

/// Basis-index predicate backing a diagonal phase-flip gate.
///
/// The predicate sees the full basis index of the register the gate is
/// applied to; amplitudes where it returns `true` get their sign flipped.
#[derive(Clone)]
pub struct PhasePredicate {
    predicate: Arc<dyn Fn(usize) -> bool + Send + Sync>,
}

impl PhasePredicate {
    pub fn new(predicate: impl Fn(usize) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    pub fn eval(&self, basis_index: usize) -> bool {
        (self.predicate)(basis_index)
    }
}

impl fmt::Debug for PhasePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PhasePredicate")
    }
}

/// The closed gate set of the simulator. One dispatch-by-tag applicator in
/// `circuit.rs` handles every variant; gates are immutable once built.
#[derive(Clone, Debug)]
pub enum Gate {
    H(usize),
    X(usize),
    /// Diagonal unitary: flips the sign of every basis state matching the
    /// predicate, identity elsewhere.
    PhaseFlip(PhasePredicate),
    /// Applies the inner gate only where the control qubit is 1; the control
    /// qubit itself is never modified.
    Controlled { control: usize, gate: Box<Gate> },
    Swap(usize, usize),
    /// Phase `e^{i*angle}` on basis states where both control and target are 1.
    ControlledPhase {
        control: usize,
        target: usize,
        angle: f64,
    },
}

impl Gate {
    pub fn controlled(self, control: usize) -> Gate {
        Gate::Controlled {
            control,
            gate: Box::new(self),
        }
    }

    /// Whether the gate moves amplitude across the given qubit. Diagonal
    /// gates only read the index, so they never conflict with a control.
    pub(crate) fn moves_qubit(&self, qubit: usize) -> bool {
        match self {
            Gate::H(q) | Gate::X(q) => *q == qubit,
            Gate::Swap(a, b) => *a == qubit || *b == qubit,
            Gate::Controlled { gate, .. } => gate.moves_qubit(qubit),
            Gate::PhaseFlip(_) | Gate::ControlledPhase { .. } => false,
        }
    }

    /// Largest qubit index the gate names, for bounds checking.
    pub(crate) fn max_qubit(&self) -> Option<usize> {
        match self {
            Gate::H(q) | Gate::X(q) => Some(*q),
            Gate::Swap(a, b) => Some(*a.max(b)),
            Gate::ControlledPhase {
                control, target, ..
            } => Some(*control.max(target)),
            Gate::Controlled { control, gate } => {
                Some(gate.max_qubit().map_or(*control, |q| q.max(*control)))
            }
            Gate::PhaseFlip(_) => None,
        }
    }
}
