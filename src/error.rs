use thiserror::Error;

/// Errors produced while building or running a counting circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountingError {
    /// The truth-table input is malformed.
    #[error("invalid truth table: {0}")]
    InvalidInput(String),

    /// The counting configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A caller-supplied oracle does not act on the expected register.
    #[error("oracle acts on {actual} qubits but {expected} were expected")]
    QubitMismatch { expected: usize, actual: usize },

    /// The state vector would exceed the configured qubit ceiling.
    #[error("simulation needs {qubits} qubits but the ceiling is {ceiling}")]
    IntractableSize { qubits: usize, ceiling: usize },

    /// The precision search ran out of counting qubits before meeting tolerance.
    #[error("no counting-qubit count up to {max_counting_qubits} meets the tolerance")]
    Convergence { max_counting_qubits: usize },

    /// A gate references a qubit index outside the circuit.
    #[error("qubit index {index} out of range for {num_of_qbits} qubits")]
    QubitOutOfRange { index: usize, num_of_qbits: usize },

    /// A gate uses the same qubit for two distinct roles.
    #[error("qubit {index} used as both control and target")]
    DuplicateQubit { index: usize },
}

pub type Result<T> = std::result::Result<T, CountingError>;
