use std::f64::consts::PI;

use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{CountingError, Result};
use crate::gate::Gate;
use crate::grover::GroverOperator;
use crate::measure::{measure_subset, SamplingMode};
use crate::oracle::PhaseOracle;
use crate::qstate::QState;

/// Quantum Fourier transform circuit over qubits `0..t-1` of a register of
/// `num_of_qbits` qubits, built from staged Hadamards and controlled phase
/// rotations of magnitude `pi/2^(k-l)` plus a final qubit-order reversal.
///
/// The forward transform maps `|j>` to `2^{-t/2} sum_k e^{-2*pi*i*jk/2^t} |k>`;
/// the inverse conjugates the rotation angles. The two compose to the
/// identity.
pub fn fourier_transform(num_of_qbits: usize, t: usize, inverse: bool) -> Result<Circuit> {
    let sign = if inverse { 1.0 } else { -1.0 };

    let mut circuit = Circuit::new(num_of_qbits);
    for target in (0..t).rev() {
        circuit = circuit.h(target)?;
        for control in (0..target).rev() {
            let angle = sign * PI / (1u64 << (target - control)) as f64;
            circuit = circuit.controlled_phase(control, target, angle)?;
        }
    }
    for q in 0..t / 2 {
        circuit = circuit.swap(q, t - 1 - q)?;
    }
    Ok(circuit)
}

/// Runs one phase-estimation pass for the Grover operator of `oracle` with
/// `t` counting qubits and returns the measured counting-register index.
///
/// Layout: counting qubits at `0..t-1`, oracle register at `t..t+m-1`.
/// Counting qubit `k` controls exactly `2^k` applications of the Grover
/// operator, realized as a tight loop over a prebuilt controlled circuit.
pub fn estimate_phase(
    oracle: &PhaseOracle,
    t: usize,
    qubit_ceiling: usize,
    sampling: SamplingMode,
) -> Result<usize> {
    let m = oracle.num_qubits();
    let num_of_qbits = m + t;
    if num_of_qbits > qubit_ceiling {
        return Err(CountingError::IntractableSize {
            qubits: num_of_qbits,
            ceiling: qubit_ceiling,
        });
    }

    debug!(
        oracle_qubits = m,
        counting_qubits = t,
        "running phase estimation"
    );

    let mut state = QState::zero_state(num_of_qbits);
    let mut superposition = Circuit::new(num_of_qbits);
    for q in 0..num_of_qbits {
        superposition.push(Gate::H(q))?;
    }
    superposition.apply_in_place(&mut state)?;

    let grover = GroverOperator::new(oracle, num_of_qbits, t)?;
    for k in 0..t {
        let controlled = grover.controlled(k)?;
        for _ in 0..1usize << k {
            controlled.apply_in_place(&mut state)?;
        }
    }

    fourier_transform(num_of_qbits, t, true)?.apply_in_place(&mut state)?;

    let counting_qubits: Vec<usize> = (0..t).collect();
    let histogram = measure_subset(&state, &counting_qubits)?;
    let measured_index = histogram.sample(sampling);

    debug!(
        measured_index,
        probability = histogram.probability(measured_index),
        "measured counting register"
    );

    Ok(measured_index)
}
