use std::f64::consts::TAU;

/// Outcome of one counting run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountingResult {
    pub estimated_solutions: f64,
    pub upper_error_bound: f64,
}

/// Decodes a measured counting-register index into a solution-count
/// estimate with the Brassard-Hoyer-Tapp error bound.
///
/// `theta = (j/2^t)*2*pi`, `solutions = 2^m * sin^2(theta/2)`; with
/// `b = t - 1` the bound is `(sqrt(2*solutions*2^m) + 2^m/2^(b+1)) * 2^-b`.
/// The bound holds with probability >= 8/pi^2 for a single ideal
/// phase-estimation run; it is not a confidence interval over repeated
/// shots.
pub fn interpret_measurement(
    measured_index: usize,
    counting_qubits: usize,
    oracle_qubits: usize,
) -> CountingResult {
    let theta = measured_index as f64 / 2f64.powi(counting_qubits as i32) * TAU;

    let max_solutions = 2f64.powi(oracle_qubits as i32);
    let estimated_solutions = max_solutions * (theta / 2.0).sin().powi(2);

    let b = counting_qubits as i32 - 1;
    let upper_error_bound = ((2.0 * estimated_solutions * max_solutions).sqrt()
        + max_solutions / 2f64.powi(b + 1))
        * 2f64.powi(-b);

    CountingResult {
        estimated_solutions,
        upper_error_bound,
    }
}
