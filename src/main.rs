use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use qcount::{CountingConfig, QuantumCounter};

/// Runs one count against the given truth table, then sweeps every possible
/// solution count as a self-check report.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let bit_string = args.next().unwrap_or_else(|| "11000001".to_string());
    let tolerance = match args.next() {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("tolerance must be a number, got {raw:?}"))?,
        // An error bound below 0.5 pins down an integer solution count.
        None => 0.5,
    };

    let counter = QuantumCounter::new(CountingConfig::with_tolerance(tolerance))?;

    anyhow::ensure!(
        bit_string.len() > 1 && bit_string.len().is_power_of_two(),
        "truth table length must be a power of two greater than 1, got {}",
        bit_string.len()
    );
    let num_oracle_qubits = bit_string.len().ilog2() as usize;
    let counting_qubits = counter.counting_qubits_for(num_oracle_qubits)?;
    println!("oracle qubits:   {num_oracle_qubits}");
    println!("counting qubits: {counting_qubits}");
    println!();

    let result = counter.count_truth_table(&bit_string)?;
    println!("{:<14} | {:<14}", "Measured #Sol", "Error Bound");
    println!(
        "{:<14.1} | {:<14.2}",
        result.estimated_solutions, result.upper_error_bound
    );
    println!();
    println!("{}", "-".repeat(45));
    println!(
        "{:<14} | {:<14} | {:<14}",
        "Expected #Sol", "Measured #Sol", "Error Bound"
    );
    println!("{}", "-".repeat(45));

    let table_rows = 1usize << num_oracle_qubits;
    for expected_solutions in 0..=table_rows {
        let bit_string: String =
            "1".repeat(expected_solutions) + &"0".repeat(table_rows - expected_solutions);
        let result = counter.count_truth_table(&bit_string)?;
        println!(
            "{:<14} | {:<14.1} | {:<14.2}",
            expected_solutions, result.estimated_solutions, result.upper_error_bound
        );
    }

    Ok(())
}
