//! Finds the best achievable Sharpe ratio of a two-asset portfolio by
//! bisecting on a threshold: each candidate threshold is turned into a
//! truth table ("does allocation i beat the threshold?") and quantum
//! counting decides whether any allocation does.

use anyhow::Result;

use qcount::{CountingConfig, QuantumCounter};

const RETURN_1: f64 = 1.0;
const RETURN_2: f64 = 2.0;
const SIGMA_1: f64 = 3.0;
const SIGMA_2: f64 = 2.0;
const CORRELATION: f64 = 0.5;

fn sharpe_ratio(allocation_in_asset1: usize) -> f64 {
    let w1 = allocation_in_asset1 as f64 / 3.0;
    let w2 = 1.0 - w1;

    let portfolio_return = w1 * RETURN_1 + w2 * RETURN_2;
    let portfolio_std = (w1 * w1 * SIGMA_1 * SIGMA_1
        + w2 * w2 * SIGMA_2 * SIGMA_2
        + 2.0 * CORRELATION * w1 * w2 * SIGMA_1 * SIGMA_2)
        .sqrt();

    portfolio_return / portfolio_std
}

/// One truth-table row per discrete allocation of asset 1.
fn truth_table_for_threshold(threshold: f64) -> String {
    (0..4)
        .map(|allocation| {
            if sharpe_ratio(allocation) > threshold {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let counter = QuantumCounter::new(CountingConfig::with_tolerance(0.5))?;

    let mut above: f64 = 6.0;
    let mut below = 0.0;

    while (above - below).abs() > 0.01 {
        println!("{}", "-".repeat(45));

        let threshold = (above + below) / 2.0;
        println!("above: {above:.4}, threshold: {threshold:.4}, below: {below:.4}");

        let bit_string = truth_table_for_threshold(threshold);
        let result = counter.count_truth_table(&bit_string)?;

        println!("{:<14} | {:<14}", "Measured #Sol", "Error Bound");
        println!(
            "{:<14.1} | {:<14.2}",
            result.estimated_solutions, result.upper_error_bound
        );

        // The tolerance keeps the estimate within 0.5 of an integer, so
        // anything below that means no allocation beats the threshold.
        if result.estimated_solutions < 0.5 {
            above = threshold;
        } else {
            below = threshold;
        }
    }

    println!("best achievable Sharpe ratio: {below:.2}");
    Ok(())
}
