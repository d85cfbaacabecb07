//! Cognitive cost of a derivation.
//!
//! `total_cost = step_count + digit_complexity + memory_chunks + magnitude_penalty`
//!
//! | Component           | Formula |
//! |---------------------|---------|
//! | `step_count`        | every step, sub-steps included |
//! | `digit_complexity`  | 0.25 × significant digits of every literal in every expression (trailing zeros are free) |
//! | `memory_chunks`     | peak number of top-level results still waiting to be used by a later top-level step (uses inferred from literals, credited to the nearest producer) |
//! | `magnitude_penalty` | Σ (digits(r) − digits(threshold) + 1)² over results with \|r\| above the threshold |
//!
//! Specialised methods whose precondition fits exactly come out cheaper than
//! the general place-value split.

use crate::training_engine::{
    config::EngineConfig,
    helpers::digit_count,
    models::{CostBreakdown, Step},
};

const DIGIT_WEIGHT: f64 = 0.25;

/// Numeric literals in an expression, as written.
fn literals(expression: &str) -> Vec<&str> {
    expression
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Digits a human actually has to handle: `2500` is as easy as `25`.
fn significant_digits(literal: &str) -> usize {
    let digits: String = literal.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0').trim_end_matches('0');
    trimmed.len().max(1)
}

fn digit_complexity(steps: &[&Step]) -> f64 {
    let total: usize = steps
        .iter()
        .flat_map(|s| literals(&s.expression))
        .map(significant_digits)
        .sum();
    total as f64 * DIGIT_WEIGHT
}

/// Peak number of intermediate results held in memory at once.
///
/// Steps do not record their inputs, so uses are read back from literals: each
/// literal in a later top-level expression is credited to the nearest earlier
/// top-level step whose result has that value. A result is live from the step
/// that produces it until its last credited use.
fn memory_chunks(top_level: &[Step]) -> f64 {
    let mut last_use: Vec<Option<usize>> = vec![None; top_level.len()];
    for (j, step) in top_level.iter().enumerate().skip(1) {
        for literal in literals(&step.expression) {
            let producer = (0..j)
                .rev()
                .find(|&i| top_level[i].result.unsigned_abs().to_string() == literal);
            if let Some(i) = producer {
                last_use[i] = Some(j);
            }
        }
    }

    let peak = (0..top_level.len())
        .map(|k| {
            last_use
                .iter()
                .enumerate()
                .filter(|(i, last)| *i < k && last.is_some_and(|j| j >= k))
                .count()
        })
        .max()
        .unwrap_or(0);
    peak as f64
}

fn magnitude_penalty(steps: &[&Step], threshold: i64) -> f64 {
    let threshold_digits = digit_count(threshold) as i64;
    steps
        .iter()
        .filter(|s| s.result.unsigned_abs() > threshold.unsigned_abs())
        .map(|s| {
            let excess = (digit_count(s.result) as i64 - threshold_digits + 1).max(1) as f64;
            excess * excess
        })
        .sum()
}

/// Score a derivation. Always strictly positive for a non-empty step list.
pub fn compute_breakdown(steps: &[Step], config: &EngineConfig) -> CostBreakdown {
    let all: Vec<&Step> = steps.iter().flat_map(Step::walk).collect();

    let step_count = all.len() as f64;
    let digit_complexity = digit_complexity(&all);
    let memory_chunks = memory_chunks(steps);
    let magnitude_penalty = magnitude_penalty(&all, config.magnitude_threshold);

    CostBreakdown {
        step_count,
        digit_complexity,
        memory_chunks,
        magnitude_penalty,
        total_cost: step_count + digit_complexity + memory_chunks + magnitude_penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn trailing_zeros_are_free() {
        assert_eq!(significant_digits("2500"), 2);
        assert_eq!(significant_digits("100"), 1);
        assert_eq!(significant_digits("0"), 1);
        assert_eq!(significant_digits("2491"), 4);
    }

    #[test]
    fn literals_ignore_operators_and_parens() {
        assert_eq!(literals("(50 - 3) * (-53)"), vec!["50", "3", "53"]);
    }

    #[test]
    fn memory_tracks_values_waiting_for_the_final_combine() {
        let steps = vec![
            Step::new("50 * 50", "", 2500),
            Step::new("3 * 3", "", 9),
            Step::new("2500 - 9", "", 2491),
        ];
        let b = compute_breakdown(&steps, &cfg());
        assert_eq!(b.memory_chunks, 2.0);
        assert_eq!(b.step_count, 3.0);
    }

    #[test]
    fn repeated_value_is_credited_to_nearest_producer() {
        // Both 9s match the literal in the last step; only the second one is
        // actually carried into it.
        let steps = vec![
            Step::new("3 * 3", "", 9),
            Step::new("10 - 1", "", 9),
            Step::new("9 * 2", "", 18),
        ];
        assert_eq!(compute_breakdown(&steps, &cfg()).memory_chunks, 1.0);
    }

    #[test]
    fn unreferenced_result_is_not_held() {
        let steps = vec![
            Step::new("(50 - 3) * (50 + 3)", "", 2491),
            Step::new("50 * 50", "", 2500),
            Step::new("2500 - 9", "", 2491),
        ];
        // 2491 from the rewrite is never read back; only 2500 waits.
        assert_eq!(compute_breakdown(&steps, &cfg()).memory_chunks, 1.0);
    }

    #[test]
    fn total_is_sum_of_components() {
        let steps = vec![
            Step::new("123 * 456", "", 56088)
                .with_sub_steps(vec![Step::new("100 * 456", "", 45600)]),
        ];
        let b = compute_breakdown(&steps, &cfg());
        let sum = b.step_count + b.digit_complexity + b.memory_chunks + b.magnitude_penalty;
        assert!((b.total_cost - sum).abs() < 1e-9);
        assert!(b.magnitude_penalty > 0.0, "56088 is above the default threshold");
        assert!(b.total_cost > 0.0);
    }

    #[test]
    fn bigger_intermediates_cost_more() {
        let small = compute_breakdown(&[Step::new("12 * 13", "", 156)], &cfg());
        let big = compute_breakdown(&[Step::new("1234 * 5678", "", 7_006_652)], &cfg());
        assert!(big.total_cost > small.total_cost);
        assert!(big.magnitude_penalty > small.magnitude_penalty);
    }
}
