//! Near a power of ten: `(10^k ± d) × y = 10^k·y ± d·y`.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{cross_term_sub_steps, digit_count, mul, pow10},
    methods::worked,
    models::{Method, Step, StudyContent},
};

/// An operand rewritten as `power + deviation`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    split_first: bool,
    n: i64,
    power: i64,
    deviation: i64,
    relative: f64,
}

/// Closest power of ten (10, 100, 1000, …) within `tolerance` of `n`.
fn nearest_power(n: i64, tolerance: f64) -> Option<(i64, i64, f64)> {
    let k = digit_count(n);
    [k - 1, k]
        .into_iter()
        .filter(|&e| e >= 1)
        .filter_map(|e| pow10(e).ok())
        .map(|p| (p, n - p, (n - p).unsigned_abs() as f64 / p as f64))
        .filter(|&(_, _, rel)| rel <= tolerance)
        .min_by(|x, y| x.2.total_cmp(&y.2))
}

fn best_anchor(a: i64, b: i64, config: &EngineConfig) -> Option<Anchor> {
    let tol = config.near_power_tolerance;
    let first = nearest_power(a, tol).map(|(power, deviation, relative)| Anchor {
        split_first: true, n: a, power, deviation, relative,
    });
    let second = nearest_power(b, tol).map(|(power, deviation, relative)| Anchor {
        split_first: false, n: b, power, deviation, relative,
    });
    match (first, second) {
        (Some(x), Some(y)) => Some(if y.relative < x.relative { y } else { x }),
        (x, y) => x.or(y),
    }
}

pub fn is_applicable(a: i64, b: i64, config: &EngineConfig) -> bool {
    best_anchor(a, b, config).is_some()
}

/// 1.0 on an exact power, falling to 0.5 at the edge of the tolerance.
pub fn quality_score(a: i64, b: i64, config: &EngineConfig) -> f64 {
    match best_anchor(a, b, config) {
        Some(anchor) => (1.0 - 0.5 * anchor.relative / config.near_power_tolerance).clamp(0.5, 1.0),
        None => 0.0,
    }
}

fn zeros_word(k: u32) -> String {
    if k == 1 { "one zero".to_string() } else { format!("{k} zeros") }
}

pub fn derive(a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    let anchor = best_anchor(a, b, config).ok_or(EngineError::InapplicableMethod {
        method: Method::NearPowerOfTen,
        num1: a,
        num2: b,
    })?;
    let Anchor { split_first, n, power, deviation, .. } = anchor;
    let other = if split_first { b } else { a };
    let zeros = zeros_word(digit_count(power) - 1);
    let product = mul(a, b)?;
    let big = mul(power, other)?;

    if deviation == 0 {
        let expression = if split_first {
            format!("{power} * {other}")
        } else {
            format!("{other} * {power}")
        };
        return Ok(vec![Step::new(
            expression,
            format!("Multiplying by {power} appends {zeros} to {other}: {product}"),
            product,
        )]);
    }

    let d = deviation.abs();
    let op = if deviation < 0 { '-' } else { '+' };
    let rewritten = format!("({power} {op} {d})");
    let rewrite = if split_first {
        format!("{rewritten} * {other}")
    } else {
        format!("{other} * {rewritten}")
    };
    let small = mul(d, other)?;
    let sign_word = if deviation < 0 { "below" } else { "above" };

    Ok(vec![
        Step::new(
            rewrite,
            format!("{n} is just {d} {sign_word} {power}, so write it as {power} {} {d}",
                if op == '-' { "−" } else { "+" }),
            product,
        ),
        Step::new(
            format!("{power} * {other}"),
            format!("Multiplying by {power} appends {zeros}: {big}"),
            big,
        ),
        Step::new(
            format!("{d} * {other}"),
            format!("Correction term: {d} × {other} = {small}"),
            small,
        )
        .with_sub_steps(cross_term_sub_steps(d, other)?),
        Step::new(
            format!("{big} {op} {small}"),
            format!("Apply the correction: {big} {} {small} = {product}",
                if op == '-' { "−" } else { "+" }),
            product,
        ),
    ])
}

pub fn fit_reason(a: i64, b: i64, config: &EngineConfig) -> String {
    match best_anchor(a, b, config) {
        Some(Anchor { n, power, deviation: 0, .. }) => {
            format!("{n} is exactly {power}, so the product is just a shift of digits.")
        }
        Some(Anchor { n, power, deviation, .. }) => format!(
            "{n} is only {} away from {power}, so multiplying by {power} and correcting is quick.",
            deviation.abs()
        ),
        None => format!("Neither {a} nor {b} is close to a power of ten."),
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::NearPowerOfTen,
        introduction: "When one number sits just below or above 10, 100 or 1000, multiply by \
            the power of ten instead and fix up the small difference."
            .to_string(),
        foundation: "Write the number as 10^k ± d. Multiplying by 10^k only appends zeros, and \
            d × y is small because d is small: (10^k − d) × y = 10^k×y − d×y."
            .to_string(),
        worked_examples: vec![
            worked(
                "98 × 47",
                &["98 = 100 − 2", "100 × 47 = 4700", "2 × 47 = 94", "4700 − 94 = 4606"],
                4606,
            ),
            worked(
                "1003 × 26",
                &["1003 = 1000 + 3", "1000 × 26 = 26000", "3 × 26 = 78", "26000 + 78 = 26078"],
                26078,
            ),
        ],
        prerequisites: vec![
            "Multiplying by 10, 100 and 1000".to_string(),
            "The distributive method".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn detects_operands_near_a_power() {
        assert!(is_applicable(98, 47, &cfg()));
        assert!(is_applicable(47, 1003, &cfg()));
        assert!(is_applicable(9, 13, &cfg()));
        assert!(!is_applicable(47, 53, &cfg()));
        assert!(!is_applicable(85, 120, &cfg()));
    }

    #[test]
    fn rewrites_as_power_minus_deviation() {
        let steps = derive(98, 47, &cfg()).unwrap();
        let exprs: Vec<&str> = steps.iter().map(|s| s.expression.as_str()).collect();
        assert_eq!(exprs, vec!["(100 - 2) * 47", "100 * 47", "2 * 47", "4700 - 94"]);
        assert_eq!(steps.last().unwrap().result, 4606);
    }

    #[test]
    fn exact_power_is_a_single_shift() {
        let steps = derive(37, 1000, &cfg()).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].expression, "37 * 1000");
        assert_eq!(steps[0].result, 37_000);
        assert_eq!(quality_score(37, 1000, &cfg()), 1.0);
    }

    #[test]
    fn quality_drops_with_distance() {
        assert!(quality_score(99, 47, &cfg()) > quality_score(92, 47, &cfg()));
        assert!(quality_score(91, 47, &cfg()) >= 0.5);
    }

    #[test]
    fn closer_operand_is_chosen() {
        // 1010 is 1% from 1000, 95 is 5% from 100.
        let steps = derive(95, 1010, &cfg()).unwrap();
        assert_eq!(steps[0].expression, "95 * (1000 + 10)");
    }
}
