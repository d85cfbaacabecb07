//! Difference of squares: `(m − d)(m + d) = m² − d²`.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{mul, square_expansion, sub},
    methods::worked,
    models::{Method, Step, StudyContent},
};

/// Shared midpoint `m` and half-distance `d > 0`, if the operands are equidistant from an integer.
fn midpoint(a: i64, b: i64) -> Option<(i64, i64)> {
    if a == b || (a + b) % 2 != 0 {
        return None;
    }
    Some(((a + b) / 2, (a - b).abs() / 2))
}

pub fn is_applicable(a: i64, b: i64, _config: &EngineConfig) -> bool {
    midpoint(a, b).is_some()
}

/// Best when the midpoint is round and the operands hug it.
pub fn quality_score(a: i64, b: i64, _config: &EngineConfig) -> f64 {
    let Some((m, d)) = midpoint(a, b) else {
        return 0.0;
    };
    let mut score: f64 = 0.6;
    if m % 10 == 0 {
        score += 0.25;
    }
    if d <= 5 {
        score += 0.15;
    }
    score.min(1.0)
}

pub fn derive(a: i64, b: i64, _config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    let (m, d) = midpoint(a, b).ok_or(EngineError::InapplicableMethod {
        method: Method::DifferenceOfSquares,
        num1: a,
        num2: b,
    })?;
    let product = mul(a, b)?;
    let m_sq = mul(m, m)?;
    let d_sq = mul(d, d)?;
    let rewrite = if a < b {
        format!("({m} - {d}) * ({m} + {d})")
    } else {
        format!("({m} + {d}) * ({m} - {d})")
    };

    Ok(vec![
        Step::new(
            rewrite,
            format!("{a} and {b} are both {d} away from {m}, so {a} × {b} = {m}² − {d}²"),
            product,
        ),
        Step::new(format!("{m} * {m}"), format!("Square the midpoint: {m}² = {m_sq}"), m_sq)
            .with_sub_steps(square_expansion(m)?.unwrap_or_default()),
        Step::new(format!("{d} * {d}"), format!("Square the distance: {d}² = {d_sq}"), d_sq)
            .with_sub_steps(square_expansion(d)?.unwrap_or_default()),
        Step::new(
            format!("{m_sq} - {d_sq}"),
            format!("Subtract: {m_sq} − {d_sq} = {}", sub(m_sq, d_sq)?),
            product,
        ),
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    match midpoint(a, b) {
        Some((m, d)) => format!(
            "{a} and {b} are equidistant ({d} each) from {m}, so the product is {m}² − {d}²."
        ),
        None => format!("{a} and {b} have no whole-number midpoint."),
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::DifferenceOfSquares,
        introduction: "If two numbers sit the same distance either side of an easy number, \
            square the easy number and subtract the square of the distance."
            .to_string(),
        foundation: "(m − d)(m + d) = m² − md + md − d² = m² − d². The cross terms cancel, so \
            only two squares are left. The midpoint is a whole number whenever both numbers \
            are even or both are odd."
            .to_string(),
        worked_examples: vec![
            worked(
                "47 × 53",
                &["Midpoint 50, distance 3", "50² = 2500", "3² = 9", "2500 − 9 = 2491"],
                2491,
            ),
            worked(
                "96 × 104",
                &["Midpoint 100, distance 4", "100² = 10000", "4² = 16", "10000 − 16 = 9984"],
                9984,
            ),
        ],
        prerequisites: vec![
            "Squares of 1 to 20".to_string(),
            "Squares of multiples of 10".to_string(),
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
    fn needs_a_whole_midpoint() {
        assert!(is_applicable(47, 53, &cfg()));
        assert!(is_applicable(12, 18, &cfg()));
        assert!(!is_applicable(47, 52, &cfg()));
        assert!(!is_applicable(47, 47, &cfg()));
    }

    #[test]
    fn derives_forty_seven_times_fifty_three() {
        let steps = derive(47, 53, &cfg()).unwrap();
        let exprs: Vec<&str> = steps.iter().map(|s| s.expression.as_str()).collect();
        assert_eq!(exprs, vec!["(50 - 3) * (50 + 3)", "50 * 50", "3 * 3", "2500 - 9"]);
        assert_eq!(steps.last().unwrap().result, 2491);
    }

    #[test]
    fn awkward_midpoint_gets_expanded() {
        // midpoint 47 is not round: 47² is worked out as (50 - 3)².
        let steps = derive(45, 49, &cfg()).unwrap();
        assert_eq!(steps[1].expression, "47 * 47");
        assert_eq!(steps[1].sub_steps.len(), 4);
        assert_eq!(steps.last().unwrap().result, 45 * 49);
    }

    #[test]
    fn round_close_midpoint_scores_highest() {
        assert!((quality_score(47, 53, &cfg()) - 1.0).abs() < 1e-9);
        assert!(quality_score(45, 49, &cfg()) < quality_score(47, 53, &cfg()));
        assert!(quality_score(20, 80, &cfg()) < 1.0);
        assert!((quality_score(45, 49, &cfg()) - 0.75).abs() < 1e-9);
        assert!((quality_score(40, 60, &cfg()) - 0.85).abs() < 1e-9);
        assert_eq!(quality_score(47, 52, &cfg()), 0.0);
    }
}
