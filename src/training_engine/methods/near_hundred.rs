//! Near 100: `(100 + p)(100 + q) = (100 + p + q)·100 + p·q`.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{add, lit, mul, signed_term},
    methods::worked,
    models::{Method, Step, StudyContent},
};

pub fn is_applicable(a: i64, b: i64, config: &EngineConfig) -> bool {
    (a - 100).abs() <= config.near_hundred_radius && (b - 100).abs() <= config.near_hundred_radius
}

/// 1.0 at exactly 100, falling to 0.5 when both sit at the edge of the radius.
pub fn quality_score(a: i64, b: i64, config: &EngineConfig) -> f64 {
    let deviation = ((a - 100).abs() + (b - 100).abs()) as f64;
    let span = (2 * config.near_hundred_radius) as f64;
    (1.0 - 0.5 * deviation / span).clamp(0.5, 1.0)
}

/// `100 − 3` / `100 + 4` / `100` for explanations.
fn around_hundred(dev: i64) -> String {
    match dev {
        0 => "100".to_string(),
        d if d < 0 => format!("100 − {}", -d),
        d => format!("100 + {d}"),
    }
}

pub fn derive(a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    if !is_applicable(a, b, config) {
        return Err(EngineError::InapplicableMethod { method: Method::NearHundred, num1: a, num2: b });
    }
    let (p, q) = (a - 100, b - 100);
    let cross = add(a, q)?;
    let hundreds = mul(cross, 100)?;
    let tail = mul(p, q)?;
    let product = mul(a, b)?;

    Ok(vec![
        Step::new(
            format!("{a} {}", signed_term(q)),
            format!(
                "{a} is {} and {b} is {}; cross-add the deviation: {a} {} {} = {cross}",
                around_hundred(p),
                around_hundred(q),
                if q < 0 { "−" } else { "+" },
                q.abs()
            ),
            cross,
        ),
        Step::new(
            format!("{cross} * 100"),
            format!("That gives the hundreds: {hundreds}"),
            hundreds,
        ),
        Step::new(
            format!("{} * {}", lit(p), lit(q)),
            format!("Multiply the deviations: {p} × {q} = {tail}"),
            tail,
        ),
        Step::new(
            format!("{hundreds} {}", signed_term(tail)),
            format!("Combine: {product}"),
            product,
        ),
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    format!(
        "{a} = {} and {b} = {} are both close to 100, so only the small deviations need multiplying.",
        around_hundred(a - 100),
        around_hundred(b - 100)
    )
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::NearHundred,
        introduction: "When both numbers are close to 100, work with how far each is from 100 \
            instead of with the numbers themselves."
            .to_string(),
        foundation: "(100 + p)(100 + q) = 100·(100 + p + q) + p·q. Adding one number's \
            deviation to the other number gives the hundreds; the product of the deviations \
            gives the rest. Deviations below 100 are negative."
            .to_string(),
        worked_examples: vec![
            worked(
                "97 × 96",
                &["97 = 100 − 3, 96 = 100 − 4", "97 − 4 = 93", "93 × 100 = 9300", "(−3) × (−4) = 12", "9300 + 12 = 9312"],
                9312,
            ),
            worked(
                "103 × 98",
                &["103 = 100 + 3, 98 = 100 − 2", "103 − 2 = 101", "101 × 100 = 10100", "3 × (−2) = −6", "10100 − 6 = 10094"],
                10094,
            ),
        ],
        prerequisites: vec![
            "Negative numbers".to_string(),
            "Multiplying by 100".to_string(),
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
    fn both_operands_must_be_close() {
        assert!(is_applicable(97, 96, &cfg()));
        assert!(is_applicable(85, 115, &cfg()));
        assert!(!is_applicable(97, 84, &cfg()));
    }

    #[test]
    fn both_below_hundred() {
        let steps = derive(97, 96, &cfg()).unwrap();
        let exprs: Vec<&str> = steps.iter().map(|s| s.expression.as_str()).collect();
        assert_eq!(exprs, vec!["97 - 4", "93 * 100", "(-3) * (-4)", "9300 + 12"]);
        assert_eq!(steps.last().unwrap().result, 9312);
    }

    #[test]
    fn straddling_hundred_subtracts_the_tail() {
        let steps = derive(103, 98, &cfg()).unwrap();
        assert_eq!(steps[2].result, -6);
        assert_eq!(steps[3].expression, "10100 - 6");
        assert_eq!(steps[3].result, 10094);
    }

    #[test]
    fn quality_falls_with_total_deviation() {
        assert_eq!(quality_score(100, 100, &cfg()), 1.0);
        assert!(quality_score(99, 98, &cfg()) > quality_score(90, 88, &cfg()));
        assert_eq!(quality_score(85, 115, &cfg()), 0.5);
    }
}
