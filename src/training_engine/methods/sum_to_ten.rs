//! Same leading part, last digits summing to ten: `t(t+1)·100 + u1·u2`.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{add, mul},
    methods::worked,
    models::{Method, Step, StudyContent},
};

pub fn is_applicable(a: i64, b: i64, _config: &EngineConfig) -> bool {
    a >= 10 && b >= 10 && a / 10 == b / 10 && a % 10 + b % 10 == 10
}

/// The identity is exact whenever it applies.
pub fn quality_score(_a: i64, _b: i64, _config: &EngineConfig) -> f64 {
    1.0
}

pub fn derive(a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    if !is_applicable(a, b, config) {
        return Err(EngineError::InapplicableMethod { method: Method::SumToTen, num1: a, num2: b });
    }
    let t = a / 10;
    let next = add(t, 1)?;
    let head = mul(t, next)?;
    let (ua, ub) = (a % 10, b % 10);
    let tail = ua * ub;
    let product = mul(a, b)?;

    Ok(vec![
        Step::new(
            format!("{t} * {next}"),
            format!("Multiply the shared leading part {t} by the next number, {next}: {head}"),
            head,
        ),
        Step::new(
            format!("{ua} * {ub}"),
            format!("Multiply the last digits: {ua} × {ub} = {tail}"),
            tail,
        ),
        Step::new(
            format!("{head} * 100 + {tail}"),
            format!("Write {tail:02} after {head}: {product}"),
            product,
        ),
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    format!(
        "{a} and {b} share the leading part {} and their last digits add up to 10.",
        a / 10
    )
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::SumToTen,
        introduction: "When two numbers start the same and their last digits add up to ten, \
            the answer can be written down almost immediately."
            .to_string(),
        foundation: "(10t + u)(10t + 10 − u) = 100t² + 100t + u(10 − u) = 100·t(t + 1) + u(10 − u). \
            The first part gives the hundreds, the product of the last digits fills the last two \
            places."
            .to_string(),
        worked_examples: vec![
            worked("43 × 47", &["4 × 5 = 20", "3 × 7 = 21", "write 20 then 21: 2021"], 2021),
            worked("81 × 89", &["8 × 9 = 72", "1 × 9 = 09", "write 72 then 09: 7209"], 7209),
        ],
        prerequisites: vec!["Times tables up to 10 × 10".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn needs_matching_leading_part_and_digit_sum() {
        assert!(is_applicable(43, 47, &cfg()));
        assert!(is_applicable(123, 127, &cfg()));
        assert!(!is_applicable(43, 57, &cfg()));
        assert!(!is_applicable(43, 48, &cfg()));
        assert!(!is_applicable(5, 5, &cfg()));
    }

    #[test]
    fn pads_single_digit_tail() {
        let steps = derive(81, 89, &cfg()).unwrap();
        assert_eq!(steps[1].result, 9);
        assert_eq!(steps[2].expression, "72 * 100 + 9");
        assert_eq!(steps[2].result, 7209);
        assert!(steps[2].explanation.contains("09"));
    }

    #[test]
    fn three_digit_leading_part() {
        assert_eq!(derive(123, 127, &cfg()).unwrap().last().unwrap().result, 15_621);
    }
}
