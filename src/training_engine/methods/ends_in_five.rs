//! Numbers ending in 5.
//!
//! With `a = 10·n1 + 5` and `b = 10·n2 + 5`:
//!
//! | Shape              | Identity |
//! |--------------------|----------|
//! | `a == b`           | `n(n+1)·100 + 25` |
//! | `n1 + n2` even     | `(n1·n2 + (n1+n2)/2)·100 + 25` |
//! | otherwise          | `n1·n2·100 + (n1+n2)·50 + 25` |

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{add, mul},
    methods::worked,
    models::{Method, Step, StudyContent},
};

pub fn is_applicable(a: i64, b: i64, _config: &EngineConfig) -> bool {
    a % 10 == 5 && b % 10 == 5
}

pub fn quality_score(a: i64, b: i64, _config: &EngineConfig) -> f64 {
    if a == b {
        1.0
    } else if (a / 10 + b / 10) % 2 == 0 {
        0.8
    } else {
        0.6
    }
}

pub fn derive(a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    if !is_applicable(a, b, config) {
        return Err(EngineError::InapplicableMethod {
            method: Method::SquaringEndingInFive,
            num1: a,
            num2: b,
        });
    }
    let (n1, n2) = (a / 10, b / 10);
    let product = mul(a, b)?;

    if a == b {
        let next = add(n1, 1)?;
        let head = mul(n1, next)?;
        return Ok(vec![
            Step::new(
                format!("{n1} * {next}"),
                format!("Multiply the leading part {n1} by the next number, {next}: {head}"),
                head,
            ),
            Step::new(
                format!("{head} * 100 + 25"),
                format!("Write 25 after it: {a}² = {product}"),
                product,
            ),
        ]);
    }

    let sum = add(n1, n2)?;
    if sum % 2 == 0 {
        let half = sum / 2;
        let head = add(mul(n1, n2)?, half)?;
        return Ok(vec![
            Step::new(
                format!("{n1} * {n2} + ({n1} + {n2}) / 2"),
                format!("Multiply the leading parts and add their average: {n1} × {n2} + {half} = {head}"),
                head,
            ),
            Step::new(
                format!("{head} * 100 + 25"),
                format!("Write 25 after it: {product}"),
                product,
            ),
        ]);
    }

    let hundreds = mul(mul(n1, n2)?, 100)?;
    let fifties = mul(sum, 50)?;
    Ok(vec![
        Step::new(
            format!("{n1} * {n2} * 100"),
            format!("Leading parts times each other, in hundreds: {hundreds}"),
            hundreds,
        ),
        Step::new(
            format!("({n1} + {n2}) * 50"),
            format!("Leading parts added, times 50: {fifties}"),
            fifties,
        ),
        Step::new(
            format!("{hundreds} + {fifties} + 25"),
            format!("Add the pieces and the final 25: {product}"),
            product,
        ),
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    let (n1, n2) = (a / 10, b / 10);
    if a == b {
        format!("{a} ends in 5, so its square is {n1} × {} followed by 25.", n1 + 1)
    } else if (n1 + n2) % 2 == 0 {
        format!(
            "{a} and {b} both end in 5 and their leading parts average to {}, so the answer ends in 25.",
            (n1 + n2) / 2
        )
    } else {
        format!("{a} and {b} both end in 5, so the product splits into hundreds, fifties and 25.")
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::SquaringEndingInFive,
        introduction: "Numbers ending in 5 have a famous shortcut: to square 35, multiply 3 by 4 \
            and write 25 after it, giving 1225."
            .to_string(),
        foundation: "(10n + 5)² = 100n² + 100n + 25 = 100·n(n + 1) + 25. For two different \
            numbers ending in 5, (10a + 5)(10b + 5) = 100ab + 50(a + b) + 25; when a + b is even \
            this is 100(ab + (a + b)/2) + 25."
            .to_string(),
        worked_examples: vec![
            worked("25 × 25", &["2 × 3 = 6", "6 followed by 25 = 625"], 625),
            worked("85 × 85", &["8 × 9 = 72", "72 followed by 25 = 7225"], 7225),
            worked(
                "15 × 35",
                &["1 × 3 = 3", "average of 1 and 3 is 2", "3 + 2 = 5", "5 followed by 25 = 525"],
                525,
            ),
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
    fn twenty_five_squared_uses_n_times_n_plus_one() {
        let steps = derive(25, 25, &cfg()).unwrap();
        assert_eq!(steps[0].expression, "2 * 3");
        assert_eq!(steps[0].result, 6);
        assert_eq!(steps[1].expression, "6 * 100 + 25");
        assert_eq!(steps[1].result, 625);
    }

    #[test]
    fn even_sum_of_leading_parts() {
        let steps = derive(15, 35, &cfg()).unwrap();
        assert_eq!(steps[0].expression, "1 * 3 + (1 + 3) / 2");
        assert_eq!(steps.last().unwrap().result, 525);
    }

    #[test]
    fn odd_sum_of_leading_parts() {
        let steps = derive(15, 25, &cfg()).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.last().unwrap().result, 375);
    }

    #[test]
    fn single_five_still_works() {
        assert_eq!(derive(5, 5, &cfg()).unwrap().last().unwrap().result, 25);
    }

    #[test]
    fn quality_prefers_exact_squares() {
        assert_eq!(quality_score(45, 45, &cfg()), 1.0);
        assert!(quality_score(15, 35, &cfg()) > quality_score(15, 25, &cfg()));
    }
}
