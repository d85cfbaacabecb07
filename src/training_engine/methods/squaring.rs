//! Squaring: `(x ± r)² = x² ± 2xr + r²`.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{mul, partition, place_unit, pow10, square_expansion, trailing_zeros, Partition},
    methods::worked,
    models::{Method, Step, StudyContent},
};

pub fn is_applicable(a: i64, b: i64, _config: &EngineConfig) -> bool {
    a == b && a >= 2
}

/// Round numbers score 1.0; the score falls as the remainder grows.
pub fn quality_score(a: i64, _b: i64, _config: &EngineConfig) -> f64 {
    match (partition(a), place_unit(a)) {
        (Ok(Partition::Whole(n)), _) if n < 10 => 0.7,
        (Ok(Partition::Whole(_)), _) => 1.0,
        (Ok(part), Ok(unit)) => (1.0 - part.remainder() as f64 / unit as f64).clamp(0.5, 1.0),
        _ => 0.5,
    }
}

pub fn derive(a: i64, b: i64, _config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    if a != b {
        return Err(EngineError::InapplicableMethod { method: Method::Squaring, num1: a, num2: b });
    }
    let square = mul(a, a)?;

    let Some(expansion) = square_expansion(a)? else {
        let explanation = if a < 10 {
            format!("Recall the square: {a}² = {square}")
        } else {
            let z = trailing_zeros(a);
            let lead = a / pow10(z)?;
            format!(
                "Square the leading digits ({lead}² = {}) and append {} zeros: {square}",
                mul(lead, lead)?,
                2 * z
            )
        };
        return Ok(vec![Step::new(format!("{a} * {a}"), explanation, square)]);
    };

    let part = partition(a)?;
    let (x, r, op) = (part.anchor(), part.remainder(), part.op());
    let sign = if op == '-' { "−" } else { "+" };
    let mut steps = vec![Step::new(
        format!("({x} {op} {r}) * ({x} {op} {r})"),
        format!("Write {a} as {x} {sign} {r} and use (x {sign} r)² = x² {sign} 2xr + r²"),
        square,
    )];
    steps.extend(expansion);
    Ok(steps)
}

pub fn fit_reason(a: i64, _b: i64, _config: &EngineConfig) -> String {
    match partition(a) {
        Ok(part) if part.is_split() => format!(
            "Both numbers are {a}, and {a} = {} expands into three easy pieces.",
            part.describe()
        ),
        _ => format!("Both numbers are {a}, a square you can read off directly."),
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::Squaring,
        introduction: "To square a number, split it into a round part and a remainder and use \
            the binomial square."
            .to_string(),
        foundation: "(x + r)² = x² + 2xr + r² and (x − r)² = x² − 2xr + r². Pick x as the \
            nearest round number so that r, and therefore 2xr and r², stay small."
            .to_string(),
        worked_examples: vec![
            worked(
                "47 × 47",
                &["47 = 50 − 3", "50² = 2500", "2 × 50 × 3 = 300", "3² = 9", "2500 − 300 + 9 = 2209"],
                2209,
            ),
            worked(
                "62 × 62",
                &["62 = 60 + 2", "60² = 3600", "2 × 60 × 2 = 240", "2² = 4", "3600 + 240 + 4 = 3844"],
                3844,
            ),
        ],
        prerequisites: vec![
            "Squares of 1 to 10".to_string(),
            "Doubling".to_string(),
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
    fn only_equal_operands_qualify() {
        assert!(is_applicable(47, 47, &cfg()));
        assert!(!is_applicable(47, 48, &cfg()));
        assert!(!is_applicable(1, 1, &cfg()));
    }

    #[test]
    fn forty_seven_squared() {
        let steps = derive(47, 47, &cfg()).unwrap();
        assert_eq!(steps[0].expression, "(50 - 3) * (50 - 3)");
        assert_eq!(steps.len(), 5);
        assert_eq!(steps.last().unwrap().result, 2209);
    }

    #[test]
    fn round_number_squares_in_one_step() {
        let steps = derive(300, 300, &cfg()).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].result, 90_000);
        assert!(steps[0].explanation.contains("append 4 zeros"));
    }

    #[test]
    fn quality_tracks_remainder() {
        assert_eq!(quality_score(300, 300, &cfg()), 1.0);
        assert!(quality_score(51, 51, &cfg()) > quality_score(47, 47, &cfg()));
    }
}
