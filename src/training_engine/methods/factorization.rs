//! Factorization: regroup `x = f × g` so that `y × f` is a round number.
//!
//! `35 × 16 = (16 × 5) × 7 = 80 × 7 = 560`

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{mul, pow10, trailing_zeros},
    methods::worked,
    models::{Method, Step, StudyContent},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Regrouping {
    /// The factored operand.
    x: i64,
    /// The operand that absorbs the small factor.
    y: i64,
    f: i64,
    g: i64,
    round: i64,
    zeros: u32,
}

/// Most trailing zeros wins; ties keep the first operand, then the smallest factor.
fn regroup(a: i64, b: i64) -> Option<Regrouping> {
    let mut best: Option<Regrouping> = None;
    for (x, y) in [(a, b), (b, a)] {
        if y % 10 == 0 {
            continue;
        }
        for f in 2..=9 {
            if x % f != 0 || x / f < 2 {
                continue;
            }
            let Some(round) = y.checked_mul(f) else {
                continue;
            };
            if round % 10 != 0 {
                continue;
            }
            let zeros = trailing_zeros(round);
            if best.map_or(true, |r| zeros > r.zeros) {
                best = Some(Regrouping { x, y, f, g: x / f, round, zeros });
            }
        }
    }
    best
}

pub fn is_applicable(a: i64, b: i64, _config: &EngineConfig) -> bool {
    regroup(a, b).is_some()
}

pub fn quality_score(a: i64, b: i64, _config: &EngineConfig) -> f64 {
    match regroup(a, b) {
        Some(r) if r.zeros >= 2 => 0.9,
        Some(_) => 0.75,
        None => 0.0,
    }
}

pub fn derive(a: i64, b: i64, _config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    let Regrouping { x, y, f, g, round, zeros } = regroup(a, b).ok_or(
        EngineError::InapplicableMethod { method: Method::Factorization, num1: a, num2: b },
    )?;
    let product = mul(a, b)?;
    let scale = pow10(zeros)?;
    let lead = round / scale;

    let finish = Step::new(
        format!("{round} * {g}"),
        format!("Multiply the round number by the remaining factor: {round} × {g} = {product}"),
        product,
    );
    let finish = if lead > 1 {
        let lead_g = mul(lead, g)?;
        finish.with_sub_steps(vec![
            Step::new(format!("{lead} * {g}"), format!("{lead} × {g} = {lead_g}"), lead_g),
            Step::new(
                format!("{lead_g} * {scale}"),
                format!("Append {zeros} zero{}: {product}", if zeros == 1 { "" } else { "s" }),
                product,
            ),
        ])
    } else {
        finish
    };

    Ok(vec![
        Step::new(
            format!("({y} * {f}) * {g}"),
            format!("Write {x} as {f} × {g} and pair {f} with {y}"),
            product,
        ),
        Step::new(
            format!("{y} * {f}"),
            format!("{y} × {f} = {round}, a round number"),
            round,
        ),
        finish,
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    match regroup(a, b) {
        Some(r) => format!(
            "{} has a factor of {} and {} × {} = {} is round, leaving just {} × {}.",
            r.x, r.f, r.y, r.f, r.round, r.round, r.g
        ),
        None => format!("Neither {a} nor {b} has a small factor that makes the other round."),
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::Factorization,
        introduction: "Sometimes one number hides a small factor that turns the other number \
            into a round one. Pull the factor out and multiply it in first."
            .to_string(),
        foundation: "Multiplication is associative and commutative: y × (f × g) = (y × f) × g. \
            Numbers ending in 5 pair with even factors, and 25 pairs with 4, to make multiples \
            of 10 and 100."
            .to_string(),
        worked_examples: vec![
            worked("35 × 16", &["16 = 2 × 8", "35 × 2 = 70", "70 × 8 = 560"], 560),
            worked("25 × 48", &["48 = 4 × 12", "25 × 4 = 100", "100 × 12 = 1200"], 1200),
        ],
        prerequisites: vec![
            "Times tables up to 10 × 10".to_string(),
            "Recognising factors of 2, 4 and 5".to_string(),
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
    fn finds_a_rounding_factor() {
        assert!(is_applicable(35, 16, &cfg()));
        assert!(is_applicable(25, 48, &cfg()));
        assert!(!is_applicable(47, 53, &cfg()));
        // 30 is already round; nothing to gain.
        assert!(!is_applicable(30, 7, &cfg()));
    }

    #[test]
    fn prefers_more_trailing_zeros() {
        let steps = derive(25, 48, &cfg()).unwrap();
        assert_eq!(steps[0].expression, "(25 * 4) * 12");
        assert_eq!(steps[1].result, 100);
        assert_eq!(steps[2].result, 1200);
        assert!(steps[2].sub_steps.is_empty());
        assert_eq!(quality_score(25, 48, &cfg()), 0.9);
    }

    #[test]
    fn round_times_cofactor_has_sub_steps() {
        let steps = derive(35, 16, &cfg()).unwrap();
        // 35 = 5 × 7 and 16 × 5 = 80 is found before 16 = 2 × 8.
        assert_eq!(steps[1].expression, "16 * 5");
        assert_eq!(steps[2].expression, "80 * 7");
        assert_eq!(steps[2].sub_steps[0].expression, "8 * 7");
        assert_eq!(steps[2].result, 560);
        assert_eq!(quality_score(35, 16, &cfg()), 0.75);
    }
}
