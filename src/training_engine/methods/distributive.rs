//! Distributive / place-value split: `(x ± r) × y = x·y ± r·y`.
//!
//! The general-purpose fallback. It always applies, never fits especially
//! well, and is what every specialised method has to beat.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers::{cross_term_sub_steps, mul, partition, Partition},
    methods::worked,
    models::{Method, Step, StudyContent},
};

pub fn is_applicable(_a: i64, _b: i64, _config: &EngineConfig) -> bool {
    true
}

/// Always works, never ideal.
pub fn quality_score(_a: i64, _b: i64, _config: &EngineConfig) -> f64 {
    0.5
}

/// Pick the operand whose split leaves the smaller relative remainder.
/// Returns `(split_first, partition)`; ties split the first operand.
fn choose_split(a: i64, b: i64) -> Result<Option<(bool, Partition)>, EngineError> {
    let pa = partition(a)?;
    let pb = partition(b)?;
    Ok(match (pa.is_split(), pb.is_split()) {
        (false, false) => None,
        (true, false)  => Some((true, pa)),
        (false, true)  => Some((false, pb)),
        (true, true)   => {
            if pb.relative_remainder(b) < pa.relative_remainder(a) {
                Some((false, pb))
            } else {
                Some((true, pa))
            }
        }
    })
}

pub fn derive(a: i64, b: i64, _config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    let product = mul(a, b)?;
    if a == 0 || b == 0 {
        return Ok(vec![Step::new(format!("{a} * {b}"), "Any number times zero is zero", 0)]);
    }

    let Some((split_first, part)) = choose_split(a, b)? else {
        return Ok(vec![Step::new(
            format!("{a} * {b}"),
            format!("{a} and {b} are already round or single-digit: multiply directly to get {product}"),
            product,
        )]);
    };

    let (n, other) = if split_first { (a, b) } else { (b, a) };
    let (anchor, rem, op) = (part.anchor(), part.remainder(), part.op());
    let rewrite = if split_first {
        format!("{} * {other}", part.expr())
    } else {
        format!("{other} * {}", part.expr())
    };
    let direction = if op == '-' { "next round number above" } else { "round number below" };
    let big = mul(anchor, other)?;
    let small = mul(rem, other)?;
    let combine = if op == '-' {
        format!("Subtract the remainder's share: {big} − {small} = {product}")
    } else {
        format!("Add the two partial products: {big} + {small} = {product}")
    };

    Ok(vec![
        Step::new(
            rewrite,
            format!("Split {n} into {} using the {direction}, {anchor}", part.describe()),
            product,
        ),
        Step::new(
            format!("{anchor} * {other}"),
            format!("Multiply the round part: {anchor} × {other} = {big}"),
            big,
        )
        .with_sub_steps(cross_term_sub_steps(anchor, other)?),
        Step::new(
            format!("{rem} * {other}"),
            format!("Multiply the remainder: {rem} × {other} = {small}"),
            small,
        )
        .with_sub_steps(cross_term_sub_steps(rem, other)?),
        Step::new(format!("{big} {op} {small}"), combine, product),
    ])
}

pub fn fit_reason(a: i64, b: i64, _config: &EngineConfig) -> String {
    if a == 0 || b == 0 {
        return "One factor is zero, so the product is zero.".to_string();
    }
    match choose_split(a, b) {
        Ok(Some((split_first, part))) => {
            let n = if split_first { a } else { b };
            format!(
                "Splitting {n} into {} turns {a} × {b} into two multiplications by simpler numbers.",
                part.describe()
            )
        }
        _ => format!("{a} and {b} are already round or single-digit, so a direct product is simplest."),
    }
}

pub fn study_content() -> StudyContent {
    StudyContent {
        method: Method::Distributive,
        introduction: "The distributive method works for every multiplication. Break one number \
            into a round part and a small remainder, multiply each piece, and recombine."
            .to_string(),
        foundation: "Multiplication distributes over addition and subtraction: \
            (a + b) × c = a×c + b×c and (a − b) × c = a×c − b×c. Choosing the round part \
            closest to the number keeps the remainder, and so the second product, small."
            .to_string(),
        worked_examples: vec![
            worked(
                "47 × 53",
                &[
                    "53 = 50 + 3",
                    "50 × 47 = 2350",
                    "3 × 47 = 141",
                    "2350 + 141 = 2491",
                ],
                2491,
            ),
            worked(
                "38 × 7",
                &["38 = 40 − 2", "40 × 7 = 280", "2 × 7 = 14", "280 − 14 = 266"],
                266,
            ),
        ],
        prerequisites: vec![
            "Times tables up to 10 × 10".to_string(),
            "Multiplying by 10, 100 and 1000".to_string(),
            "Two-digit addition and subtraction".to_string(),
        ],
    }
}
