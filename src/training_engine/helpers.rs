//! Shared builders that keep the method modules focused on their own identity.
//!
//! Every method assembles the same pieces: checked arithmetic on magnitudes,
//! splitting an operand around a round anchor, writing steps whose expressions
//! the validator can re-evaluate, and reapplying the sign at the end.
//!
//! ## Expression text
//!
//! Expressions are built from plain ASCII (`*`, `-`, parentheses) because the
//! validator evaluates them. Negative literals are always parenthesised, e.g.
//! `3 * (-2)`. Typographic symbols go in explanations only.

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    models::{Operands, Step},
};

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

fn overflow(context: String) -> EngineError {
    EngineError::Range { context, bound: i64::MAX }
}

pub fn mul(a: i64, b: i64) -> Result<i64, EngineError> {
    a.checked_mul(b).ok_or_else(|| overflow(format!("{a} × {b}")))
}

pub fn add(a: i64, b: i64) -> Result<i64, EngineError> {
    a.checked_add(b).ok_or_else(|| overflow(format!("{a} + {b}")))
}

pub fn sub(a: i64, b: i64) -> Result<i64, EngineError> {
    a.checked_sub(b).ok_or_else(|| overflow(format!("{a} − {b}")))
}

pub fn pow10(k: u32) -> Result<i64, EngineError> {
    10i64.checked_pow(k).ok_or_else(|| overflow(format!("10^{k}")))
}

/// Reject operands whose magnitude exceeds the configured bound.
pub fn check_operands(ops: Operands, config: &EngineConfig) -> Result<(), EngineError> {
    for (name, value) in [("num1", ops.num1), ("num2", ops.num2)] {
        if value.checked_abs().map_or(true, |v| v > config.max_operand) {
            return Err(EngineError::Range {
                context: format!("operand {name} = {value}"),
                bound: config.max_operand,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Digits and place value
// ---------------------------------------------------------------------------

/// Decimal digits of `|n|`; zero has one digit.
pub fn digit_count(n: i64) -> u32 {
    let mut n = n.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Number of trailing zeros of a non-zero value.
pub fn trailing_zeros(mut n: i64) -> u32 {
    let mut zeros = 0;
    while n != 0 && n % 10 == 0 {
        n /= 10;
        zeros += 1;
    }
    zeros
}

/// Leading place value: 10 for 47, 100 for 312, 1 for 7.
pub fn place_unit(n: i64) -> Result<i64, EngineError> {
    pow10(digit_count(n) - 1)
}

/// Parenthesise negative literals so they read unambiguously inside products.
pub fn lit(n: i64) -> String {
    if n < 0 {
        format!("({n})")
    } else {
        n.to_string()
    }
}

/// `"+ 3"` / `"- 3"` for joining a signed term onto an expression.
pub fn signed_term(n: i64) -> String {
    if n < 0 {
        format!("- {}", n.unsigned_abs())
    } else {
        format!("+ {n}")
    }
}

// ---------------------------------------------------------------------------
// Partitions
// ---------------------------------------------------------------------------

/// An operand split around a round anchor on its leading place value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Not worth splitting: a single digit or an exact multiple of the place value.
    Whole(i64),
    /// `anchor + remainder`, anchor rounded down.
    Additive { anchor: i64, remainder: i64 },
    /// `anchor - remainder`, anchor rounded up.
    Subtractive { anchor: i64, remainder: i64 },
}

impl Partition {
    pub fn is_split(self) -> bool {
        !matches!(self, Partition::Whole(_))
    }

    pub fn anchor(self) -> i64 {
        match self {
            Partition::Whole(n) => n,
            Partition::Additive { anchor, .. } | Partition::Subtractive { anchor, .. } => anchor,
        }
    }

    pub fn remainder(self) -> i64 {
        match self {
            Partition::Whole(_) => 0,
            Partition::Additive { remainder, .. } | Partition::Subtractive { remainder, .. } => remainder,
        }
    }

    pub fn op(self) -> char {
        match self {
            Partition::Subtractive { .. } => '-',
            _ => '+',
        }
    }

    /// `(50 - 3)` as it appears in an expression.
    pub fn expr(self) -> String {
        match self {
            Partition::Whole(n) => n.to_string(),
            _ => format!("({} {} {})", self.anchor(), self.op(), self.remainder()),
        }
    }

    /// `50 − 3` for explanations.
    pub fn describe(self) -> String {
        match self {
            Partition::Whole(n) => n.to_string(),
            Partition::Additive { anchor, remainder } => format!("{anchor} + {remainder}"),
            Partition::Subtractive { anchor, remainder } => format!("{anchor} − {remainder}"),
        }
    }

    /// Remainder relative to the operand; smaller means a tidier split.
    pub fn relative_remainder(self, n: i64) -> f64 {
        if n == 0 {
            return 0.0;
        }
        self.remainder() as f64 / n as f64
    }
}

/// Split `n` (a magnitude) around the nearest multiples of its place value.
///
/// The smaller remainder wins; ties go to the additive form.
pub fn partition(n: i64) -> Result<Partition, EngineError> {
    if n < 10 {
        return Ok(Partition::Whole(n));
    }
    let unit = place_unit(n)?;
    let lower = (n / unit) * unit;
    let up_rem = n - lower;
    if up_rem == 0 {
        return Ok(Partition::Whole(n));
    }
    let upper = add(lower, unit)?;
    let down_rem = upper - n;
    if down_rem < up_rem {
        Ok(Partition::Subtractive { anchor: upper, remainder: down_rem })
    } else {
        Ok(Partition::Additive { anchor: lower, remainder: up_rem })
    }
}

// ---------------------------------------------------------------------------
// Reusable step fragments
// ---------------------------------------------------------------------------

/// Sub-steps for `k × y` that split `y` around its anchor, or nothing when
/// the product is already a single easy multiplication.
pub fn cross_term_sub_steps(k: i64, y: i64) -> Result<Vec<Step>, EngineError> {
    let part = partition(y)?;
    if k <= 1 || !part.is_split() {
        return Ok(Vec::new());
    }
    let (anchor, rem) = (part.anchor(), part.remainder());
    let big = mul(k, anchor)?;
    let small = mul(k, rem)?;
    let total = mul(k, y)?;
    Ok(vec![
        Step::new(format!("{k} * {anchor}"), format!("{k} × {anchor} = {big}"), big),
        Step::new(format!("{k} * {rem}"), format!("{k} × {rem} = {small}"), small),
        Step::new(
            format!("{big} {} {small}", part.op()),
            format!("Combine the pieces of {k} × {y} = {k} × ({})", part.describe()),
            total,
        ),
    ])
}

/// Expand `n²` as `(x ± r)² = x² ± 2xr + r²`, or `None` if `n` does not split.
pub fn square_expansion(n: i64) -> Result<Option<Vec<Step>>, EngineError> {
    let part = partition(n)?;
    if !part.is_split() {
        return Ok(None);
    }
    let (x, r, op) = (part.anchor(), part.remainder(), part.op());
    let x_sq = mul(x, x)?;
    let cross = mul(mul(2, x)?, r)?;
    let r_sq = mul(r, r)?;
    let total = mul(n, n)?;
    Ok(Some(vec![
        Step::new(format!("{x} * {x}"), format!("Square the round part: {x}² = {x_sq}"), x_sq),
        Step::new(format!("2 * {x} * {r}"), format!("Twice the cross term: 2 × {x} × {r} = {cross}"), cross),
        Step::new(format!("{r} * {r}"), format!("Square the remainder: {r}² = {r_sq}"), r_sq),
        Step::new(
            format!("{x_sq} {op} {cross} + {r_sq}"),
            format!("{x}² {} 2·{x}·{r} + {r}² = {total}", if op == '-' { "−" } else { "+" }),
            total,
        ),
    ]))
}

/// Append the sign step(s) that turn a magnitude product into the true product.
///
/// Intermediate steps only ever carry magnitudes; the sign is applied once,
/// at the very end.
pub fn apply_sign(steps: &mut Vec<Step>, ops: Operands, magnitude: i64) -> Result<(), EngineError> {
    if ops.product_is_negative() {
        let negated = mul(-1, magnitude)?;
        steps.push(Step::new(
            format!("-1 * {magnitude}"),
            "Exactly one number is negative, so the product is negative",
            negated,
        ));
    } else if ops.both_negative() {
        steps.push(Step::new(
            format!("-1 * -1 * {magnitude}"),
            "Both numbers are negative; the two signs cancel, so the product is positive",
            magnitude,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_prefers_smaller_remainder() {
        assert_eq!(partition(47).unwrap(), Partition::Subtractive { anchor: 50, remainder: 3 });
        assert_eq!(partition(53).unwrap(), Partition::Additive { anchor: 50, remainder: 3 });
        assert_eq!(partition(312).unwrap(), Partition::Additive { anchor: 300, remainder: 12 });
        assert_eq!(partition(980).unwrap(), Partition::Subtractive { anchor: 1000, remainder: 20 });
    }

    #[test]
    fn partition_ties_go_additive() {
        assert_eq!(partition(25).unwrap(), Partition::Additive { anchor: 20, remainder: 5 });
        assert_eq!(partition(150).unwrap(), Partition::Additive { anchor: 100, remainder: 50 });
    }

    #[test]
    fn round_and_single_digit_operands_are_whole() {
        assert_eq!(partition(7).unwrap(), Partition::Whole(7));
        assert_eq!(partition(300).unwrap(), Partition::Whole(300));
        assert!(!partition(10).unwrap().is_split());
    }

    #[test]
    fn digit_helpers() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(-999), 3);
        assert_eq!(digit_count(1_000_000_000), 10);
        assert_eq!(trailing_zeros(4500), 2);
        assert_eq!(trailing_zeros(0), 0);
        assert_eq!(place_unit(47).unwrap(), 10);
        assert_eq!(place_unit(5).unwrap(), 1);
    }

    #[test]
    fn literals_keep_negatives_parenthesised() {
        assert_eq!(lit(-4), "(-4)");
        assert_eq!(lit(4), "4");
        assert_eq!(signed_term(-6), "- 6");
        assert_eq!(signed_term(12), "+ 12");
    }

    #[test]
    fn operand_bound_is_enforced() {
        let cfg = EngineConfig::default();
        assert!(check_operands(Operands::new(1_000_000_000, -1_000_000_000), &cfg).is_ok());
        assert!(matches!(
            check_operands(Operands::new(1_000_000_001, 2), &cfg),
            Err(EngineError::Range { .. })
        ));
        assert!(check_operands(Operands::new(3, i64::MIN), &cfg).is_err());
    }

    #[test]
    fn overflow_becomes_range_error() {
        assert!(matches!(mul(i64::MAX, 2), Err(EngineError::Range { .. })));
        assert!(matches!(pow10(30), Err(EngineError::Range { .. })));
    }

    #[test]
    fn square_expansion_matches_identity() {
        let steps = square_expansion(47).unwrap().unwrap();
        assert_eq!(steps.last().unwrap().result, 2209);
        assert_eq!(steps.last().unwrap().expression, "2500 - 300 + 9");
        assert!(square_expansion(50).unwrap().is_none());
    }
}
