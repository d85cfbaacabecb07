//! Sandboxed arithmetic evaluator used to re-check derivation steps.
//!
//! Grammar (standard precedence, left associative):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')' | '-' factor
//! ```
//!
//! Input is screened against a character whitelist and a length limit before
//! any tokenizing happens. Arithmetic is exact: values are reduced fractions
//! over `i128` with checked operations, so `1 / 3 * 3` is exactly `1`.

use std::fmt;

use crate::training_engine::error::ExpressionError;

pub const MAX_EXPRESSION_LEN: usize = 256;
pub const MAX_NESTING_DEPTH: usize = 64;

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.') || ch.is_ascii_whitespace()
}

// ---------------------------------------------------------------------------
// Exact rational values
// ---------------------------------------------------------------------------

/// A reduced fraction with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: i128,
    denom: i128,
}

fn gcd(a: i128, b: i128) -> u128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    pub fn integer(n: i128) -> Self {
        Rational { numer: n, denom: 1 }
    }

    fn new(numer: i128, denom: i128) -> Result<Self, ExpressionError> {
        debug_assert!(denom != 0);
        // i128::MIN has no positive counterpart, so it cannot be normalised.
        if numer == i128::MIN || denom == i128::MIN {
            return Err(ExpressionError::Overflow);
        }
        let g = i128::try_from(gcd(numer, denom).max(1)).map_err(|_| ExpressionError::Overflow)?;
        let (mut n, mut d) = (numer / g, denom / g);
        if d < 0 {
            n = n.checked_neg().ok_or(ExpressionError::Overflow)?;
            d = d.checked_neg().ok_or(ExpressionError::Overflow)?;
        }
        Ok(Rational { numer: n, denom: d })
    }

    pub fn numer(self) -> i128 {
        self.numer
    }

    pub fn denom(self) -> i128 {
        self.denom
    }

    /// `Some(n)` when the value is a whole number.
    pub fn to_integer(self) -> Option<i128> {
        (self.denom == 1).then_some(self.numer)
    }

    fn add(self, rhs: Self) -> Result<Self, ExpressionError> {
        let n = self.numer.checked_mul(rhs.denom)
            .and_then(|l| rhs.numer.checked_mul(self.denom).and_then(|r| l.checked_add(r)))
            .ok_or(ExpressionError::Overflow)?;
        let d = self.denom.checked_mul(rhs.denom).ok_or(ExpressionError::Overflow)?;
        Rational::new(n, d)
    }

    fn neg(self) -> Result<Self, ExpressionError> {
        let n = self.numer.checked_neg().ok_or(ExpressionError::Overflow)?;
        Ok(Rational { numer: n, denom: self.denom })
    }

    fn sub(self, rhs: Self) -> Result<Self, ExpressionError> {
        self.add(rhs.neg()?)
    }

    fn mul(self, rhs: Self) -> Result<Self, ExpressionError> {
        let n = self.numer.checked_mul(rhs.numer).ok_or(ExpressionError::Overflow)?;
        let d = self.denom.checked_mul(rhs.denom).ok_or(ExpressionError::Overflow)?;
        Rational::new(n, d)
    }

    fn div(self, rhs: Self, position: usize) -> Result<Self, ExpressionError> {
        if rhs.numer == 0 {
            return Err(ExpressionError::DivisionByZero { position });
        }
        let n = self.numer.checked_mul(rhs.denom).ok_or(ExpressionError::Overflow)?;
        let d = self.denom.checked_mul(rhs.numer).ok_or(ExpressionError::Overflow)?;
        Rational::new(n, d)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(Rational),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Parse a literal like `250` or `2.5` into an exact fraction.
fn parse_number(text: &str, position: usize) -> Result<Rational, ExpressionError> {
    let mut parts = text.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if (whole.is_empty() && frac.is_empty()) || frac.contains('.') || text.ends_with('.') {
        return Err(ExpressionError::InvalidNumber { position });
    }

    let mut numer: i128 = 0;
    let mut denom: i128 = 1;
    for ch in whole.chars().chain(frac.chars()) {
        let digit = i128::from(ch.to_digit(10).ok_or(ExpressionError::InvalidNumber { position })?);
        numer = numer.checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or(ExpressionError::Overflow)?;
    }
    for _ in frac.chars() {
        denom = denom.checked_mul(10).ok_or(ExpressionError::Overflow)?;
    }
    Rational::new(numer, denom)
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i] as char;
        let token = match ch {
            c if c.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                tokens.push((Token::Number(parse_number(&input[start..i], start)?), start));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(ExpressionError::ForbiddenCharacter { ch: other, position: i }),
        };
        tokens.push((token, i));
        i += 1;
    }
    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Recursive-descent parser
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, p)| *p).unwrap_or(0)
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ExpressionError::TooDeep { max: MAX_NESTING_DEPTH });
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Rational, ExpressionError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value = value.add(self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value = value.sub(self.term()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<Rational, ExpressionError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value = value.mul(self.factor()?)?;
                }
                Some(Token::Slash) => {
                    let position = self.position();
                    self.pos += 1;
                    value = value.div(self.factor()?, position)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<Rational, ExpressionError> {
        let position = self.position();
        match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some(_) => Err(ExpressionError::UnexpectedToken { position: self.position() }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.factor()?.neg()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(_) => Err(ExpressionError::UnexpectedToken { position }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression exactly.
///
/// Rejects anything outside `[0-9+\-*/().\s]` before parsing, as well as
/// over-long input, division by zero, and unconsumed trailing input.
pub fn evaluate_expression(input: &str) -> Result<Rational, ExpressionError> {
    if input.len() > MAX_EXPRESSION_LEN {
        return Err(ExpressionError::TooLong { len: input.len(), max: MAX_EXPRESSION_LEN });
    }
    if let Some((position, ch)) = input.char_indices().find(|(_, c)| !is_allowed(*c)) {
        return Err(ExpressionError::ForbiddenCharacter { ch, position });
    }
    if input.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser { tokens: tokenize(input)?, pos: 0, depth: 0 };
    let value = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(ExpressionError::TrailingInput { position: parser.position() });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_int(s: &str) -> i128 {
        evaluate_expression(s).unwrap().to_integer().unwrap()
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(eval_int("2 + 3 * 4"), 14);
        assert_eq!(eval_int("(2 + 3) * 4"), 20);
        assert_eq!(eval_int("10 - 4 - 3"), 3);
        assert_eq!(eval_int("100 / 10 / 5"), 2);
    }

    #[test]
    fn difference_of_squares_form() {
        assert_eq!(eval_int("(50-3)*(50+3)"), 2491);
        assert_eq!(eval_int("50 * 50 - 3 * 3"), 2491);
    }

    #[test]
    fn unary_minus_and_signs() {
        assert_eq!(eval_int("-1 * -1 * 2491"), 2491);
        assert_eq!(eval_int("3 * (-2)"), -6);
        assert_eq!(eval_int("--4"), 4);
    }

    #[test]
    fn fractions_are_exact() {
        assert_eq!(eval_int("1 / 3 * 3"), 1);
        assert_eq!(eval_int("1 * 3 + (1 + 3) / 2"), 5);
        let half = evaluate_expression("2.5 * 3").unwrap();
        assert_eq!((half.numer(), half.denom()), (15, 2));
        assert_eq!(half.to_integer(), None);
    }

    #[test]
    fn rejects_characters_outside_whitelist() {
        for bad in ["2 + x", "2^3", "alert(1)", "2 × 3", "1;2", "4 % 2", "2,5"] {
            assert!(
                matches!(evaluate_expression(bad), Err(ExpressionError::ForbiddenCharacter { .. })),
                "{bad:?} should be rejected by the whitelist"
            );
        }
    }

    #[test]
    fn whitelist_runs_before_parsing() {
        // Malformed *and* containing a forbidden character: the character wins.
        assert_eq!(
            evaluate_expression("((( 7 $"),
            Err(ExpressionError::ForbiddenCharacter { ch: '$', position: 6 })
        );
    }

    #[test]
    fn rejects_division_by_zero() {
        assert!(matches!(
            evaluate_expression("5 / (3 - 3)"),
            Err(ExpressionError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(matches!(evaluate_expression("2 3"), Err(ExpressionError::TrailingInput { .. })));
        assert!(matches!(evaluate_expression("(1 + 2))"), Err(ExpressionError::TrailingInput { .. })));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate_expression(""), Err(ExpressionError::Empty));
        assert_eq!(evaluate_expression("   "), Err(ExpressionError::Empty));
        assert_eq!(evaluate_expression("2 +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate_expression("(2 + 3"), Err(ExpressionError::UnexpectedEnd));
        assert!(matches!(evaluate_expression("1.2.3"), Err(ExpressionError::InvalidNumber { .. })));
        assert!(matches!(evaluate_expression("."), Err(ExpressionError::InvalidNumber { .. })));
        assert!(matches!(evaluate_expression("* 2"), Err(ExpressionError::UnexpectedToken { .. })));
    }

    #[test]
    fn enforces_length_and_depth_limits() {
        let long = "1+".repeat(200) + "1";
        assert!(matches!(evaluate_expression(&long), Err(ExpressionError::TooLong { .. })));

        let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(
            evaluate_expression(&deep),
            Err(ExpressionError::TooDeep { max: MAX_NESTING_DEPTH })
        );
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let big = "9".repeat(30);
        let expr = format!("{big} * {big}");
        assert_eq!(evaluate_expression(&expr), Err(ExpressionError::Overflow));
    }

    #[test]
    fn most_negative_i128_is_overflow() {
        // 2^126 - 2^126 from below lands exactly on -2^127.
        let half = "85070591730234615865843651857942052864";
        assert_eq!(
            evaluate_expression(&format!("-{half} - {half}")),
            Err(ExpressionError::Overflow)
        );
        assert_eq!(
            evaluate_expression(&format!("(-{half} - {half}) / 2")),
            Err(ExpressionError::Overflow)
        );
        assert_eq!(eval_int(&format!("-{half} - ({half} - 1)")), i128::MIN + 1);
    }
}
