use thiserror::Error;

use crate::training_engine::models::Method;

/// Errors surfaced by the method engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A method was asked for a solution its precondition rules out.
    #[error("{method} does not apply to {num1} × {num2}")]
    InapplicableMethod { method: Method, num1: i64, num2: i64 },

    /// The caller's allow-list excludes every method that fits the operands.
    #[error("none of the allowed methods apply to {num1} × {num2}; try different methods or numbers")]
    NoApplicableMethod { num1: i64, num2: i64, allowed: Vec<Method> },

    /// An operand or intermediate value left the safe integer range.
    #[error("{context} is outside the safe range of ±{bound}")]
    Range { context: String, bound: i64 },

    /// A generated derivation failed its own arithmetic check.
    #[error("{method} produced an unverifiable derivation for {num1} × {num2}: {}", errors.join("; "))]
    ValidationFailure { method: Method, num1: i64, num2: i64, errors: Vec<String> },

    /// Every candidate failed validation.
    #[error("could not produce a verified solution for {num1} × {num2}")]
    GenerationFailed { num1: i64, num2: i64 },

    #[error("invalid engine configuration: {0}")]
    Config(String),
}

/// Errors from the sandboxed expression evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("expression is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("character {ch:?} at position {position} is not allowed")]
    ForbiddenCharacter { ch: char, position: usize },

    #[error("malformed number at position {position}")]
    InvalidNumber { position: usize },

    #[error("unexpected token at position {position}")]
    UnexpectedToken { position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unconsumed input at position {position}")]
    TrailingInput { position: usize },

    #[error("nesting deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize },

    #[error("arithmetic overflow")]
    Overflow,
}
