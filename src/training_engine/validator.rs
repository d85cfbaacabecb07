//! Independent arithmetic re-check of a derivation.
//!
//! The validator never trusts how a step was produced: it re-evaluates each
//! `expression` with the sandboxed evaluator and compares the exact value to the
//! stored `result`. Problems are collected rather than short-circuited so a
//! caller sees every defect at once.

use serde::{Deserialize, Serialize};

use crate::training_engine::{
    error::EngineError,
    expression::evaluate_expression,
    models::{Operands, Solution, Step},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub validated: bool,
    pub errors: Vec<String>,
}

fn check_step(step: &Step, label: &str, expected_depth: u32, errors: &mut Vec<String>) {
    if step.depth != expected_depth {
        errors.push(format!(
            "{label}: depth is {}, expected {expected_depth}",
            step.depth
        ));
    }

    match evaluate_expression(&step.expression) {
        Ok(value) => match value.to_integer() {
            Some(v) if v == i128::from(step.result) => {}
            _ => errors.push(format!(
                "{label}: expression evaluates to {value}, but result field says {}",
                step.result
            )),
        },
        Err(e) => errors.push(format!(
            "{label}: expression {:?} could not be evaluated: {e}",
            step.expression
        )),
    }

    for (i, sub) in step.sub_steps.iter().enumerate() {
        check_step(sub, &format!("{label}.{}", i + 1), expected_depth + 1, errors);
    }
}

/// Re-derive every step of `steps` and check the final answer is `num1 × num2`.
pub fn validate_steps(steps: &[Step], num1: i64, num2: i64) -> ValidationReport {
    let mut errors = Vec::new();

    for (i, step) in steps.iter().enumerate() {
        check_step(step, &format!("Step {}", i + 1), 0, &mut errors);
    }

    let expected = i128::from(num1) * i128::from(num2);
    match steps.last() {
        Some(last) if i128::from(last.result) == expected => {}
        Some(last) => errors.push(format!(
            "Final answer mismatch: last step gives {}, but {num1} × {num2} = {expected}",
            last.result
        )),
        None => errors.push(format!("Final answer mismatch: no steps for {num1} × {num2}")),
    }

    ValidationReport { validated: errors.is_empty(), errors }
}

/// Pass a validated solution through; turn a failed self-check into an error.
pub fn into_verified(solution: Solution, ops: Operands) -> Result<Solution, EngineError> {
    if solution.validated {
        Ok(solution)
    } else {
        Err(EngineError::ValidationFailure {
            method: solution.method,
            num1: ops.num1,
            num2: ops.num2,
            errors: solution.validation_errors,
        })
    }
}
