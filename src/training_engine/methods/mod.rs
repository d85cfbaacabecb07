//! Method implementations and the dispatch layer over the closed [`Method`] set.
//!
//! Every method module exposes the same function set, all operating on operand
//! *magnitudes*:
//!
//! ```ignore
//! pub fn is_applicable(a: i64, b: i64, config: &EngineConfig) -> bool;
//! pub fn quality_score(a: i64, b: i64, config: &EngineConfig) -> f64;
//! pub fn derive(a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError>;
//! pub fn fit_reason(a: i64, b: i64, config: &EngineConfig) -> String;
//! pub fn study_content() -> StudyContent;
//! ```
//!
//! The functions here dispatch on [`Method`] with exhaustive matches, so adding
//! a variant fails to compile until every capability handles it. They also own
//! the cross-cutting work: range checks, sign handling, validation and costing.

pub mod difference_of_squares;
pub mod distributive;
pub mod ends_in_five;
pub mod factorization;
pub mod near_hundred;
pub mod near_power_of_ten;
pub mod squaring;
pub mod sum_to_ten;

use tracing::trace;

use crate::training_engine::{
    config::EngineConfig,
    cost,
    error::EngineError,
    helpers,
    models::{CostBreakdown, Method, Operands, Solution, Step, StudyContent, WorkedExample},
    validator,
};

/// Does `method`'s structural precondition hold for `ops`?
///
/// Out-of-range operands are never applicable. Only the distributive method
/// accepts a zero operand.
pub fn is_applicable(method: Method, ops: Operands, config: &EngineConfig) -> bool {
    if helpers::check_operands(ops, config).is_err() {
        return false;
    }
    let (a, b) = ops.magnitudes();
    if method != Method::Distributive && (a == 0 || b == 0) {
        return false;
    }
    match method {
        Method::Distributive         => distributive::is_applicable(a, b, config),
        Method::NearPowerOfTen       => near_power_of_ten::is_applicable(a, b, config),
        Method::DifferenceOfSquares  => difference_of_squares::is_applicable(a, b, config),
        Method::Factorization        => factorization::is_applicable(a, b, config),
        Method::Squaring             => squaring::is_applicable(a, b, config),
        Method::SquaringEndingInFive => ends_in_five::is_applicable(a, b, config),
        Method::NearHundred          => near_hundred::is_applicable(a, b, config),
        Method::SumToTen             => sum_to_ten::is_applicable(a, b, config),
    }
}

/// Fit quality in `[0, 1]`; `0.0` when the method does not apply.
pub fn quality_score(method: Method, ops: Operands, config: &EngineConfig) -> f64 {
    if !is_applicable(method, ops, config) {
        return 0.0;
    }
    let (a, b) = ops.magnitudes();
    let score = match method {
        Method::Distributive         => distributive::quality_score(a, b, config),
        Method::NearPowerOfTen       => near_power_of_ten::quality_score(a, b, config),
        Method::DifferenceOfSquares  => difference_of_squares::quality_score(a, b, config),
        Method::Factorization        => factorization::quality_score(a, b, config),
        Method::Squaring             => squaring::quality_score(a, b, config),
        Method::SquaringEndingInFive => ends_in_five::quality_score(a, b, config),
        Method::NearHundred          => near_hundred::quality_score(a, b, config),
        Method::SumToTen             => sum_to_ten::quality_score(a, b, config),
    };
    score.clamp(0.0, 1.0)
}

fn derive(method: Method, a: i64, b: i64, config: &EngineConfig) -> Result<Vec<Step>, EngineError> {
    match method {
        Method::Distributive         => distributive::derive(a, b, config),
        Method::NearPowerOfTen       => near_power_of_ten::derive(a, b, config),
        Method::DifferenceOfSquares  => difference_of_squares::derive(a, b, config),
        Method::Factorization        => factorization::derive(a, b, config),
        Method::Squaring             => squaring::derive(a, b, config),
        Method::SquaringEndingInFive => ends_in_five::derive(a, b, config),
        Method::NearHundred          => near_hundred::derive(a, b, config),
        Method::SumToTen             => sum_to_ten::derive(a, b, config),
    }
}

fn fit_reason(method: Method, a: i64, b: i64, config: &EngineConfig) -> String {
    match method {
        Method::Distributive         => distributive::fit_reason(a, b, config),
        Method::NearPowerOfTen       => near_power_of_ten::fit_reason(a, b, config),
        Method::DifferenceOfSquares  => difference_of_squares::fit_reason(a, b, config),
        Method::Factorization        => factorization::fit_reason(a, b, config),
        Method::Squaring             => squaring::fit_reason(a, b, config),
        Method::SquaringEndingInFive => ends_in_five::fit_reason(a, b, config),
        Method::NearHundred          => near_hundred::fit_reason(a, b, config),
        Method::SumToTen             => sum_to_ten::fit_reason(a, b, config),
    }
}

/// Work `ops` through `method`, then cost and self-check the derivation.
///
/// The returned solution may have `validated == false`; callers that must not
/// show unverified arithmetic pass it through [`validator::into_verified`].
pub fn generate_solution(
    method: Method,
    ops: Operands,
    config: &EngineConfig,
) -> Result<Solution, EngineError> {
    helpers::check_operands(ops, config)?;
    if !is_applicable(method, ops, config) {
        return Err(EngineError::InapplicableMethod { method, num1: ops.num1, num2: ops.num2 });
    }

    let (a, b) = ops.magnitudes();
    let magnitude = helpers::mul(a, b)?;
    let mut steps = derive(method, a, b, config)?;
    helpers::apply_sign(&mut steps, ops, magnitude)?;

    let report = validator::validate_steps(&steps, ops.num1, ops.num2);
    let cost = cost::compute_breakdown(&steps, config);
    let quality = quality_score(method, ops, config);
    trace!(%method, %ops, total_cost = cost.total_cost, quality, validated = report.validated, "generated solution");

    Ok(Solution {
        method,
        steps,
        validated: report.validated,
        validation_errors: report.errors,
        optimal_reason: fit_reason(method, a, b, config),
        cost,
        quality,
    })
}

/// Cost of solving `ops` with `method`. Strictly positive.
pub fn compute_cost(
    method: Method,
    ops: Operands,
    config: &EngineConfig,
) -> Result<CostBreakdown, EngineError> {
    generate_solution(method, ops, config).map(|s| s.cost)
}

/// Static teaching material; independent of any operands.
pub fn study_content(method: Method) -> StudyContent {
    match method {
        Method::Distributive         => distributive::study_content(),
        Method::NearPowerOfTen       => near_power_of_ten::study_content(),
        Method::DifferenceOfSquares  => difference_of_squares::study_content(),
        Method::Factorization        => factorization::study_content(),
        Method::Squaring             => squaring::study_content(),
        Method::SquaringEndingInFive => ends_in_five::study_content(),
        Method::NearHundred          => near_hundred::study_content(),
        Method::SumToTen             => sum_to_ten::study_content(),
    }
}

/// Build one worked example for study content.
pub(crate) fn worked(problem: &str, walkthrough: &[&str], answer: i64) -> WorkedExample {
    WorkedExample {
        problem: problem.to_string(),
        walkthrough: walkthrough.iter().map(|s| s.to_string()).collect(),
        answer,
    }
}

/// Convenience entry points using the default [`EngineConfig`].
impl Method {
    pub fn is_applicable(self, num1: i64, num2: i64) -> bool {
        is_applicable(self, Operands::new(num1, num2), &EngineConfig::default())
    }

    pub fn quality_score(self, num1: i64, num2: i64) -> f64 {
        quality_score(self, Operands::new(num1, num2), &EngineConfig::default())
    }

    pub fn compute_cost(self, num1: i64, num2: i64) -> Result<CostBreakdown, EngineError> {
        compute_cost(self, Operands::new(num1, num2), &EngineConfig::default())
    }

    pub fn generate_solution(self, num1: i64, num2: i64) -> Result<Solution, EngineError> {
        generate_solution(self, Operands::new(num1, num2), &EngineConfig::default())
    }

    pub fn study_content(self) -> StudyContent {
        study_content(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inapplicable_method_is_refused() {
        let err = Method::SumToTen.generate_solution(47, 53).unwrap_err();
        assert_eq!(
            err,
            EngineError::InapplicableMethod { method: Method::SumToTen, num1: 47, num2: 53 }
        );
    }

    #[test]
    fn out_of_range_operand_is_a_range_error() {
        assert!(matches!(
            Method::Distributive.generate_solution(2_000_000_000, 3),
            Err(EngineError::Range { .. })
        ));
        assert!(!Method::Distributive.is_applicable(2_000_000_000, 3));
    }

    #[test]
    fn zero_only_fits_distributive() {
        for method in Method::ALL {
            assert_eq!(method.is_applicable(0, 100), method == Method::Distributive, "{method:?}");
        }
        let s = Method::Distributive.generate_solution(0, -53).unwrap();
        assert!(s.validated);
        assert_eq!(s.answer(), Some(0));
    }

    #[test]
    fn quality_is_zero_when_not_applicable() {
        assert_eq!(Method::NearHundred.quality_score(12, 13), 0.0);
        assert_eq!(Method::Distributive.quality_score(12, 13), 0.5);
    }

    #[test]
    fn cost_is_strictly_positive() {
        for (a, b) in [(1, 1), (7, 8), (47, 53), (0, 9)] {
            assert!(Method::Distributive.compute_cost(a, b).unwrap().total_cost > 0.0);
        }
    }

    #[test]
    fn every_method_has_study_content() {
        for method in Method::ALL {
            let content = method.study_content();
            assert_eq!(content.method, method);
            assert!(!content.introduction.is_empty());
            assert!(!content.foundation.is_empty());
            assert!(!content.worked_examples.is_empty());
            for ex in &content.worked_examples {
                assert!(!ex.walkthrough.is_empty(), "{method:?}: {}", ex.problem);
            }
        }
    }
}
