//! Method selection: filter, solve, verify, rank, explain.

use std::cmp::Ordering;

use tracing::{debug, error, warn};

use crate::training_engine::{
    config::EngineConfig,
    error::EngineError,
    helpers,
    methods,
    models::{AlternativeMethod, Method, MethodRanking, Operands, RankedMethod, Solution},
    validator,
};

/// Picks the cheapest verified method for an operand pair.
///
/// Holds only configuration; a single selector can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MethodSelector {
    config: EngineConfig,
}

/// Cheapest first, then best fit, then declaration order.
fn rank_order(x: &Solution, y: &Solution) -> Ordering {
    x.cost.total_cost
        .total_cmp(&y.cost.total_cost)
        .then_with(|| y.quality.total_cmp(&x.quality))
        .then_with(|| x.method.cmp(&y.method))
}

/// One sentence on why `alt` lost to `best`.
fn why_not_optimal(alt: &Solution, best: &Solution) -> String {
    let (a, b) = (&alt.cost, &best.cost);
    let detail = if a.step_count > b.step_count {
        format!("it needs more steps ({} vs {})", a.step_count, b.step_count)
    } else if a.magnitude_penalty > b.magnitude_penalty {
        "it works with larger intermediate values".to_string()
    } else if a.memory_chunks > b.memory_chunks {
        format!(
            "it means holding more numbers in your head at once ({} vs {})",
            a.memory_chunks, b.memory_chunks
        )
    } else if a.digit_complexity > b.digit_complexity {
        "its intermediate numbers have more digits to handle".to_string()
    } else if alt.quality < best.quality {
        format!(
            "it fits these numbers less closely (quality {:.2} vs {:.2})",
            alt.quality, best.quality
        )
    } else {
        return format!(
            "{} is just as easy here; {} is listed first.",
            alt.method, best.method
        );
    };

    if a.total_cost > b.total_cost {
        format!(
            "Costs {:.2} versus {:.2} for {} because {detail}.",
            a.total_cost, b.total_cost, best.method
        )
    } else {
        format!("Ties with {} on cost, but {detail}.", best.method)
    }
}

fn optimal_reason(best: &Solution, candidates: usize) -> String {
    if candidates == 1 {
        format!("{} It is the only method that applies here.", best.optimal_reason)
    } else {
        format!(
            "{} It has the lowest mental cost ({:.2}) of the {candidates} methods that apply.",
            best.optimal_reason, best.cost.total_cost
        )
    }
}

impl MethodSelector {
    pub fn new(config: EngineConfig) -> Self {
        MethodSelector { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rank every applicable method for `num1 × num2`.
    ///
    /// `allowed` restricts the candidates; `None` or an empty slice means every
    /// method. Fails with [`EngineError::NoApplicableMethod`] when the
    /// restriction leaves nothing that fits, and with
    /// [`EngineError::GenerationFailed`] if no derivation survives validation.
    pub fn select_optimal_method(
        &self,
        num1: i64,
        num2: i64,
        allowed: Option<&[Method]>,
    ) -> Result<MethodRanking, EngineError> {
        let ops = Operands::new(num1, num2);
        helpers::check_operands(ops, &self.config)?;

        let allowed: Vec<Method> = match allowed {
            Some(list) if !list.is_empty() => list.to_vec(),
            _ => Method::ALL.to_vec(),
        };
        let candidates: Vec<Method> = Method::ALL
            .into_iter()
            .filter(|m| allowed.contains(m))
            .filter(|&m| methods::is_applicable(m, ops, &self.config))
            .collect();

        if candidates.is_empty() {
            warn!(%ops, ?allowed, "allow-list excludes every applicable method");
            return Err(EngineError::NoApplicableMethod { num1, num2, allowed });
        }

        let config = &self.config;
        rank(
            ops,
            candidates.into_iter().map(|method| {
                let verified = methods::generate_solution(method, ops, config)
                    .and_then(|s| validator::into_verified(s, ops));
                (method, verified)
            }),
        )
    }
}

/// Drop failed candidates, sort the rest and explain the order.
///
/// A `Range` error aborts the whole query; any other failure discards only
/// that candidate.
fn rank(
    ops: Operands,
    candidates: impl IntoIterator<Item = (Method, Result<Solution, EngineError>)>,
) -> Result<MethodRanking, EngineError> {
    let mut solutions = Vec::new();
    for (method, verified) in candidates {
        match verified {
            Ok(solution) => {
                debug!(
                    %method,
                    %ops,
                    total_cost = solution.cost.total_cost,
                    quality = solution.quality,
                    "candidate scored"
                );
                solutions.push(solution);
            }
            Err(e @ EngineError::Range { .. }) => return Err(e),
            Err(e) => error!(%method, %ops, error = %e, "discarding candidate"),
        }
    }

    solutions.sort_by(rank_order);
    let count = solutions.len();
    let mut ranked = solutions.into_iter();
    let Some(mut best) = ranked.next() else {
        return Err(EngineError::GenerationFailed { num1: ops.num1, num2: ops.num2 });
    };

    let alternatives = ranked
        .map(|alt| AlternativeMethod {
            method: alt.method,
            cost_score: alt.cost.total_cost,
            quality_score: alt.quality,
            why_not_optimal: why_not_optimal(&alt, &best),
            solution: alt,
        })
        .collect();

    best.optimal_reason = optimal_reason(&best, count);
    Ok(MethodRanking {
        optimal: RankedMethod {
            method: best.method,
            cost_score: best.cost.total_cost,
            quality_score: best.quality,
            solution: best,
        },
        alternatives,
    })
}

/// [`MethodSelector::select_optimal_method`] with the default configuration.
pub fn select_optimal_method(
    num1: i64,
    num2: i64,
    allowed: Option<&[Method]>,
) -> Result<MethodRanking, EngineError> {
    MethodSelector::default().select_optimal_method(num1, num2, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distributive_is_the_fallback() {
        let ranking = select_optimal_method(47, 52, None).unwrap();
        assert!(
            std::iter::once(ranking.optimal.method)
                .chain(ranking.alternatives.iter().map(|a| a.method))
                .any(|m| m == Method::Distributive)
        );
    }

    #[test]
    fn difference_of_squares_beats_distributive_for_47_53() {
        let ranking = select_optimal_method(47, 53, None).unwrap();
        assert_eq!(ranking.optimal.method, Method::DifferenceOfSquares);
        assert_eq!(ranking.optimal.solution.answer(), Some(2491));
        assert!(ranking.optimal.solution.optimal_reason.contains("50"));
    }

    #[test]
    fn restricted_to_distributive() {
        let ranking = select_optimal_method(47, 53, Some(&[Method::Distributive])).unwrap();
        assert_eq!(ranking.optimal.method, Method::Distributive);
        assert!(ranking.alternatives.is_empty());
        assert!(ranking.optimal.solution.optimal_reason.contains("only method"));
    }

    #[test]
    fn allow_list_without_a_fit_is_an_error() {
        let err = select_optimal_method(47, 53, Some(&[Method::NearHundred, Method::SumToTen]))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::NoApplicableMethod {
                num1: 47,
                num2: 53,
                allowed: vec![Method::NearHundred, Method::SumToTen],
            }
        );
    }

    #[test]
    fn empty_allow_list_means_everything() {
        let all = select_optimal_method(97, 96, None).unwrap();
        let empty = select_optimal_method(97, 96, Some(&[])).unwrap();
        assert_eq!(all, empty);
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        assert!(matches!(
            select_optimal_method(-1_000_000_001, 2, None),
            Err(EngineError::Range { .. })
        ));
    }

    #[test]
    fn every_alternative_explains_itself() {
        let ranking = select_optimal_method(25, 25, None).unwrap();
        assert!(!ranking.alternatives.is_empty());
        for alt in &ranking.alternatives {
            assert!(alt.why_not_optimal.ends_with('.'), "{}", alt.why_not_optimal);
            assert!(alt.cost_score >= ranking.optimal.cost_score);
        }
    }

    fn verified(method: Method, a: i64, b: i64) -> (Method, Result<Solution, EngineError>) {
        let ops = Operands::new(a, b);
        let result = methods::generate_solution(method, ops, &EngineConfig::default())
            .and_then(|s| validator::into_verified(s, ops));
        (method, result)
    }

    /// A derivation with one corrupted step, run through the same check the
    /// selector uses.
    fn corrupted(method: Method, a: i64, b: i64) -> (Method, Result<Solution, EngineError>) {
        let ops = Operands::new(a, b);
        let mut solution = methods::generate_solution(method, ops, &EngineConfig::default()).unwrap();
        solution.steps[0].result += 1;
        let report = validator::validate_steps(&solution.steps, a, b);
        solution.validated = report.validated;
        solution.validation_errors = report.errors;
        (method, validator::into_verified(solution, ops))
    }

    #[test]
    fn failed_candidate_is_discarded_and_rest_ranked() {
        let ops = Operands::new(47, 53);
        let (method, bad) = corrupted(Method::DifferenceOfSquares, 47, 53);
        assert!(matches!(bad, Err(EngineError::ValidationFailure { .. })));

        let ranking = rank(ops, [(method, bad), verified(Method::Distributive, 47, 53)]).unwrap();
        assert_eq!(ranking.optimal.method, Method::Distributive);
        assert!(ranking.alternatives.is_empty());
        assert!(ranking.optimal.solution.optimal_reason.contains("only method"));
    }

    #[test]
    fn every_candidate_failing_is_generation_failed() {
        let ranking = rank(
            Operands::new(47, 53),
            [
                corrupted(Method::Distributive, 47, 53),
                corrupted(Method::DifferenceOfSquares, 47, 53),
            ],
        );
        assert_eq!(ranking, Err(EngineError::GenerationFailed { num1: 47, num2: 53 }));
    }

    #[test]
    fn range_error_aborts_ranking() {
        let range = EngineError::Range { context: "intermediate 10^19".to_string(), bound: i64::MAX };
        let ranking = rank(
            Operands::new(47, 53),
            [verified(Method::Distributive, 47, 53), (Method::DifferenceOfSquares, Err(range.clone()))],
        );
        assert_eq!(ranking, Err(range));
    }

    #[test]
    fn no_candidates_is_generation_failed() {
        assert_eq!(
            rank(Operands::new(3, 4), Vec::<(Method, Result<Solution, EngineError>)>::new()),
            Err(EngineError::GenerationFailed { num1: 3, num2: 4 })
        );
    }

    #[test]
    fn custom_config_changes_applicability() {
        let tight = EngineConfig { near_hundred_radius: 2, ..EngineConfig::default() };
        let selector = MethodSelector::new(tight);
        assert!(matches!(
            selector.select_optimal_method(97, 96, Some(&[Method::NearHundred])),
            Err(EngineError::NoApplicableMethod { .. })
        ));
        assert!(select_optimal_method(97, 96, Some(&[Method::NearHundred])).is_ok());
    }
}
