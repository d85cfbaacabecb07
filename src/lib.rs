//! # mental_math_drill
//!
//! A deterministic engine that picks the easiest way to multiply two integers
//! in your head, and shows the work.
//!
//! For a pair like `47 × 53` the engine tries every calculation method that
//! fits (difference of squares, distributive split, near-hundred, and so on),
//! derives a step-by-step solution for each, checks every step with a
//! sandboxed arithmetic evaluator, scores each derivation by how hard it is
//! to carry out mentally, and returns the cheapest one with the others ranked
//! behind it.
//!
//! ## How it works
//!
//! 1. Call [`select_optimal_method`] (or build a [`MethodSelector`] with a
//!    custom [`EngineConfig`]).
//! 2. Every applicable [`Method`] produces a [`Solution`]: a tree of [`Step`]s
//!    whose expressions only use digits, `+ - * /` and parentheses.
//! 3. Each step is re-evaluated by [`evaluate_expression`]. A derivation that
//!    fails validation never reaches the ranking.
//! 4. The returned [`MethodRanking`] holds the optimal method, why it won, and
//!    every alternative with a one-sentence reason it lost.
//!
//! ## Key features
//!
//! - **Deterministic**: the same inputs always produce the same ranking.
//! - **Sign aware**: methods work on magnitudes; the sign is applied as a
//!   final, visible step.
//! - **Checked arithmetic**: overflow is an [`EngineError::Range`], never a
//!   wrapped value.
//! - **Practice mode**: [`generate_problem`] draws seeded problems shaped for
//!   a chosen method.
//!
//! ## Quick start
//!
//! ```rust
//! use mental_math_drill::{select_optimal_method, Method};
//!
//! let ranking = select_optimal_method(47, 53, None).unwrap();
//! assert_eq!(ranking.optimal.method, Method::DifferenceOfSquares);
//! assert_eq!(ranking.optimal.solution.answer(), Some(2491));
//!
//! for step in &ranking.optimal.solution.steps {
//!     println!("{:<24} {}", step.expression, step.explanation);
//! }
//! for alt in &ranking.alternatives {
//!     println!("{}: {}", alt.method, alt.why_not_optimal);
//! }
//!
//! // Only consider the methods a student has already learned:
//! let ranking = select_optimal_method(47, 53, Some(&[Method::Distributive])).unwrap();
//! assert_eq!(ranking.optimal.method, Method::Distributive);
//! ```

pub mod training_engine;

// Convenience re-exports so callers can use `mental_math_drill::select_optimal_method`
// directly without reaching into `training_engine::`.
pub use training_engine::{
    evaluate_expression, generate_problem, select_optimal_method, validate_steps,
    AlternativeMethod, CostBreakdown, DifficultyLevel, EngineConfig, EngineError,
    ExpressionError, Method, MethodRanking, MethodSelector, Operands, PracticeProblem,
    ProblemRequest, RankedMethod, Rational, Solution, Step, StudyContent, ValidationReport,
    WorkedExample, MAX_SAFE_OPERAND,
};
