//! Core engine: method derivations, sandboxed checking, costing and ranking.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: methods, steps, solutions, rankings, study content |
//! | `error`      | `EngineError` and `ExpressionError` |
//! | `config`     | Tunable thresholds, loaded from JSON and validated |
//! | `helpers`    | Checked arithmetic, number partitions and step builders shared by methods |
//! | `expression` | Whitelisted recursive-descent evaluator over exact rationals |
//! | `validator`  | Re-evaluates every step and the final answer |
//! | `cost`       | Mental-cost breakdown of a derivation |
//! | `methods`    | Eight calculation methods behind one exhaustive dispatch |
//! | `selector`   | Filters, verifies and ranks methods for an operand pair |
//! | `practice`   | Seeded practice problems shaped for a method |

pub mod config;
pub mod cost;
pub mod error;
pub mod expression;
pub mod helpers;
pub mod methods;
pub mod models;
pub mod practice;
pub mod selector;
pub mod validator;

pub use config::{EngineConfig, MAX_SAFE_OPERAND};
pub use error::{EngineError, ExpressionError};
pub use expression::{evaluate_expression, Rational};
pub use models::{
    AlternativeMethod, CostBreakdown, DifficultyLevel, Method, MethodRanking, Operands,
    PracticeProblem, ProblemRequest, RankedMethod, Solution, Step, StudyContent, WorkedExample,
};
pub use practice::generate_problem;
pub use selector::{select_optimal_method, MethodSelector};
pub use validator::{validate_steps, ValidationReport};
