use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Calculation methods
// ---------------------------------------------------------------------------

/// The closed set of mental multiplication methods.
///
/// Declaration order is significant: the selector uses it as the final,
/// deterministic tie-break when two methods cost the same and fit equally well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Distributive,
    NearPowerOfTen,
    DifferenceOfSquares,
    Factorization,
    Squaring,
    SquaringEndingInFive,
    NearHundred,
    SumToTen,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 8] = [
        Method::Distributive,
        Method::NearPowerOfTen,
        Method::DifferenceOfSquares,
        Method::Factorization,
        Method::Squaring,
        Method::SquaringEndingInFive,
        Method::NearHundred,
        Method::SumToTen,
    ];

    /// Stable snake_case identifier, identical to the serde representation.
    pub fn id(self) -> &'static str {
        match self {
            Method::Distributive         => "distributive",
            Method::NearPowerOfTen       => "near_power_of_ten",
            Method::DifferenceOfSquares  => "difference_of_squares",
            Method::Factorization        => "factorization",
            Method::Squaring             => "squaring",
            Method::SquaringEndingInFive => "squaring_ending_in_five",
            Method::NearHundred          => "near_hundred",
            Method::SumToTen             => "sum_to_ten",
        }
    }

    /// Look a method up by its [`Method::id`].
    pub fn from_id(id: &str) -> Option<Method> {
        Method::ALL.into_iter().find(|m| m.id() == id)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Distributive         => "Distributive (place-value split)",
            Method::NearPowerOfTen       => "Near a power of ten",
            Method::DifferenceOfSquares  => "Difference of squares",
            Method::Factorization        => "Factorization",
            Method::Squaring             => "Squaring",
            Method::SquaringEndingInFive => "Numbers ending in 5",
            Method::NearHundred          => "Near 100",
            Method::SumToTen             => "Last digits sum to ten",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Operands
// ---------------------------------------------------------------------------

/// A multiplication problem: `num1 × num2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operands {
    pub num1: i64,
    pub num2: i64,
}

impl Operands {
    pub fn new(num1: i64, num2: i64) -> Self {
        Operands { num1, num2 }
    }

    /// Magnitudes of both operands. Method logic only ever sees these.
    pub fn magnitudes(self) -> (i64, i64) {
        (self.num1.saturating_abs(), self.num2.saturating_abs())
    }

    /// True when exactly one operand is negative and neither is zero.
    pub fn product_is_negative(self) -> bool {
        self.num1 != 0 && self.num2 != 0 && (self.num1 < 0) != (self.num2 < 0)
    }

    pub fn both_negative(self) -> bool {
        self.num1 < 0 && self.num2 < 0
    }
}

impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.num1, self.num2)
    }
}

// ---------------------------------------------------------------------------
// Derivation steps and solutions
// ---------------------------------------------------------------------------

/// One line of a worked derivation.
///
/// `expression` only ever contains characters the sandboxed evaluator accepts,
/// so the validator can recompute `result` from it. Display-only notation
/// (², ×, −) belongs in `explanation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub expression: String,
    pub explanation: String,
    pub result: i64,
    /// Nesting level for display; sub-steps sit one level below their parent.
    pub depth: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_steps: Vec<Step>,
}

impl Step {
    /// A top-level step with no sub-steps.
    pub fn new(expression: impl Into<String>, explanation: impl Into<String>, result: i64) -> Self {
        Step {
            expression: expression.into(),
            explanation: explanation.into(),
            result,
            depth: 0,
            sub_steps: Vec::new(),
        }
    }

    /// Attach sub-steps, re-basing their depth under this step.
    pub fn with_sub_steps(mut self, sub_steps: Vec<Step>) -> Self {
        self.sub_steps = sub_steps;
        let depth = self.depth;
        self.set_depth(depth);
        self
    }

    /// Set this step's depth and push every descendant one level further down.
    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
        for sub in &mut self.sub_steps {
            sub.set_depth(depth + 1);
        }
    }

    /// Number of steps in this subtree, this step included.
    pub fn count(&self) -> usize {
        1 + self.sub_steps.iter().map(Step::count).sum::<usize>()
    }

    /// Pre-order walk over this step and every descendant.
    pub fn walk(&self) -> Vec<&Step> {
        let mut out = vec![self];
        for sub in &self.sub_steps {
            out.extend(sub.walk());
        }
        out
    }
}

/// Cognitive-cost breakdown for one derivation. Higher means harder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub step_count: f64,
    pub digit_complexity: f64,
    pub memory_chunks: f64,
    pub magnitude_penalty: f64,
    pub total_cost: f64,
}

/// A fully worked and self-checked derivation for one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub method: Method,
    pub steps: Vec<Step>,
    pub validated: bool,
    pub validation_errors: Vec<String>,
    /// Why this method suits these particular operands.
    pub optimal_reason: String,
    pub cost: CostBreakdown,
    pub quality: f64,
}

impl Solution {
    /// The value the derivation arrives at (last top-level step).
    pub fn answer(&self) -> Option<i64> {
        self.steps.last().map(|s| s.result)
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMethod {
    pub method: Method,
    pub solution: Solution,
    pub cost_score: f64,
    pub quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeMethod {
    pub method: Method,
    pub solution: Solution,
    pub cost_score: f64,
    pub quality_score: f64,
    pub why_not_optimal: String,
}

/// Result of a selection query: the best method plus every other applicable
/// method, cheapest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRanking {
    pub optimal: RankedMethod,
    pub alternatives: Vec<AlternativeMethod>,
}

// ---------------------------------------------------------------------------
// Study mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub problem: String,
    pub walkthrough: Vec<String>,
    pub answer: i64,
}

/// Static teaching material for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyContent {
    pub method: Method,
    pub introduction: String,
    pub foundation: String,
    pub worked_examples: Vec<WorkedExample>,
    pub prerequisites: Vec<String>,
}

// ---------------------------------------------------------------------------
// Practice problems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Beginner     => write!(f, "Beginner"),
            DifficultyLevel::Intermediate => write!(f, "Intermediate"),
            DifficultyLevel::Advanced     => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRequest {
    /// The method the problem should be a good fit for.
    pub method: Method,
    pub difficulty: DifficultyLevel,
    /// `Some(seed)` reproduces the same problem every time.
    pub rng_seed: Option<u64>,
}

impl ProblemRequest {
    /// Beginner difficulty, fresh entropy.
    pub fn new(method: Method) -> Self {
        ProblemRequest {
            method,
            difficulty: DifficultyLevel::Beginner,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeProblem {
    pub problem_id: String,
    pub method: Method,
    pub difficulty: DifficultyLevel,
    pub num1: i64,
    pub num2: i64,
}

impl PracticeProblem {
    pub fn operands(&self) -> Operands {
        Operands::new(self.num1, self.num2)
    }
}
