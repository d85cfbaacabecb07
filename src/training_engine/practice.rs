//! Practice problems shaped for a chosen method.
//!
//! This sits beside the engine, not inside it: it only produces operand pairs,
//! and uses the engine's own applicability check to confirm each draw.
//!
//! ## RNG ordering
//!
//! The problem ID is drawn first, then the operands. Keep that order: changing
//! it changes every seeded problem and breaks determinism tests.

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::training_engine::{
    config::EngineConfig,
    methods,
    models::{DifficultyLevel, Method, Operands, PracticeProblem, ProblemRequest},
};

/// Draws before falling back to a known-good pair.
const MAX_DRAWS: usize = 64;

fn make_problem_id(method: Method, rng: &mut impl RngCore) -> String {
    let prefix = match method {
        Method::Distributive         => "DI",
        Method::NearPowerOfTen       => "NP",
        Method::DifferenceOfSquares  => "DS",
        Method::Factorization        => "FA",
        Method::Squaring             => "SQ",
        Method::SquaringEndingInFive => "F5",
        Method::NearHundred          => "NH",
        Method::SumToTen             => "ST",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Operand magnitude range for free-form draws.
fn operand_range(difficulty: DifficultyLevel) -> (i64, i64) {
    match difficulty {
        DifficultyLevel::Beginner     => (11, 99),
        DifficultyLevel::Intermediate => (11, 999),
        DifficultyLevel::Advanced     => (101, 9999),
    }
}

fn draw<R: Rng>(rng: &mut R, method: Method, difficulty: DifficultyLevel) -> (i64, i64) {
    let (lo, hi) = operand_range(difficulty);
    match method {
        Method::Distributive => (rng.gen_range(lo..=hi), rng.gen_range(lo..=hi)),

        Method::NearPowerOfTen => {
            let power = match difficulty {
                DifficultyLevel::Beginner     => 100,
                DifficultyLevel::Intermediate => if rng.gen_bool(0.5) { 100 } else { 1000 },
                DifficultyLevel::Advanced     => if rng.gen_bool(0.5) { 1000 } else { 10_000 },
            };
            let d = rng.gen_range(1..=power / 10);
            let near = if rng.gen_bool(0.5) { power - d } else { power + d };
            (near, rng.gen_range(lo..=hi.min(999)))
        }

        Method::DifferenceOfSquares => {
            let (m, d) = match difficulty {
                DifficultyLevel::Beginner     => (rng.gen_range(2..=9) * 10, rng.gen_range(1..=9)),
                DifficultyLevel::Intermediate => (rng.gen_range(2..=30) * 10, rng.gen_range(1..=15)),
                DifficultyLevel::Advanced     => (rng.gen_range(20..=500), rng.gen_range(1..=19)),
            };
            (m - d, m + d)
        }

        Method::Factorization => {
            let y = match difficulty {
                DifficultyLevel::Beginner     => [15, 25, 35, 45][rng.gen_range(0..4)],
                DifficultyLevel::Intermediate => rng.gen_range(1..=19) * 10 + 5,
                DifficultyLevel::Advanced     => [25, 75, 125, 375][rng.gen_range(0..4)],
            };
            let f = match difficulty {
                DifficultyLevel::Advanced => [4, 8][rng.gen_range(0..2)],
                _                         => 2,
            };
            (y, f * rng.gen_range(3..=hi.min(999) / f))
        }

        Method::Squaring => {
            let n = rng.gen_range(lo..=hi);
            (n, n)
        }

        Method::SquaringEndingInFive => {
            let top = match difficulty {
                DifficultyLevel::Beginner     => 9,
                DifficultyLevel::Intermediate => 19,
                DifficultyLevel::Advanced     => 99,
            };
            let a = rng.gen_range(1..=top) * 10 + 5;
            if difficulty == DifficultyLevel::Beginner {
                (a, a)
            } else {
                (a, rng.gen_range(1..=top) * 10 + 5)
            }
        }

        Method::NearHundred => {
            let offset = |rng: &mut R| -> i64 {
                match difficulty {
                    DifficultyLevel::Beginner => -rng.gen_range(1..=9),
                    _ => {
                        let d = rng.gen_range(1..=12);
                        if rng.gen_bool(0.5) { -d } else { d }
                    }
                }
            };
            (100 + offset(&mut *rng), 100 + offset(&mut *rng))
        }

        Method::SumToTen => {
            let t = match difficulty {
                DifficultyLevel::Beginner     => rng.gen_range(1..=9),
                DifficultyLevel::Intermediate => rng.gen_range(1..=19),
                DifficultyLevel::Advanced     => rng.gen_range(10..=99),
            };
            let u = rng.gen_range(1..=9);
            (t * 10 + u, t * 10 + (10 - u))
        }
    }
}

/// Known-good pair used if every draw misses.
fn fallback(method: Method) -> (i64, i64) {
    match method {
        Method::Distributive         => (47, 38),
        Method::NearPowerOfTen       => (98, 47),
        Method::DifferenceOfSquares  => (47, 53),
        Method::Factorization        => (25, 48),
        Method::Squaring             => (47, 47),
        Method::SquaringEndingInFive => (35, 35),
        Method::NearHundred          => (97, 96),
        Method::SumToTen             => (43, 47),
    }
}

/// Generate a practice problem the requested method applies to.
pub fn generate_problem(request: ProblemRequest) -> PracticeProblem {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let config = EngineConfig::default();
    let problem_id = make_problem_id(request.method, &mut rng);

    let (mut num1, mut num2) = (1..=MAX_DRAWS)
        .map(|_| draw(&mut rng, request.method, request.difficulty))
        .find(|&(a, b)| methods::is_applicable(request.method, Operands::new(a, b), &config))
        .unwrap_or_else(|| fallback(request.method));

    // Advanced problems sometimes carry a sign to practise sign handling.
    if request.difficulty == DifficultyLevel::Advanced {
        match rng.gen_range(0..4) {
            0 => num1 = -num1,
            1 => num2 = -num2,
            _ => {}
        }
    }

    PracticeProblem {
        problem_id,
        method: request.method,
        difficulty: request.difficulty,
        num1,
        num2,
    }
}
