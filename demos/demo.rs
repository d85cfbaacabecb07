//! End-to-end tour of the engine.
//!
//! Run with: `cargo run --example demo`
//! Set `RUST_LOG=mental_math_drill=debug` to see every candidate being scored.
//!
//! 1. **Rankings**: a handful of pairs, each showing the optimal method's
//!    steps and why every alternative lost.
//! 2. **Allow-list**: the same pair restricted to the methods a student knows.
//! 3. **Study mode**: static teaching material for one method.
//! 4. **Practice**: one seeded problem per method, solved with that method.

use mental_math_drill::{
    generate_problem, select_optimal_method, DifficultyLevel, Method, ProblemRequest, Step,
};
use tracing_subscriber::EnvFilter;

fn print_step(step: &Step) {
    let indent = "    ".repeat(step.depth as usize + 1);
    println!("{indent}{:<26} = {:<10} {}", step.expression, step.result, step.explanation);
    for sub in &step.sub_steps {
        print_step(sub);
    }
}

fn print_ranking(num1: i64, num2: i64, allowed: Option<&[Method]>) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {num1} × {num2}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let ranking = match select_optimal_method(num1, num2, allowed) {
        Ok(ranking) => ranking,
        Err(e) => {
            println!("  error: {e}");
            println!();
            return;
        }
    };

    let best = &ranking.optimal;
    println!("  Optimal: {}  (cost {:.2}, quality {:.2})", best.method, best.cost_score, best.quality_score);
    println!("  {}", best.solution.optimal_reason);
    println!();
    for step in &best.solution.steps {
        print_step(step);
    }
    println!();
    for alt in &ranking.alternatives {
        println!("  - {} ({:.2}): {}", alt.method, alt.cost_score, alt.why_not_optimal);
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // ── 1. Rankings ──────────────────────────────────────────────────────────
    for (a, b) in [(47, 53), (98, 47), (35, 16), (47, 47), (25, 25), (97, 96), (43, 47), (-47, 53)] {
        print_ranking(a, b, None);
    }

    // ── 2. Allow-list ────────────────────────────────────────────────────────
    print_ranking(47, 53, Some(&[Method::Distributive, Method::NearPowerOfTen]));
    print_ranking(47, 53, Some(&[Method::SumToTen]));

    // ── 3. Study mode ────────────────────────────────────────────────────────
    let study = Method::DifferenceOfSquares.study_content();
    println!("━━ Study: {} ━━", study.method);
    println!("  {}", study.introduction);
    println!("  {}", study.foundation);
    for ex in &study.worked_examples {
        println!("  {} = {}", ex.problem, ex.answer);
        for line in &ex.walkthrough {
            println!("      {line}");
        }
    }
    println!("  Prerequisites: {}", study.prerequisites.join(", "));
    println!();

    // ── 4. Practice ──────────────────────────────────────────────────────────
    println!("━━ Practice (Intermediate, seed 42) ━━");
    for method in Method::ALL {
        let problem = generate_problem(ProblemRequest {
            method,
            difficulty: DifficultyLevel::Intermediate,
            rng_seed: Some(42),
        });
        let answer = select_optimal_method(problem.num1, problem.num2, Some(&[method]))
            .ok()
            .and_then(|r| r.optimal.solution.answer());
        match answer {
            Some(answer) => println!("  [{}] {:<28} {} × {} = {answer}", problem.problem_id, method.to_string(), problem.num1, problem.num2),
            None         => println!("  [{}] {:<28} {} × {} = ?", problem.problem_id, method.to_string(), problem.num1, problem.num2),
        }
    }
}
