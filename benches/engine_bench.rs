//! Benchmark suite for stroop-core
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stroop_core::types::{GameColor, GameWord, QuestionResult, WordCategory};
use stroop_core::{report, stats};

fn synthetic_results(n: usize) -> Vec<QuestionResult> {
    (0..n)
        .map(|i| QuestionResult {
            word: GameWord {
                text: if i % 4 == 0 { "失败" } else { "桌子" }.to_string(),
                display_color: GameColor::Red,
                is_emotional: i % 4 == 0,
                category: Some(if i % 4 == 0 {
                    WordCategory::Negative
                } else {
                    WordCategory::Neutral
                }),
            },
            selected_color: Some(GameColor::Red),
            correct_color: GameColor::Red,
            is_correct: i % 3 != 0,
            response_time: 500 + (i as u64 % 30) * 100,
            question_index: i,
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let results = synthetic_results(1_000);
    c.bench_function("stats::aggregate/1000", |b| {
        b.iter(|| stats::aggregate(&results))
    });
}

fn bench_report(c: &mut Criterion) {
    let results = synthetic_results(1_000);
    let game_stats = stats::aggregate(&results);
    c.bench_function("report::generate", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        b.iter(|| report::generate(&game_stats, &mut rng))
    });
}

criterion_group!(benches, bench_aggregate, bench_report);
criterion_main!(benches);
