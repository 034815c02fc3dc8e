use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandcheck_core::feedback::CleanFeedback;
use bandcheck_core::grade::Grade;

fn bench_grade_from_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_from_score");

    group.bench_function("decimal", |b| {
        b.iter(|| Grade::from_score(black_box("7.5")))
    });

    group.bench_function("integer", |b| b.iter(|| Grade::from_score(black_box("6"))));

    group.bench_function("unparsable", |b| {
        b.iter(|| Grade::from_score(black_box("N/A")))
    });

    group.finish();
}

fn bench_clean_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_feedback");

    let noisy = r#"{"feedback": "The essay (mostly) holds together.\nParagraph two \"drifts\" from the prompt."}"#;
    let clean = "Already clean text with nothing to strip.\nSecond line.";

    group.bench_function("noisy", |b| {
        b.iter(|| CleanFeedback::new(black_box(noisy)).lines().count())
    });

    group.bench_function("clean", |b| {
        b.iter(|| CleanFeedback::new(black_box(clean)).lines().count())
    });

    group.finish();
}

criterion_group!(benches, bench_grade_from_score, bench_clean_feedback);
criterion_main!(benches);
