//! Performance benchmarks for the analytics engine and the SQLite store.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Suggestion generation over synthetic histories of various sizes
//! - The long-form analytics summary
//! - Reading a stored entry collection back from SQLite

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use til_insights::analytics::{generate, AnalyticsSummary};
use til_insights::db::Database;
use til_insights::models::{Goal, LogEntry};
use til_insights::store::{KvRepository, Repository};

const TAGS: [&str; 8] = ["rust", "go", "react", "sql", "docker", "css", "git", "api"];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// A history of `count` entries, roughly three per day going back from `now`.
fn synthetic_history(count: usize) -> Vec<LogEntry> {
    (0..count)
        .map(|i| {
            let created = now() - Duration::hours(8 * i as i64);
            LogEntry::new(format!("entry-{}", i), format!("learned thing number {}", i), created.to_rfc3339())
                .with_tags([TAGS[i % TAGS.len()], TAGS[(i / 3) % TAGS.len()]])
        })
        .collect()
}

fn synthetic_goals() -> Vec<Goal> {
    TAGS.iter()
        .take(4)
        .enumerate()
        .map(|(i, tag)| {
            Goal::new(format!("goal-{}", i), *tag, "2024-01-01T00:00:00Z")
                .with_related_tags([*tag])
                .with_target(Some(50))
                .with_deadline(Some((now() + Duration::days(3)).to_rfc3339()))
        })
        .collect()
}

/// Benchmark suggestion generation with various history sizes.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_suggestions");
    let goals = synthetic_goals();

    for size in [100, 1_000, 10_000] {
        let entries = synthetic_history(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                let suggestions = generate(black_box(entries), black_box(&goals), &now(), &mut rng);
                black_box(suggestions);
            });
        });
    }

    group.finish();
}

/// Benchmark the analytics summary with various history sizes.
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics_summary");
    let goals = synthetic_goals();

    for size in [100, 1_000, 10_000] {
        let entries = synthetic_history(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let summary = AnalyticsSummary::compute(black_box(entries), black_box(&goals), &now());
                black_box(summary);
            });
        });
    }

    group.finish();
}

/// Benchmark loading the entry collection from SQLite.
fn bench_sqlite_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqlite_list_entries");

    for size in [100, 1_000] {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db = Database::open(&temp_dir.path().join("bench.db")).expect("failed to open db");
        db.initialize_schema().expect("failed to initialize schema");
        let repo = KvRepository::new(db);
        for entry in synthetic_history(size).into_iter().rev() {
            repo.save_entry(entry).expect("failed to save entry");
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &repo, |b, repo| {
            b.iter(|| {
                let entries = repo.list_entries().expect("failed to list entries");
                black_box(entries);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_summary, bench_sqlite_list);
criterion_main!(benches);
