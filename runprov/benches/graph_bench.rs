use chrono::{DateTime, FixedOffset};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::fs;
use tempfile::TempDir;

use runprov::graph::EntityGraph;
use runprov::operations::{playback_graph, PlanExecutor, RecordOptions, RecordPlan};
use runprov::{record, IoArgument, IoArguments, Program};

const HISTORY_SIZES: &[usize] = &[10, 100, 500];

fn timestamp(seconds: usize) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-01-16T12:00:00+00:00")
        .expect("valid timestamp")
        + chrono::Duration::seconds(i64::try_from(seconds).expect("small offset"))
}

fn options(temp: &TempDir, index: usize) -> RecordOptions {
    RecordOptions::new(
        temp.path(),
        vec!["bench".to_string(), format!("run-{index}.txt")],
        timestamp(index),
    )
    .with_end_time(timestamp(index + 1))
    .with_current_user("bench")
    .with_software_version("1.0")
    .with_license("CC-BY-4.0")
    .with_base_dir(temp.path())
}

fn io(index: usize) -> IoArguments {
    IoArguments {
        output_files: vec![IoArgument::new(
            "output",
            format!("run-{index}.txt"),
            "Output file",
        )],
        ..Default::default()
    }
}

/// A crate with `count` recorded runs, each writing its own file.
fn populate(count: usize) -> TempDir {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let program = Program::new("bench", "Benchmark tool");
    for index in 0..count {
        fs::write(temp.path().join(format!("run-{index}.txt")), "x")
            .expect("failed to write output");
        record(&program, &io(index), &options(&temp, index)).expect("failed to record");
    }
    temp
}

fn bench_record_single(c: &mut Criterion) {
    let program = Program::new("bench", "Benchmark tool");

    c.bench_function("record_single", |b| {
        b.iter_batched(
            || populate(1),
            |temp| {
                let result = record(&program, &io(0), &options(&temp, 0));
                black_box(result.expect("failed to record"));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_plan_and_execute(c: &mut Criterion) {
    let program = Program::new("bench", "Benchmark tool");
    let mut group = c.benchmark_group("plan_and_execute");

    for &size in HISTORY_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &count| {
            b.iter_batched(
                || {
                    let temp = populate(count);
                    fs::write(temp.path().join(format!("run-{count}.txt")), "y")
                        .expect("failed to write output");
                    temp
                },
                |temp| {
                    let io = io(count);
                    let options = options(&temp, count);
                    let plan = RecordPlan::new(&program, &io, &options)
                        .build_plan()
                        .expect("failed to plan");
                    let mut graph = EntityGraph::load(temp.path()).expect("failed to load");
                    let result = PlanExecutor::new(&mut graph, temp.path())
                        .execute(&plan)
                        .expect("failed to execute");
                    black_box(result);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for &size in HISTORY_SIZES {
        let temp = populate(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &temp, |b, temp| {
            b.iter(|| black_box(EntityGraph::load(temp.path()).expect("failed to load")));
        });
    }

    group.finish();
}

fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback");

    for &size in HISTORY_SIZES {
        let temp = populate(size);
        let graph = EntityGraph::load(temp.path()).expect("failed to load");
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(playback_graph(graph)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record_single,
    bench_plan_and_execute,
    bench_load,
    bench_playback
);
criterion_main!(benches);
