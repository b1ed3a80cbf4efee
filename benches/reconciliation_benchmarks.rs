//! Performance benchmarks for the reconciliation pipeline.
//!
//! Measures the full pipeline (aggregation and reconciliation) over
//! synthetic row streams of increasing size, plus text rendering.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use super_recon::config::ReconConfig;
use super_recon::engine::run_reconciliation;
use super_recon::input::InputStreams;
use super_recon::models::{CellValue, Row};
use super_recon::report::render_text;

const EMPLOYEES: usize = 50;

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

/// Builds streams with `payment_count` payroll rows spread across
/// [`EMPLOYEES`] employees and every day of 2023, plus one distribution per
/// ten payments.
fn create_input(payment_count: usize) -> InputStreams {
    // 2023-01-01 as an Excel serial.
    let base_serial = 44927.0;
    let codes = ["SALARY", "LEAVE", "OVERTIME"];

    let mut payments: Vec<Row> = vec![vec![text("header"); 5]];
    let mut distributions: Vec<Row> = vec![vec![text("header"); 5]];

    for i in 0..payment_count {
        let employee = (i % EMPLOYEES) as f64;
        let date = base_serial + (i % 365) as f64;
        payments.push(vec![
            CellValue::Empty,
            CellValue::Number(date),
            CellValue::Number(employee),
            text(codes[i % codes.len()]),
            CellValue::Number(1000.0 + (i % 7) as f64 * 12.5),
        ]);
        if i % 10 == 0 {
            distributions.push(vec![
                CellValue::Number(95.0),
                CellValue::Number(date + 28.0),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Number(employee),
            ]);
        }
    }

    InputStreams {
        distributions,
        payments,
        payment_types: vec![
            vec![text("header"); 2],
            vec![text("SALARY"), text("OTE")],
            vec![text("LEAVE"), text("OTE")],
            vec![text("OVERTIME"), text("Not OTE")],
        ],
    }
}

/// Benchmark: pipeline over 1,000 payment rows.
fn bench_pipeline_1000(c: &mut Criterion) {
    let input = create_input(1000);
    let config = ReconConfig::default();

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("payments_1000", |b| {
        b.iter(|| run_reconciliation(black_box(&input), black_box(&config)))
    });
    group.finish();
}

/// Benchmark: how the pipeline scales with payroll volume.
fn bench_scaling(c: &mut Criterion) {
    let config = ReconConfig::default();
    let mut group = c.benchmark_group("scaling");

    for payment_count in [100usize, 1_000, 10_000, 50_000].iter() {
        let input = create_input(*payment_count);
        group.throughput(Throughput::Elements(*payment_count as u64));
        if *payment_count >= 10_000 {
            group.sample_size(10);
        }
        group.bench_with_input(
            BenchmarkId::new("payments", payment_count),
            &input,
            |b, input| b.iter(|| run_reconciliation(black_box(input), black_box(&config))),
        );
    }

    group.finish();
}

/// Benchmark: rendering a report for every employee.
fn bench_render_text(c: &mut Criterion) {
    let config = ReconConfig::default();
    let run = run_reconciliation(&create_input(10_000), &config);

    c.bench_function("render_text", |b| {
        b.iter(|| render_text(black_box(&run.report), black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_pipeline_1000,
    bench_scaling,
    bench_render_text
);
criterion_main!(benches);
