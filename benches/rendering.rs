//! Benchmarks for chatshift normalization, filtering, and rendering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench rendering -- render`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatshift::filter::{ExportFilter, apply_filter};
use chatshift::raw::{NullResolver, RawMedia, RawMediaKind, RawMessage, normalize_all};
use chatshift::render::render;
use chatshift::stats::aggregate;
use chatshift::template::FormatTemplate;
use chatshift::{MessageKind, NormalizedMessage};

use chrono::{Duration, TimeZone, Utc};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_raw(count: usize) -> Vec<RawMessage> {
    let base_time = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    // Newest first, matching API delivery order
    (0..count)
        .rev()
        .map(|i| {
            let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
            let media = (i % 10 == 0).then(|| RawMedia {
                kind: RawMediaKind::Photo,
                file_name: None,
                size: None,
            });
            RawMessage {
                id: i as i64,
                date: base_time + Duration::minutes(i as i64),
                sender_id: None,
                sender_name: Some(sender.to_string()),
                text: format!("Message number {}", i),
                media,
                reply_to: None,
                edited: i % 7 == 0,
                deleted: false,
                action: None,
            }
        })
        .collect()
}

fn generate_messages(count: usize) -> Vec<NormalizedMessage> {
    let base_time = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
            let kind = if i % 10 == 0 {
                MessageKind::Photo
            } else {
                MessageKind::Text
            };
            NormalizedMessage::new(i as i64, base_time + Duration::minutes(i as i64), sender, kind)
                .with_text(format!("Message number {}", i))
        })
        .collect()
}

// =============================================================================
// Normalization Benchmarks
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let raw = generate_raw(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| {
                let messages = normalize_all(black_box(raw), &NullResolver);
                black_box(messages)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Filtering Benchmarks
// =============================================================================

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_date");

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        // Range covering roughly half the span
        let mid = messages[size / 2].timestamp.date_naive();
        let filter = ExportFilter::new().with_end(mid);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let filtered = apply_filter(black_box(messages.clone()), &filter);
                    black_box(filtered)
                });
            },
        );
    }
    group.finish();
}

fn bench_filter_by_media(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_media");

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        let filter = ExportFilter::new().without_media();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let filtered = apply_filter(black_box(messages.clone()), &filter);
                    black_box(filtered)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Rendering Benchmarks
// =============================================================================

fn bench_render_whatsapp(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_whatsapp");
    let template = FormatTemplate::whatsapp();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let text = render(black_box(messages), &template);
                    black_box(text)
                });
            },
        );
    }
    group.finish();
}

fn bench_render_discord_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_discord_grouping");
    let template = FormatTemplate::discord();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let text = render(black_box(messages), &template);
                    black_box(text)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Statistics Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let stats = aggregate(black_box(messages));
                    black_box(stats)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let template = FormatTemplate::whatsapp();
    let filter = ExportFilter::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let raw = generate_raw(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| {
                // Full pipeline: normalize -> filter -> render
                let messages = normalize_all(black_box(raw), &NullResolver);
                let filtered = apply_filter(messages, &filter);
                let text = render(&filtered, &template);
                black_box(text)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_normalize,
    bench_filter_by_date,
    bench_filter_by_media,
    bench_render_whatsapp,
    bench_render_discord_grouping,
    bench_aggregate,
    bench_full_pipeline,
);

criterion_main!(benches);
