use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ctxwin::{locate, segment, BatchProcessor, RuleSegmenter, Row, Segmenter};
use std::sync::Arc;

const SHORT_CONTEXT: &str = "Llegó muy rápido. Se fue temprano.";
const LONG_CONTEXT: &str = "El Sr. Gómez compró el coche en marzo. Costaba mucho, pero era bonito. \
    ¿Quién lo habría dicho? «Nadie», respondió ella. Lo vendieron rápido.\n\n\
    Al año siguiente volvió a la tienda. Dijo que estaba a gusto con la compra. \
    Nadie le creyó del todo. Después se fue, lento y sin prisa, hacia el puerto.";

fn bench_segment_and_locate(c: &mut Criterion) {
    let segmenter = RuleSegmenter::with_default_rules().expect("default rules compile");

    let mut group = c.benchmark_group("segment_locate");
    group.throughput(Throughput::Bytes(LONG_CONTEXT.len() as u64));

    group.bench_function("segment_long", |b| {
        b.iter(|| segmenter.segment(black_box(LONG_CONTEXT)))
    });

    let sentences = segment(&segmenter, LONG_CONTEXT).expect("segments");
    group.bench_function("locate_token", |b| {
        b.iter(|| locate(black_box("prisa"), black_box(&sentences)))
    });
    group.bench_function("locate_accent", |b| {
        b.iter(|| locate(black_box("quien"), black_box(&sentences)))
    });
    group.bench_function("locate_text_fallback", |b| {
        b.iter(|| locate(black_box("a gusto"), black_box(&sentences)))
    });
    group.bench_function("locate_miss", |b| {
        b.iter(|| locate(black_box("feliz"), black_box(&sentences)))
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let rows: Vec<Row> = (0..1_000)
        .map(|i| {
            if i % 2 == 0 {
                Row::new("rápido", SHORT_CONTEXT)
            } else {
                Row::new("a gusto", LONG_CONTEXT)
            }
        })
        .collect();

    let segmenter = Arc::new(RuleSegmenter::with_default_rules().expect("default rules compile"));
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.sample_size(20);

    group.bench_function("sequential_1k", |b| {
        let mut processor = BatchProcessor::new(Arc::clone(&segmenter));
        b.iter(|| processor.process(black_box(&rows)))
    });

    group.bench_function("parallel_1k", |b| {
        let mut processor = BatchProcessor::new(Arc::clone(&segmenter));
        b.iter(|| runtime.block_on(processor.process_parallel(rows.clone(), num_cpus::get())))
    });

    group.finish();
}

criterion_group!(benches, bench_segment_and_locate, bench_batch);
criterion_main!(benches);
