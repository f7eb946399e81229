//! Performance benchmarks for event-stream decoding
//!
//! Measures decode throughput for different record counts and chunk sizes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use beray::sse::{EventDecoder, LineBuffer};

/// Generate an event-stream body with a mix of JSON, multi-line and text records
fn generate_stream_body(records: usize) -> Vec<u8> {
    (0..records)
        .map(|i| match i % 3 {
            0 => format!(
                "event: status\ndata: {{\"state\":\"running\",\"step\":{},\"detail\":\"working on it\"}}\n\n",
                i
            ),
            1 => format!("id: {}\ndata: line one\ndata: line two\n\n", i),
            _ => ": keepalive\ndata: plain text payload\n\n".to_string(),
        })
        .collect::<String>()
        .into_bytes()
}

/// Benchmark decoding a body delivered as a single chunk
fn bench_decode_whole_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("sse_decode_whole_body");

    for records in [10, 100, 1000].iter() {
        let body = generate_stream_body(*records);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_records", records)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut decoder = EventDecoder::new();
                    let events = decoder.push(black_box(body));
                    black_box(events)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark decoding with small network-sized chunks
fn bench_decode_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("sse_decode_chunked");
    let body = generate_stream_body(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [1, 16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = EventDecoder::new();
                    let mut count = 0;
                    for chunk in body.chunks(chunk_size) {
                        count += decoder.push(black_box(chunk)).len();
                    }
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark line splitting alone
fn bench_line_buffer(c: &mut Criterion) {
    let body = with_crlf(generate_stream_body(1000));
    let mut group = c.benchmark_group("sse_line_buffer");
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("crlf_body", |b| {
        b.iter(|| {
            let mut lines = LineBuffer::new();
            black_box(lines.push(black_box(&body)))
        });
    });

    group.finish();
}

fn with_crlf(body: Vec<u8>) -> Vec<u8> {
    String::from_utf8_lossy(&body).replace('\n', "\r\n").into_bytes()
}

criterion_group!(
    benches,
    bench_decode_whole_body,
    bench_decode_chunked,
    bench_line_buffer
);
criterion_main!(benches);
