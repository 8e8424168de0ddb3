// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gemini_input::{Dispatcher, Point, PointerId, RawSample, PRIMARY};

/// A stream of single clicks: press/release pairs spaced wider than the
/// double-click window, resolved by advancing past each deadline.
fn gen_click_stream(pairs: usize, spacing_ms: u64) -> Vec<RawSample> {
    let mut out = Vec::with_capacity(pairs * 2);
    for i in 0..pairs as u64 {
        let t = i * spacing_ms;
        let p = Point::new((i % 640) as i32, (i % 480) as i32);
        out.push(RawSample::press(PRIMARY, t, p));
        out.push(RawSample::release(PRIMARY, t + 30, p));
    }
    out
}

/// A stream of double clicks: chained pairs inside the window and tolerance.
fn gen_double_click_stream(pairs: usize, spacing_ms: u64) -> Vec<RawSample> {
    let mut out = Vec::with_capacity(pairs * 4);
    for i in 0..pairs as u64 {
        let t = i * spacing_ms;
        let p = Point::new((i % 640) as i32, (i % 480) as i32);
        out.push(RawSample::press(PRIMARY, t, p));
        out.push(RawSample::release(PRIMARY, t + 30, p));
        out.push(RawSample::press(PRIMARY, t + 100, p));
        out.push(RawSample::release(PRIMARY, t + 130, p));
    }
    out
}

/// A drag: one press, a long motion tail, one release.
fn gen_drag_stream(moves: usize) -> Vec<RawSample> {
    let mut out = Vec::with_capacity(moves + 2);
    out.push(RawSample::press(PRIMARY, 0, Point::new(0, 0)));
    for i in 0..moves as u64 {
        out.push(RawSample::motion(PRIMARY, 10 + i, Point::new(10 + i as i32, 0)));
    }
    out.push(RawSample::release(PRIMARY, 10 + moves as u64, Point::new(800, 0)));
    out
}

fn run_stream(samples: &[RawSample]) -> usize {
    let mut d = Dispatcher::default();
    let mut emitted = 0;
    for s in samples {
        d.submit(*s).unwrap();
        if let Some(deadline) = d.next_deadline()
            && s.timestamp >= deadline
        {
            d.advance(s.timestamp);
        }
        emitted += d.drain().count();
    }
    d.advance(u64::MAX / 2);
    emitted + d.drain().count()
}

fn bench_dispatcher(c: &mut Criterion) {
    let clicks = gen_click_stream(1000, 1000);
    let doubles = gen_double_click_stream(1000, 1000);
    let drags = gen_drag_stream(2000);

    let mut g = c.benchmark_group("dispatcher");
    g.throughput(Throughput::Elements(clicks.len() as u64));
    g.bench_function("single_clicks_1000", |b| {
        b.iter(|| black_box(run_stream(black_box(&clicks))));
    });
    g.throughput(Throughput::Elements(doubles.len() as u64));
    g.bench_function("double_clicks_1000", |b| {
        b.iter(|| black_box(run_stream(black_box(&doubles))));
    });
    g.throughput(Throughput::Elements(drags.len() as u64));
    g.bench_function("drag_2000_moves", |b| {
        b.iter(|| black_box(run_stream(black_box(&drags))));
    });
    g.finish();
}

fn bench_multi_pointer(c: &mut Criterion) {
    // Interleaved candidate clicks across 16 pointer identities.
    let mut samples = Vec::new();
    for i in 0..4000_u64 {
        let id = PointerId::new(1 + (i % 16)).unwrap();
        let t = i * 10;
        let p = Point::new(i as i32 % 640, i as i32 % 480);
        if (i / 16) % 2 == 0 {
            samples.push(RawSample::press(id, t, p));
        } else {
            samples.push(RawSample::release(id, t, p));
        }
    }

    let mut g = c.benchmark_group("dispatcher_multi_pointer");
    g.throughput(Throughput::Elements(samples.len() as u64));
    g.bench_function("interleaved_16_pointers", |b| {
        b.iter_batched(
            Dispatcher::default,
            |mut d| {
                for s in &samples {
                    let _ = d.submit(*s);
                }
                d.advance(u64::MAX / 2);
                black_box(d.drain().count())
            },
            BatchSize::SmallInput,
        );
    });
    g.finish();
}

criterion_group!(benches, bench_dispatcher, bench_multi_pointer);
criterion_main!(benches);
