// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use gemini_registry::{FontData, Handle, PaletteData, Registry, ResourceData};

fn font(tag: u16) -> ResourceData {
    ResourceData::Font(FontData {
        height: 8,
        ascender: 6,
        bits: vec![tag; 8 * 16],
        left_edges: (0..=96).map(|g| g * 6).collect(),
    })
}

fn populated(n: u16) -> (Registry, Vec<Handle>) {
    let reg = Registry::new();
    let handles = (0..n).map(|i| reg.register(font(i)).unwrap()).collect();
    (reg, handles)
}

fn bench_resolve(c: &mut Criterion) {
    let (reg, handles) = populated(1024);

    let mut g = c.benchmark_group("registry");
    g.throughput(Throughput::Elements(handles.len() as u64));
    g.bench_function("resolve_1024_live", |b| {
        b.iter(|| {
            let mut live = 0;
            for &h in &handles {
                if !reg.resolve(black_box(h)).is_gone() {
                    live += 1;
                }
            }
            black_box(live)
        });
    });
    g.finish();
}

fn bench_replace(c: &mut Criterion) {
    let reg = Registry::new();
    let h = reg
        .register(ResourceData::Palette(PaletteData { pens: vec![0; 256] }))
        .unwrap();

    let mut g = c.benchmark_group("registry");
    g.bench_function("replace_single_record", |b| {
        let mut pen = 0_u8;
        b.iter(|| {
            pen = pen.wrapping_add(1);
            reg.replace(h, ResourceData::Palette(PaletteData { pens: vec![pen; 256] }))
                .unwrap();
        });
    });
    g.bench_function("register_font", |b| {
        b.iter(|| black_box(reg.register(font(0)).unwrap()));
    });
    g.finish();
}

criterion_group!(benches, bench_resolve, bench_replace);
criterion_main!(benches);
