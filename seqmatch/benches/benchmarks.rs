use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqmatch::align::{self, AlignMode, Scoring};
use seqmatch::batch;
use seqmatch::index::{sa, FMIndex, RotationSort};

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn bench_backward_search(c: &mut Criterion) {
    let reference = make_reference(2_000);
    let fm_idx = FMIndex::from_text_with(&reference, RotationSort::PrefixDoubling, 64).unwrap();
    let pattern = reference[100..120].to_vec();

    c.bench_function("search_20bp", |b| {
        b.iter(|| {
            black_box(fm_idx.search(black_box(&pattern)));
        })
    });
}

fn bench_locate_many(c: &mut Criterion) {
    let reference = make_reference(2_000);
    let fm_idx = FMIndex::from_text_with(&reference, RotationSort::PrefixDoubling, 64).unwrap();
    let patterns: Vec<&[u8]> = (0..64).map(|i| &reference[i * 20..i * 20 + 8]).collect();

    c.bench_function("locate_many_64x8bp", |b| {
        b.iter(|| {
            black_box(batch::locate_many(black_box(&fm_idx), black_box(patterns.as_slice())));
        })
    });
}

fn bench_rotation_sort(c: &mut Criterion) {
    let mut text = make_reference(1_000);
    text.push(b'$');

    c.bench_function("rotations_naive_1k", |b| {
        b.iter(|| black_box(sa::sort_rotations(black_box(&text), RotationSort::Naive)))
    });
    c.bench_function("rotations_doubling_1k", |b| {
        b.iter(|| black_box(sa::sort_rotations(black_box(&text), RotationSort::PrefixDoubling)))
    });
}

fn bench_align(c: &mut Criterion) {
    let query = make_reference(200);
    let mut target = query.clone();
    target[50] = b'N'; // introduce mismatch
    target.remove(120);
    let scoring = Scoring::default();

    c.bench_function("global_200bp", |b| {
        b.iter(|| black_box(align::align(black_box(&query), black_box(&target), &scoring, AlignMode::Global)))
    });
    c.bench_function("local_200bp", |b| {
        b.iter(|| black_box(align::align(black_box(&query), black_box(&target), &scoring, AlignMode::Local)))
    });
}

criterion_group!(benches, bench_backward_search, bench_locate_many, bench_rotation_sort, bench_align);
criterion_main!(benches);
