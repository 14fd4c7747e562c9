//! Importer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mochi_canvas::import_canvas;

fn bench_import_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    // Plain ASCII text
    let plain_text = "Hello, World! The quick brown fox.\n".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));

    group.bench_function("plain_text", |b| {
        b.iter(|| black_box(import_canvas(black_box(plain_text.as_bytes()), "text")))
    });

    group.finish();
}

fn bench_import_ansi(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    // SGR-heavy art with CP437 blocks, one line per row
    let mut art = Vec::new();
    for row in 0..200u32 {
        art.extend_from_slice(format!("\x1b[0;{};{}m", 30 + row % 8, 40 + (row + 3) % 8).as_bytes());
        art.extend(std::iter::repeat(0xDBu8).take(40));
        art.extend_from_slice(b"\x1b[1m");
        art.extend(std::iter::repeat(0xB1u8).take(39));
        art.extend_from_slice(b"\r\n");
    }
    group.throughput(Throughput::Bytes(art.len() as u64));

    group.bench_function("ansi_art", |b| {
        b.iter(|| black_box(import_canvas(black_box(&art), "ansi")))
    });

    // Cursor movement
    let moves = "\x1b[5;10H*\x1b[2A\x1b[3C+\x1b[s\x1b[20;1H\x1b[K\x1b[u".repeat(500);
    group.throughput(Throughput::Bytes(moves.len() as u64));

    group.bench_function("cursor_moves", |b| {
        b.iter(|| black_box(import_canvas(black_box(moves.as_bytes()), "ansi")))
    });

    group.finish();
}

fn bench_import_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    let (width, height) = (160u32, 100u32);
    let mut dump = b"CACACANV".to_vec();
    dump.extend_from_slice(&width.to_be_bytes());
    dump.extend_from_slice(&height.to_be_bytes());
    for i in 0..width * height {
        dump.extend_from_slice(&(0x20 + i % 0x5F).to_be_bytes());
        dump.extend_from_slice(&(i % 0x100).to_be_bytes());
    }
    group.throughput(Throughput::Bytes(dump.len() as u64));

    group.bench_function("native", |b| {
        b.iter(|| black_box(import_canvas(black_box(&dump), "caca")))
    });

    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    // Worst case for detection: a long buffer without any escape
    let prose = "No escapes in this text at all. ".repeat(2000);
    group.throughput(Throughput::Bytes(prose.len() as u64));

    group.bench_function("detect_text", |b| {
        b.iter(|| black_box(mochi_canvas::detect_format(black_box(prose.as_bytes()))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_import_text,
    bench_import_ansi,
    bench_import_native,
    bench_detect
);

criterion_main!(benches);
