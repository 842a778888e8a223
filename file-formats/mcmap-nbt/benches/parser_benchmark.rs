//! Benchmarks for the NBT parser

use criterion::{Criterion, criterion_group, criterion_main};
use mcmap_nbt::{Compound, NbtFile, Tag, to_bytes, to_gzip_bytes};
use std::hint::black_box;

fn create_map_document() -> NbtFile {
    let data = Compound::new()
        .with("scale", Tag::Byte(0))
        .with("dimension", Tag::Byte(0))
        .with("height", Tag::Short(128))
        .with("width", Tag::Short(128))
        .with("xCenter", Tag::Int(0))
        .with("zCenter", Tag::Int(0))
        .with("colors", Tag::ByteArray((0..143u8).cycle().take(16384).collect()));
    NbtFile::new("", Compound::new().with("data", Tag::Compound(data)))
}

fn bench_parse(c: &mut Criterion) {
    let file = create_map_document();
    let plain = to_bytes(&file).expect("encode plain");
    let gzip = to_gzip_bytes(&file).expect("encode gzip");

    c.bench_function("parse_map_plain", |b| {
        b.iter(|| mcmap_nbt::parse(black_box(&plain)))
    });

    c.bench_function("parse_map_gzip", |b| {
        b.iter(|| mcmap_nbt::parse(black_box(&gzip)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
