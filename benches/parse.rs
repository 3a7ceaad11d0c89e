//! Benchmark: parse, text export, and parse+export over a synthetic asset file
//! (meshes with vertices and triangles, a skeleton, definitions with micro-chunks,
//! and a sprinkling of unknown chunks that go through the hex capture path).

use chunkdump::decoders::definition::FLAVOR_OBJECT;
use chunkdump::decoders::*;
use chunkdump::{export_text, parse, ChunkWriter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MESHES: usize = 64;
const VERTS_PER_MESH: usize = 256;

fn mesh(w: &mut ChunkWriter, index: usize) {
    w.begin_chunk(MESH);
    w.begin_chunk(VERTICES);
    for v in 0..VERTS_PER_MESH {
        let x = v as f32;
        w.f32(x).f32(x * 0.5).f32(-x);
    }
    w.end_chunk();
    w.begin_chunk(TRIANGLES);
    for t in 0..VERTS_PER_MESH / 3 {
        let base = (t * 3) as u32;
        w.u32(base).u32(base + 1).u32(base + 2).u32(0);
        w.f32(0.0).f32(0.0).f32(1.0).f32(0.0);
    }
    w.end_chunk();
    w.chunk(0x00DE_0000 | index as u32, &[0xAB; 48]);
    w.end_chunk();
}

fn definition(w: &mut ChunkWriter, index: usize) {
    w.begin_chunk(DEFINITION);
    w.begin_chunk(DEFINITION_HEADER);
    w.u32(FLAVOR_OBJECT).u32(index as u32).fixed_str("Unit", 32);
    w.end_chunk();
    w.begin_chunk(DEFINITION_VARIABLES);
    w.micro(0x01, b"unit.mdl\0");
    w.micro(0x02, &250.0f32.to_le_bytes());
    w.micro(0x03, &1i32.to_le_bytes());
    w.micro(0x04, &1u32.to_le_bytes());
    w.end_chunk();
    w.end_chunk();
}

fn build_file() -> Vec<u8> {
    let mut w = ChunkWriter::new();
    for i in 0..MESHES {
        mesh(&mut w, i);
        definition(&mut w, i);
    }
    w.begin_chunk(HIERARCHY);
    w.begin_chunk(PIVOTS);
    for _ in 0..32 {
        w.fixed_str("Bone", NAME_LEN).u32(0);
        for v in [0.0f32, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0] {
            w.f32(v);
        }
    }
    w.end_chunk();
    w.end_chunk();
    w.into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let bytes = build_file();
    let warm = parse(&bytes);
    eprintln!(
        "parse: {} bytes, {} nodes, {} diagnostics (one warm-up pass)",
        bytes.len(),
        warm.root.node_count(),
        warm.diagnostics.len()
    );

    c.bench_function("parse_synthetic", |b| {
        b.iter(|| black_box(parse(black_box(&bytes))));
    });

    c.bench_function("export_text_synthetic", |b| {
        b.iter(|| black_box(export_text(black_box(&warm.root))));
    });

    c.bench_function("parse_export_synthetic", |b| {
        b.iter(|| {
            let result = parse(black_box(&bytes));
            black_box(export_text(&result.root).len())
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
