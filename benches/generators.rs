use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazes::{
    exporter::{self, CellSize, ExportOptionsBuilder},
    generators,
    random::seeded_source,
    units::{ColumnsCount, RowsCount},
};

fn bench_generate_maze_32(c: &mut Criterion) {
    let mut rng = seeded_source(32);
    c.bench_function("generate_maze_32", move |b| {
        b.iter(|| generators::generate(RowsCount(32), ColumnsCount(32), &mut rng))
    });
}

fn bench_generate_maze_256(c: &mut Criterion) {
    let mut rng = seeded_source(256);
    c.bench_function("generate_maze_256", move |b| {
        b.iter(|| generators::generate(RowsCount(256), ColumnsCount(256), &mut rng))
    });
}

fn bench_generate_corridor_65536(c: &mut Criterion) {
    let mut rng = seeded_source(1);
    c.bench_function("generate_corridor_65536", move |b| {
        b.iter(|| generators::generate(RowsCount(1), ColumnsCount(65_536), &mut rng))
    });
}

fn bench_export_maze_32(c: &mut Criterion) {
    let maze = generators::generate(RowsCount(32), ColumnsCount(32), &mut seeded_source(7))
        .expect("generation failed");
    let options = ExportOptionsBuilder::new(CellSize::new(40.0, 40.0).expect("invalid cell size")).build();
    c.bench_function("export_maze_32", move |b| {
        b.iter(|| exporter::export(black_box(&maze), &options))
    });
}

criterion_group!(
    benches,
    bench_generate_maze_32,
    bench_generate_maze_256,
    bench_generate_corridor_65536,
    bench_export_maze_32
);
criterion_main!(benches);
