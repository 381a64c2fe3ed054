//! Benchmark for the per-tick pipeline.
//!
//! Run with: cargo bench --package quarry --bench tick_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quarry::config::Dimensions;
use quarry::{
    collision, BlockKind, BlockPos, BlockQuery, BlockTable, CharacterSim, Control, EventBus,
    GridWorld, InputSnapshot, SimConfig, Vec3, FIXED_DT,
};

fn create_test_world() -> GridWorld {
    let mut world = GridWorld::new();
    world.fill(BlockPos::new(-32, 0, -32), BlockPos::new(32, 0, 32), BlockKind::Stone);
    world.fill(BlockPos::new(4, 1, -4), BlockPos::new(4, 3, 4), BlockKind::Cobblestone);
    world.fill(BlockPos::new(-8, 1, -8), BlockPos::new(-4, 2, -4), BlockKind::Water);
    world
}

fn benchmark_tick_walking(c: &mut Criterion) {
    let mut world = create_test_world();
    let bus = EventBus::new(4096);
    let receiver = bus.receiver();
    let mut sim = CharacterSim::new(SimConfig::default(), Vec3::new(0.5, 1.0, 0.5), bus.sender())
        .expect("default config is valid");
    let input = InputSnapshot::new().hold(Control::Forward).look(0.5, 0.0);

    c.bench_function("tick_walking", |b| {
        b.iter(|| {
            sim.tick(&mut world, black_box(&input), FIXED_DT);
            receiver.drain();
        });
    });
}

fn benchmark_tick_swimming(c: &mut Criterion) {
    let mut world = create_test_world();
    let bus = EventBus::new(4096);
    let receiver = bus.receiver();
    let mut sim = CharacterSim::new(SimConfig::default(), Vec3::new(-6.5, 1.0, -6.5), bus.sender())
        .expect("default config is valid");
    let input = InputSnapshot::new().hold(Control::Dive);

    c.bench_function("tick_swimming", |b| {
        b.iter(|| {
            sim.tick(&mut world, black_box(&input), FIXED_DT);
            receiver.drain();
        });
    });
}

fn benchmark_resolve_fast_fall(c: &mut Criterion) {
    let world = create_test_world();
    let blocks = BlockTable::standard();
    let query = BlockQuery::new(&world, &blocks);
    let dims = Dimensions::default();

    c.bench_function("resolve_fast_fall", |b| {
        b.iter(|| {
            black_box(collision::resolve(
                &query,
                black_box(Vec3::new(0.5, 3.0, 0.5)),
                black_box(Vec3::new(0.5, 0.2, 0.5)),
                &dims,
            ))
        });
    });
}

criterion_group!(
    benches,
    benchmark_tick_walking,
    benchmark_tick_swimming,
    benchmark_resolve_fast_fall
);
criterion_main!(benches);
