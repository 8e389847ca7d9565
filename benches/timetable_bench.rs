//! Criterion benchmarks for timetable evaluation and search.
//!
//! Uses a synthetic week (five days of eight hourly slots) so the numbers
//! reflect engine overhead rather than store access.

use chrono::{NaiveTime, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::ga::{
    fitness_function, initialize_sessions, Candidate, EvolutionEngine, GaConfig, Operators,
};
use u_timetable::models::{ClassType, ClassroomId, DepartmentId, Subject, SubjectCatalog, SubjectId};
use u_timetable::random::create_rng;
use u_timetable::slots::{SlotPools, TimeSlotSplitter};
use u_timetable::store::{MemoryStore, SubjectSource};

fn week() -> (SubjectCatalog, SlotPools) {
    let mut store = MemoryStore::new();
    for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        store.add_window(day, start, end).unwrap();
    }
    for i in 0..12 {
        let mut subject = Subject::new(
            SubjectId(i + 1),
            format!("Subject {i}"),
            format!("S{i:03}"),
            DepartmentId(i % 3 + 1),
        )
        .with_hours(2 + i % 3);
        if i % 4 == 0 {
            subject = subject
                .with_hours(2)
                .with_class_type(ClassType::Practical)
                .with_classroom(ClassroomId(i + 1));
        }
        store.add_subject(subject).unwrap();
    }
    TimeSlotSplitter::default().split_pending(&mut store).unwrap();

    let catalog = SubjectCatalog::new(store.subjects().unwrap());
    let pools = SlotPools::load(&store).unwrap();
    (catalog, pools)
}

fn bench_fitness(c: &mut Criterion) {
    let (catalog, pools) = week();
    let mut rng = create_rng(42);
    let candidate = Candidate::new(
        initialize_sessions(&catalog, &mut pools.clone(), 40, &mut rng).unwrap(),
    );

    c.bench_function("fitness_40_sessions", |b| {
        b.iter(|| fitness_function(black_box(&candidate), black_box(&catalog)))
    });
}

fn bench_engine(c: &mut Criterion) {
    let (catalog, pools) = week();

    let mut group = c.benchmark_group("engine_week");
    group.sample_size(10);

    for &pop in &[20usize, 100] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(pop), &config, |b, config| {
            b.iter(|| {
                let engine = EvolutionEngine::new(config.clone(), Operators::standard());
                let mut pools = pools.clone();
                let mut rng = create_rng(42);
                engine.run_with_rng(&catalog, &mut pools, &mut rng).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fitness, bench_engine);
criterion_main!(benches);
