use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{available_end_times, available_start_times, normalize, OccupiedEntry, TimeOfDay};

fn busy_day() -> Vec<slot_engine::OccupiedInterval> {
    let entries: Vec<OccupiedEntry> = (0..24)
        .step_by(2)
        .map(|h| OccupiedEntry::pair(format!("{:02}:10:00", h), format!("{:02}:50:00", h)))
        .collect();
    normalize(&entries)
}

fn bench_slots(c: &mut Criterion) {
    let occupied = busy_day();
    let empty: Vec<slot_engine::OccupiedInterval> = Vec::new();
    let start: TimeOfDay = "01:00".parse().unwrap();

    c.bench_function("start_times_busy_day", |b| {
        b.iter(|| available_start_times(std::hint::black_box(&occupied)))
    });
    c.bench_function("end_times_busy_day", |b| {
        b.iter(|| available_end_times(start, std::hint::black_box(&occupied)))
    });
    c.bench_function("start_times_empty_day", |b| {
        b.iter(|| available_start_times(std::hint::black_box(&empty)))
    });
}

criterion_group!(benches, bench_slots);
criterion_main!(benches);
