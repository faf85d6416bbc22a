//! Benchmarks for the per-frame hot path
//!
//! Measures, per packet kind:
//! - fixed-layout decoding of a full-length frame
//! - flattening the decoded record under both key schemes
//! - gating a flattened frame against a warm throttle gate
//!
//! Platform: Cross-platform (synthetic frames, CI-safe)

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use f1_telem_bridge::PacketKind;
use f1_telem_bridge::gate::{ThrottleGate, ZeroPolicy};
use f1_telem_bridge::packets::Packet;
use f1_telem_bridge::test_utils::FrameBuilder;
use f1_telem_bridge::walker::{KeyScheme, collect};
use std::hint::black_box;
use std::time::{Duration, Instant};

const KINDS: [PacketKind; 4] =
    [PacketKind::Motion, PacketKind::CarTelemetry, PacketKind::CarStatus, PacketKind::SessionHistory];

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for kind in KINDS {
        let frame = FrameBuilder::new(kind).player_car_index(5).build();
        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_function(kind.name(), |b| b.iter(|| Packet::decode(black_box(&frame))));
    }
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    for kind in KINDS {
        let Ok(packet) = Packet::decode(&FrameBuilder::new(kind).build()) else {
            continue;
        };
        group.bench_function(format!("{}/path", kind.name()), |b| {
            b.iter(|| collect(black_box(&packet), KeyScheme::Path(kind.name())))
        });
        group.bench_function(format!("{}/mnemonic", kind.name()), |b| {
            b.iter(|| collect(black_box(&packet), KeyScheme::Mnemonic))
        });
    }
    group.finish();
}

fn bench_gate(c: &mut Criterion) {
    let Ok(packet) = Packet::decode(&FrameBuilder::new(PacketKind::CarStatus).build()) else {
        return;
    };
    let fields = collect(&packet, KeyScheme::Path("CarStatus"));
    let interval = Duration::from_millis(500);
    let mut gate = ThrottleGate::new();
    let t0 = Instant::now();
    for (key, value) in &fields {
        gate.admit(key, value, ZeroPolicy::Forward, interval, t0);
    }

    let mut group = c.benchmark_group("gate");
    group.throughput(Throughput::Elements(fields.len() as u64));
    group.bench_function("warm_car_status_frame", |b| {
        b.iter(|| {
            let mut admitted = 0;
            for (key, value) in &fields {
                if gate.admit(key, value, ZeroPolicy::Forward, interval, t0).is_admitted() {
                    admitted += 1;
                }
            }
            black_box(admitted)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_walk, bench_gate);
criterion_main!(benches);
