use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use mpcorb_processor::app::services::mpcorb_parser::{decode_packed_date, resolve_packed_designation};
use mpcorb_processor::{MpcOrbParser, decode_record};

const CERES_LINE: &str = "00001    3.34  0.12 K13B4  10.55761   72.29213   80.32762   10.59398  0.0757973  0.21415869   2.7668073  0 MPO286777  6502 105 1802-2014 0.82 M-v 30h MPCLINUX   0000      (1) Ceres              20140307";
const T3S5154_LINE: &str = "T3S5154 17.1   0.15 J77AO  17.78418  247.82110  104.38071    9.61380  0.2757131  0.18128053   3.0919701    MPC 12559     8   1    6 days              Bardwell   2000          5154 T-3           19771017";

/// Single record decode, both record shapes
fn bench_decode_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_record");
    group.throughput(Throughput::Elements(1));

    group.bench_function("multi_opposition", |b| {
        b.iter(|| decode_record(black_box(CERES_LINE)))
    });
    group.bench_function("single_opposition", |b| {
        b.iter(|| decode_record(black_box(T3S5154_LINE)))
    });

    group.finish();
}

/// Packed column decoders in isolation
fn bench_packed(c: &mut Criterion) {
    c.bench_function("packed/designation", |b| {
        b.iter(|| resolve_packed_designation(black_box("J95X45A")))
    });
    c.bench_function("packed/epoch", |b| {
        b.iter(|| decode_packed_date(black_box("K13B4")))
    });
}

/// Whole-catalog parse from memory
fn bench_parse_catalog(c: &mut Criterion) {
    let records = 10_000usize;
    let mut catalog = String::with_capacity(records * 204);
    for i in 0..records {
        catalog.push_str(if i % 5 == 0 { T3S5154_LINE } else { CERES_LINE });
        catalog.push('\n');
    }

    let parser = MpcOrbParser::default();
    let mut group = c.benchmark_group("parse_catalog");
    group.throughput(Throughput::Elements(records as u64));
    group.bench_function("10k_records", |b| {
        b.iter_batched(
            || catalog.clone(),
            |text| parser.parse_str(&text),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_decode_record, bench_packed, bench_parse_catalog);
criterion_main!(benches);
