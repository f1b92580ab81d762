//! Formatter and numeric converter benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use phixlibc_bench::NullSink;
use phixlibc_core::CompatLevel;
use phixlibc_core::stdio::{FormatArg, format};
use phixlibc_core::stdlib::{NumBuf, decimal_to_int};

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let cases: &[(&str, &[u8], &[FormatArg<'static>])] = &[
        ("literal", b"kernel booted, entering shell\n", &[]),
        ("decimal", b"pid %d exited with %d\n", &[FormatArg::Int(42), FormatArg::Int(-1)]),
        (
            "mixed",
            b"%s: page %p flags %d %c\n",
            &[
                FormatArg::Str(b"vmm"),
                FormatArg::Unsigned(0x0010_2000),
                FormatArg::Int(3),
                FormatArg::Char(b'!'),
            ],
        ),
    ];

    for &(name, fmt, args) in cases {
        group.bench_with_input(BenchmarkId::new("format", name), &(fmt, args), |b, &(fmt, args)| {
            b.iter(|| {
                let mut sink = NullSink::default();
                black_box(format(&mut sink, black_box(fmt), args, CompatLevel::Strict))
            });
        });
    }
    group.finish();
}

fn bench_converters(c: &mut Criterion) {
    let mut group = c.benchmark_group("converters");
    let values: &[i32] = &[0, 7, -12_345, i32::MAX, i32::MIN];

    group.bench_function("int_to_decimal", |b| {
        let mut num = NumBuf::new();
        b.iter(|| {
            for &v in values {
                black_box(num.format_decimal(black_box(v)).len());
            }
        });
    });
    group.bench_function("unsigned_to_hex", |b| {
        let mut num = NumBuf::new();
        b.iter(|| {
            for &v in values {
                black_box(num.format_hex(black_box(v as u32), CompatLevel::Strict).len());
            }
        });
    });

    let texts: &[&[u8]] = &[b"0\0", b"42\0", b"-2147483648\0", b"12x\0"];
    for level in [CompatLevel::Strict, CompatLevel::Reference] {
        group.bench_function(BenchmarkId::new("decimal_to_int", level.as_str()), |b| {
            b.iter(|| {
                for &t in texts {
                    black_box(decimal_to_int(black_box(t), level));
                }
            });
        });
    }
    group.bench_function("host_atoi", |b| {
        b.iter(|| {
            for &t in texts {
                // SAFETY: every text is NUL-terminated.
                black_box(unsafe { libc::atoi(black_box(t.as_ptr()).cast()) });
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_format, bench_converters);
criterion_main!(benches);
