//! String and byte primitive benchmarks, against host libc where it has a counterpart.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use phixlibc_bench::{c_string, token_line};
use phixlibc_core::string::{self, Tokenizer};

fn bench_strlen(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 64, 256, 1024, 4096];
    let mut group = c.benchmark_group("strlen");

    for &size in sizes {
        let s = c_string(size, b'A');
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("phixlibc", size), &s, |b, s| {
            b.iter(|| black_box(string::strlen(black_box(s))));
        });
        group.bench_with_input(BenchmarkId::new("host_libc", size), &s, |b, s| {
            b.iter(|| {
                // SAFETY: `s` is NUL-terminated.
                black_box(unsafe { libc::strlen(black_box(s.as_ptr()).cast()) })
            });
        });
    }
    group.finish();
}

fn bench_memcmp(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 256, 4096];
    let mut group = c.benchmark_group("memcmp");

    for &size in sizes {
        let a = vec![0x5Au8; size];
        let mut bytes = a.clone();
        bytes[size - 1] = 0x5B;
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("phixlibc", size), &size, |b, &n| {
            b.iter(|| black_box(string::memcmp(black_box(&a), black_box(&bytes), n)));
        });
        group.bench_with_input(BenchmarkId::new("host_libc", size), &size, |b, &n| {
            b.iter(|| {
                // SAFETY: both buffers hold `n` bytes.
                black_box(unsafe {
                    libc::memcmp(black_box(a.as_ptr()).cast(), bytes.as_ptr().cast(), n)
                })
            });
        });
    }
    group.finish();
}

fn bench_tokenizer(c: &mut Criterion) {
    let word_counts: &[usize] = &[4, 32, 256];
    let mut group = c.benchmark_group("strtok");

    for &words in word_counts {
        let line = token_line(words);
        group.throughput(Throughput::Bytes(line.len() as u64));

        group.bench_with_input(BenchmarkId::new("tokenizer", words), &line, |b, line| {
            b.iter_batched_ref(
                || line.clone(),
                |buf| black_box(Tokenizer::new(buf).tokens(b" ,").count()),
                criterion::BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("strtok_r", words), &line, |b, line| {
            b.iter_batched_ref(
                || line.clone(),
                |buf| {
                    let mut save = 0;
                    let mut count = 0;
                    while let Some((_, _, next)) = string::strtok_r(buf, b" ,", save) {
                        save = next;
                        count += 1;
                    }
                    black_box(count)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strlen, bench_memcmp, bench_tokenizer);
criterion_main!(benches);
