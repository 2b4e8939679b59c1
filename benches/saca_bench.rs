use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sacak_fm::rank::ByteRankMap;
use sacak_fm::Index;

fn generate_dna(size: usize, seed: u64) -> Vec<u8> {
    let alphabet = [b'A', b'C', b'G', b'T'];
    let mut state = seed;
    let mut text = Vec::with_capacity(size);
    while text.len() < size - 1 {
        // xorshift64, good enough for benchmark input generation
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        text.push(alphabet[(state % 4) as usize]);
    }
    text.push(b'$');
    text
}

fn phi() -> ByteRankMap {
    ByteRankMap::from_ordered_alphabet(b"$ACGT")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1_000, 10_000, 100_000, 1_000_000] {
        let text = generate_dna(size, 0x5EED ^ size as u64);
        group.bench_with_input(BenchmarkId::new("bytes", size), &text, |b, text| {
            b.iter(|| Index::build(black_box(text), phi(), 16).unwrap())
        });
    }
    group.finish();
}

fn bench_lf_mapping(c: &mut Criterion) {
    let text = generate_dna(100_000, 0xF00D);
    let index = Index::build(&text, phi(), 16).unwrap();
    let n = index.len();

    c.bench_function("lf_mapping", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let c = index.bwt()[i as usize];
            let j = index.lf_mapping(black_box(i), black_box(c));
            i = (i + 1) % n;
            black_box(j)
        })
    });
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for sample_rate in [1u64, 4, 16, 64] {
        let text = generate_dna(100_000, 0xC0DE);
        let index = Index::build(&text, phi(), sample_rate).unwrap();
        let n = index.len();

        group.bench_with_input(BenchmarkId::new("sample_rate", sample_rate), &index, |b, index| {
            let mut i = 0u64;
            b.iter(|| {
                let pos = index.locate(black_box(i));
                i = (i + 1) % n;
                black_box(pos)
            })
        });
    }
    group.finish();
}

fn bench_save_load(c: &mut Criterion) {
    let text = generate_dna(500_000, 0xABCD);
    let index = Index::build(&text, phi(), 16).unwrap();

    c.bench_function("save", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            index.save(&mut buf).unwrap();
            black_box(buf)
        })
    });

    let mut buf = Vec::new();
    index.save(&mut buf).unwrap();
    c.bench_function("load", |b| {
        b.iter(|| {
            let mut cursor = &buf[..];
            black_box(Index::load(&mut cursor, phi()).unwrap())
        })
    });
}

criterion_group!(benches, bench_build, bench_lf_mapping, bench_locate, bench_save_load);
criterion_main!(benches);
