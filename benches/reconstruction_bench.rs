//! Reconstruction benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pileshot::*;

const EXTEND: usize = 50;
const READS: usize = 200;

fn deep_block() -> (Window, PileupBlock, MemoryReference) {
    let width = 2 * EXTEND + 1;
    let ruler: String = (0..width)
        .map(|idx| if idx % 17 == 5 { '*' } else { "ACGT".as_bytes()[idx % 4] as char })
        .collect();
    let mut rows = vec![" ".repeat(width), ruler.clone(), ruler.clone()];
    rows.extend((0..READS).map(|read| {
        ruler
            .chars()
            .enumerate()
            .map(|(idx, base)| match (base, (idx + read) % 23) {
                ('*', 0) => 'G',
                (_, 3) => ' ',
                (base, _) => base,
            })
            .collect::<String>()
    }));

    let window = Window::new("chr1", EXTEND as u64 + 1, EXTEND as u64).expect("valid window");
    let reference = MemoryReference::new().with_contig("chr1", "ACGT".repeat(width));
    (window, PileupBlock::new(rows), reference)
}

fn benchmark_reconstruction(c: &mut Criterion) {
    let (window, block, reference) = deep_block();

    for include in [false, true] {
        let assembler = PileupAssembler::new(
            PileupConfig::default()
                .with_extend(EXTEND as u64)
                .with_depth_cap(None)
                .with_insertion_columns(include),
        );
        let name = format!("assemble_{}x{}_insertions={}", 2 * EXTEND + 1, READS, include);
        c.bench_function(&name, |b| {
            b.iter(|| {
                black_box(
                    assembler
                        .assemble(&window, &block, &reference)
                        .expect("benchmark block is valid"),
                )
            });
        });
    }
}

criterion_group!(benches, benchmark_reconstruction);
criterion_main!(benches);
