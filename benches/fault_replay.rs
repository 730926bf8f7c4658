//! Fault-path throughput: replay a full scan workload under each policy.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::tempdir;

use virtmem::storage::VirtualDisk;
use virtmem::vm::PolicyKind;
use virtmem::{Vm, WorkloadKind};

const NPAGES: usize = 64;
const NFRAMES: usize = 16;

fn scan_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_replay");
    for policy in [
        PolicyKind::Random,
        PolicyKind::Fifo,
        PolicyKind::TwoFifo,
        PolicyKind::CleanFirst,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &policy,
            |b, &policy| {
                let dir = tempdir().unwrap();
                b.iter(|| {
                    let disk =
                        VirtualDisk::open(dir.path().join("disk.img"), NPAGES as u32).unwrap();
                    let mut vm = Vm::new(NPAGES, NFRAMES, policy, disk).unwrap();
                    WorkloadKind::Scan.run(&mut vm).unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, scan_replay);
criterion_main!(benches);
