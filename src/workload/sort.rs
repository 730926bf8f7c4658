//! In-place sort workload.
//!
//! Fills the region with seeded pseudo-random `u32` values and quicksorts
//! them through the paged interface. Heavy on writes and on revisiting
//! distant pages, which is the stress case for clean-preferring eviction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::common::Result;
use crate::vm::Vm;
use crate::workload::checksum_region;

const FILL_SEED: u64 = 0x50_52_54; // fixed so runs are reproducible

/// Run the sort workload.
pub fn run(vm: &mut Vm) -> Result<u32> {
    let n = vm.size_bytes() / 4;
    let mut rng = StdRng::seed_from_u64(FILL_SEED);

    for i in 0..n {
        write_u32(vm, i, rng.gen())?;
    }

    quicksort(vm, n)?;

    let checksum = checksum_region(vm)?;
    info!(checksum, values = n, "sort complete");
    Ok(checksum)
}

fn read_u32(vm: &mut Vm, idx: usize) -> Result<u32> {
    let base = idx * 4;
    let mut bytes = [0u8; 4];
    for (k, b) in bytes.iter_mut().enumerate() {
        *b = vm.read(base + k)?;
    }
    Ok(u32::from_le_bytes(bytes))
}

fn write_u32(vm: &mut Vm, idx: usize, value: u32) -> Result<()> {
    let base = idx * 4;
    for (k, b) in value.to_le_bytes().iter().enumerate() {
        vm.write(base + k, *b)?;
    }
    Ok(())
}

fn swap(vm: &mut Vm, a: usize, b: usize) -> Result<()> {
    if a != b {
        let va = read_u32(vm, a)?;
        let vb = read_u32(vm, b)?;
        write_u32(vm, a, vb)?;
        write_u32(vm, b, va)?;
    }
    Ok(())
}

/// Iterative quicksort over `[0, n)`, Lomuto partition.
fn quicksort(vm: &mut Vm, n: usize) -> Result<()> {
    let mut ranges = vec![(0usize, n)];

    while let Some((lo, hi)) = ranges.pop() {
        if hi - lo < 2 {
            continue;
        }

        let pivot = read_u32(vm, hi - 1)?;
        let mut store = lo;
        for i in lo..hi - 1 {
            if read_u32(vm, i)? <= pivot {
                swap(vm, i, store)?;
                store += 1;
            }
        }
        swap(vm, store, hi - 1)?;

        ranges.push((lo, store));
        ranges.push((store + 1, hi));
    }

    Ok(())
}
