//! Focus workload.
//!
//! Picks a random focus point and hammers the bytes around it, with the
//! occasional far jump, then moves the focus elsewhere. High temporal
//! locality with bursts of churn: the pattern second-chance parole is
//! designed to absorb.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::common::config::PAGE_SIZE;
use crate::common::Result;
use crate::vm::Vm;
use crate::workload::checksum_region;

const FOCUS_SEED: u64 = 0x46_4F_43; // fixed so runs are reproducible

/// Distinct focus points visited.
const ROUNDS: usize = 25;
/// Accesses per focus point.
const ACCESSES_PER_ROUND: usize = 1500;

/// Run the focus workload.
pub fn run(vm: &mut Vm) -> Result<u32> {
    let size = vm.size_bytes();
    let mut rng = StdRng::seed_from_u64(FOCUS_SEED);

    for _ in 0..ROUNDS {
        let focus = rng.gen_range(0..size);

        for _ in 0..ACCESSES_PER_ROUND {
            // 9 in 10 accesses stay within a page of the focus point.
            let addr = if rng.gen_ratio(9, 10) {
                (focus + rng.gen_range(0..PAGE_SIZE)) % size
            } else {
                rng.gen_range(0..size)
            };

            if rng.gen_bool(0.5) {
                vm.write(addr, rng.gen())?;
            } else {
                vm.read(addr)?;
            }
        }
    }

    let checksum = checksum_region(vm)?;
    info!(checksum, size, "focus complete");
    Ok(checksum)
}
