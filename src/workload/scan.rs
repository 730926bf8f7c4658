//! Sequential scan workload.
//!
//! One full write pass, then repeated full read passes. Maximally friendly
//! to FIFO-style policies: the access order matches insertion order.

use tracing::info;

use crate::common::Result;
use crate::vm::Vm;
use crate::workload::checksum_region;

/// Read passes after the initial write pass.
const READ_PASSES: usize = 2;

/// Run the scan workload.
pub fn run(vm: &mut Vm) -> Result<u32> {
    let size = vm.size_bytes();

    for addr in 0..size {
        vm.write(addr, (addr % 251) as u8)?;
    }

    let mut checksum = 0;
    for _ in 0..READ_PASSES {
        checksum = checksum_region(vm)?;
    }

    info!(checksum, size, "scan complete");
    Ok(checksum)
}
