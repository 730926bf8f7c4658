//! Synthetic workloads driving the paging core.
//!
//! Each generator performs a fixed, seeded sequence of reads and writes
//! over the whole virtual range and returns a crc32 checksum of the final
//! contents, so identical configurations are comparable across runs and
//! policies.

pub mod focus;
pub mod scan;
pub mod sort;

use std::fmt;
use std::str::FromStr;

use crate::common::Result;
use crate::vm::Vm;

/// Which access-pattern generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Sort,
    Scan,
    Focus,
}

impl WorkloadKind {
    /// Run the workload over the machine, returning the final checksum.
    pub fn run(self, vm: &mut Vm) -> Result<u32> {
        match self {
            WorkloadKind::Sort => sort::run(vm),
            WorkloadKind::Scan => scan::run(vm),
            WorkloadKind::Focus => focus::run(vm),
        }
    }
}

impl FromStr for WorkloadKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "sort" => Ok(WorkloadKind::Sort),
            "scan" => Ok(WorkloadKind::Scan),
            "focus" => Ok(WorkloadKind::Focus),
            _ => Err(()),
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkloadKind::Sort => "sort",
            WorkloadKind::Scan => "scan",
            WorkloadKind::Focus => "focus",
        };
        write!(f, "{name}")
    }
}

/// Checksum the whole virtual range through the paged interface.
pub(crate) fn checksum_region(vm: &mut Vm) -> Result<u32> {
    let mut hasher = crc32fast::Hasher::new();
    for addr in 0..vm.size_bytes() {
        hasher.update(&[vm.read(addr)?]);
    }
    Ok(hasher.finalize())
}
