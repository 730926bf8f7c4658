//! Paging statistics tracking.
//!
//! Plain counters: the engine is strictly single-threaded, so there is
//! nothing to synchronize. Mutated only by the fault dispatcher and the
//! eviction primitive, read-only everywhere else.

use std::fmt;

/// Process-lifetime paging counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingStats {
    /// Total faults delivered, first-access and write-upgrade alike.
    pub page_faults: u64,
    /// Blocks read from the backing store.
    pub disk_reads: u64,
    /// Dirty-page write-backs to the backing store.
    pub disk_writes: u64,
    /// Pages removed from their frame (write-back or not).
    pub evictions: u64,
}

impl PagingStats {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for PagingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Page faults = {}", self.page_faults)?;
        writeln!(f, "Disk reads  = {}", self.disk_reads)?;
        writeln!(f, "Disk writes = {}", self.disk_writes)?;
        write!(f, "Evictions   = {}", self.evictions)
    }
}
