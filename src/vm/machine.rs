//! The virtual machine driver.
//!
//! [`Vm`] couples the page table and the paging engine and exposes the byte
//! read/write interface the workloads run against. Every access checks the
//! page-table entry; an insufficient protection delivers a synchronous
//! fault to the engine and retries, exactly like the callback the real
//! substrate would raise.

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, FrameId, PageId, Result};
use crate::storage::VirtualDisk;
use crate::vm::engine::PagingEngine;
use crate::vm::page_table::PageTable;
use crate::vm::replacer::{PolicyKind, Replacer};
use crate::vm::stats::PagingStats;

/// A cold write needs two faults (load, then upgrade); anything beyond
/// that means a handler returned without resolving the fault.
const FAULT_RETRY_LIMIT: usize = 3;

/// A simulated machine: virtual address range, page table, paging engine.
pub struct Vm {
    pt: PageTable,
    engine: PagingEngine,
}

impl Vm {
    /// Build a machine with the given policy over a backing store.
    ///
    /// # Errors
    /// Rejects zero/mismatched page and frame counts, a backing store
    /// smaller than the address range, and 2fifo with fewer than 2 frames
    /// (its first-chance list would have zero capacity).
    pub fn new(npages: usize, nframes: usize, policy: PolicyKind, disk: VirtualDisk) -> Result<Self> {
        if policy == PolicyKind::TwoFifo && nframes < 2 {
            return Err(Error::InvalidConfig(
                "2fifo needs at least 2 frames".into(),
            ));
        }
        let pt = PageTable::new(npages, nframes)?;
        if (disk.nblocks() as usize) < npages {
            return Err(Error::InvalidConfig(format!(
                "backing store has {} blocks for {npages} pages",
                disk.nblocks()
            )));
        }

        let replacer = Replacer::new(policy, nframes);
        Ok(Self::with_replacer(pt, replacer, disk))
    }

    /// Build a machine with an explicitly constructed replacer (seeded
    /// random, alternate scan preference).
    pub fn with_replacer(pt: PageTable, replacer: Replacer, disk: VirtualDisk) -> Self {
        let engine = PagingEngine::new(pt.npages(), pt.nframes(), replacer, disk);
        Self { pt, engine }
    }

    /// Size of the virtual address range in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.pt.size_bytes()
    }

    /// Current paging statistics.
    pub fn stats(&self) -> PagingStats {
        *self.engine.stats()
    }

    /// The paging engine (read-only, for inspection).
    pub fn engine(&self) -> &PagingEngine {
        &self.engine
    }

    /// Read one byte of virtual memory, faulting as needed.
    pub fn read(&mut self, addr: usize) -> Result<u8> {
        let page = self.page_of(addr)?;
        let frame = self.ensure(page, false)?;
        Ok(self.pt.frame_data(frame)[addr % PAGE_SIZE])
    }

    /// Write one byte of virtual memory, faulting as needed.
    pub fn write(&mut self, addr: usize, byte: u8) -> Result<()> {
        let page = self.page_of(addr)?;
        let frame = self.ensure(page, true)?;
        self.pt.frame_data_mut(frame)[addr % PAGE_SIZE] = byte;
        Ok(())
    }

    fn page_of(&self, addr: usize) -> Result<PageId> {
        if addr >= self.pt.size_bytes() {
            return Err(Error::AddressOutOfRange(addr));
        }
        Ok(PageId::new((addr / PAGE_SIZE) as u32))
    }

    /// Fault until the page is accessible, with a bounded retry count.
    fn ensure(&mut self, page: PageId, write: bool) -> Result<FrameId> {
        for _ in 0..FAULT_RETRY_LIMIT {
            let entry = self.pt.get_entry(page);
            let satisfied = if write {
                entry.protection.can_write()
            } else {
                entry.protection.can_read()
            };
            if satisfied {
                return entry.frame.ok_or(Error::UnresolvedFault(page.0));
            }
            self.engine.handle_fault(&mut self.pt, page)?;
        }
        Err(Error::UnresolvedFault(page.0))
    }
}
