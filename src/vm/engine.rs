//! Paging engine - the fault dispatcher and eviction primitive.
//!
//! The [`PagingEngine`] owns the frame directory, the active replacer, the
//! backing store, and the statistics. It is driven synchronously by the
//! [`Vm`](crate::vm::Vm) driver: one `handle_fault` call runs to completion
//! before the triggering access resumes.

use tracing::{debug, warn};

use crate::common::{FrameId, PageId, Result};
use crate::storage::VirtualDisk;
use crate::vm::directory::{FrameDirectory, Membership, Protection};
use crate::vm::page_table::PageTable;
use crate::vm::replacer::{InsertOutcome, Replacer};
use crate::vm::stats::PagingStats;

/// The page-fault handling core.
pub struct PagingEngine {
    directory: FrameDirectory,
    replacer: Replacer,
    disk: VirtualDisk,
    stats: PagingStats,
    /// Page count equals frame count: identity-map and skip the policy.
    direct_mapped: bool,
}

impl PagingEngine {
    /// Build an engine over `nframes` frames for an `npages` address range.
    pub fn new(npages: usize, nframes: usize, replacer: Replacer, disk: VirtualDisk) -> Self {
        Self {
            directory: FrameDirectory::new(nframes),
            replacer,
            disk,
            stats: PagingStats::new(),
            direct_mapped: npages == nframes,
        }
    }

    /// Current statistics.
    pub fn stats(&self) -> &PagingStats {
        &self.stats
    }

    /// The frame directory (read-only).
    pub fn directory(&self) -> &FrameDirectory {
        &self.directory
    }

    /// The active replacer (read-only).
    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    /// Handle a fault on `page`.
    ///
    /// Three mutually exclusive cases on the page's current protection:
    /// first access (load, possibly evicting), write upgrade (permission
    /// change only), and the defensive already-fully-permissioned branch.
    pub fn handle_fault(&mut self, pt: &mut PageTable, page: PageId) -> Result<()> {
        self.stats.page_faults += 1;

        // Direct mapping: every page has its own frame, nothing ever moves.
        if self.direct_mapped {
            let frame = FrameId::new(page.index());
            pt.set_entry(page, frame, Protection::ReadWrite);
            let entry = self.directory.frame_mut(frame);
            entry.resident_page = Some(page);
            entry.occupied = true;
            entry.protection = Protection::ReadWrite;
            entry.dirty = true;
            return Ok(());
        }

        let entry = pt.get_entry(page);
        match entry.protection {
            Protection::None => {
                // A parked second-chance page comes back without I/O.
                if let Some(frame) = entry.frame {
                    let known = self.directory.frame(frame);
                    if known.membership == Membership::SecondChance
                        && known.resident_page == Some(page)
                    {
                        return self.bump_back(pt, page, frame);
                    }
                }
                self.load_page(pt, page)
            }
            Protection::Read => self.upgrade_write(pt, page, entry.frame),
            Protection::ReadWrite => {
                warn!(%page, "fault on a page that already has full permissions");
                Ok(())
            }
        }
    }

    /// Evict a page from `frame`: write back if dirty, unmap, reset.
    ///
    /// Does not touch eviction structures; callers unlink the frame first
    /// (removal semantics differ per structure).
    pub fn evict(&mut self, pt: &mut PageTable, frame: FrameId) -> Result<()> {
        let entry = self.directory.frame(frame);
        if entry.membership != Membership::None {
            warn!(frame = %frame, membership = ?entry.membership,
                "evicting a frame still linked into a structure");
        }
        let resident = entry.resident_page;

        if entry.dirty {
            if let Some(page) = resident {
                self.disk.write_block(page, pt.frame_data(frame))?;
                self.stats.disk_writes += 1;
            }
        }
        if let Some(page) = resident {
            pt.clear_entry(page);
            debug!(%page, frame = %frame, "evicted");
        }

        self.directory.reset_frame(frame);
        self.stats.evictions += 1;
        Ok(())
    }

    /// First-access fault: acquire a frame, load the page, map it readable.
    fn load_page(&mut self, pt: &mut PageTable, page: PageId) -> Result<()> {
        let Some(frame) = self.acquire_frame(pt)? else {
            // Structure was empty with no free frame: the fault stays
            // formally unresolved (the driver bounds its retries).
            warn!(%page, "no frame could be acquired, fault unresolved");
            return Ok(());
        };

        self.disk.read_block(page, pt.frame_data_mut(frame))?;
        self.stats.disk_reads += 1;

        {
            let entry = self.directory.frame_mut(frame);
            entry.resident_page = Some(page);
            entry.occupied = true;
            entry.protection = Protection::Read;
            entry.dirty = false;
        }
        pt.set_entry(page, frame, Protection::Read);

        let outcome = self.replacer.note_loaded(&mut self.directory, frame);
        self.apply_outcome(pt, outcome)
    }

    /// Write-protection fault on a resident page: grant write, no I/O.
    fn upgrade_write(
        &mut self,
        pt: &mut PageTable,
        page: PageId,
        frame: Option<FrameId>,
    ) -> Result<()> {
        let Some(frame) = frame else {
            warn!(%page, "readable page has no frame mapping");
            return Ok(());
        };

        pt.set_entry(page, frame, Protection::ReadWrite);
        let entry = self.directory.frame_mut(frame);
        entry.protection = Protection::ReadWrite;
        entry.dirty = true;
        Ok(())
    }

    /// Second-chance bump back: restore the parked page to first-chance
    /// and re-grant read. No disk I/O, no eviction counted.
    fn bump_back(&mut self, pt: &mut PageTable, page: PageId, frame: FrameId) -> Result<()> {
        debug!(%page, frame = %frame, "bumping parked page back to first-chance");
        let outcome = self.replacer.promote(&mut self.directory, frame);

        self.directory.frame_mut(frame).protection = Protection::Read;
        pt.set_entry(page, frame, Protection::Read);

        self.apply_outcome(pt, outcome)
    }

    /// A free frame, or a policy-selected victim after evicting it.
    fn acquire_frame(&mut self, pt: &mut PageTable) -> Result<Option<FrameId>> {
        if let Some(free) = self.directory.find_free() {
            return Ok(Some(free));
        }

        match self.replacer.take_victim(&mut self.directory) {
            Some(victim) => {
                self.evict(pt, victim)?;
                Ok(Some(victim))
            }
            None => Ok(None),
        }
    }

    /// Apply the ripple effects of a structure insertion.
    fn apply_outcome(&mut self, pt: &mut PageTable, outcome: InsertOutcome) -> Result<()> {
        if let Some(frame) = outcome.demoted {
            // Parole: revoke read in both the directory and the page-table
            // mapping. Content and dirtiness are untouched.
            let entry = self.directory.frame_mut(frame);
            entry.protection = Protection::None;
            if let Some(page) = entry.resident_page {
                pt.revoke_protection(page);
                debug!(%page, frame = %frame, "demoted to second-chance");
            }
        }
        if let Some(frame) = outcome.overflow {
            self.evict(pt, frame)?;
        }
        Ok(())
    }
}
