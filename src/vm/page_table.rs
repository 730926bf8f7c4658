//! Page table - maps virtual pages to physical frames.
//!
//! The [`PageTable`] owns the per-page entries and the physical memory
//! backing the frames. It is deliberately passive: the fault callback of
//! the paging engine is invoked by the [`Vm`](crate::vm::Vm) driver, which
//! consults the entries on every access.

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, FrameId, PageId, Result};
use crate::vm::directory::Protection;

/// One page-table entry: where the page lives and what access is granted.
///
/// `frame` stays set while a page is parked in second-chance (protection
/// `None` but content resident); a true eviction clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTableEntry {
    pub frame: Option<FrameId>,
    pub protection: Protection,
}

/// The page-table collaborator: entry array plus physical memory.
#[derive(Debug)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
    /// Physical memory, `nframes * PAGE_SIZE` bytes.
    physmem: Vec<u8>,
    npages: usize,
    nframes: usize,
}

impl PageTable {
    /// Create a page table for `npages` virtual pages over `nframes`
    /// physical frames.
    ///
    /// # Errors
    /// Rejects zero pages or frames, and more frames than pages (extra
    /// frames could never be used).
    pub fn new(npages: usize, nframes: usize) -> Result<Self> {
        if npages == 0 || nframes == 0 {
            return Err(Error::InvalidConfig(
                "page and frame counts must be positive".into(),
            ));
        }
        if nframes > npages {
            return Err(Error::InvalidConfig(format!(
                "{nframes} frames for {npages} pages; frames must not exceed pages"
            )));
        }

        Ok(Self {
            entries: vec![PageTableEntry::default(); npages],
            physmem: vec![0u8; nframes * PAGE_SIZE],
            npages,
            nframes,
        })
    }

    /// Current `(frame, protection)` for a page.
    #[inline]
    pub fn get_entry(&self, page: PageId) -> PageTableEntry {
        self.entries[page.index()]
    }

    /// Map `page` to `frame` with the given protection.
    #[inline]
    pub fn set_entry(&mut self, page: PageId, frame: FrameId, protection: Protection) {
        self.entries[page.index()] = PageTableEntry {
            frame: Some(frame),
            protection,
        };
    }

    /// Revoke the protection of a mapped page without unmapping it
    /// (second-chance parole).
    #[inline]
    pub fn revoke_protection(&mut self, page: PageId) {
        self.entries[page.index()].protection = Protection::None;
    }

    /// Unmap a page entirely (true eviction).
    #[inline]
    pub fn clear_entry(&mut self, page: PageId) {
        self.entries[page.index()] = PageTableEntry::default();
    }

    /// Number of virtual pages.
    #[inline]
    pub fn npages(&self) -> usize {
        self.npages
    }

    /// Number of physical frames.
    #[inline]
    pub fn nframes(&self) -> usize {
        self.nframes
    }

    /// Size of the virtual address range in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.npages * PAGE_SIZE
    }

    /// The physical memory backing one frame.
    #[inline]
    pub fn frame_data(&self, frame: FrameId) -> &[u8] {
        let start = frame.0 * PAGE_SIZE;
        &self.physmem[start..start + PAGE_SIZE]
    }

    /// Mutable access to the physical memory backing one frame.
    #[inline]
    pub fn frame_data_mut(&mut self, frame: FrameId) -> &mut [u8] {
        let start = frame.0 * PAGE_SIZE;
        &mut self.physmem[start..start + PAGE_SIZE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(PageTable::new(0, 1).is_err());
        assert!(PageTable::new(4, 0).is_err());
        assert!(PageTable::new(2, 4).is_err());
        assert!(PageTable::new(4, 4).is_ok());
    }

    #[test]
    fn test_entries_start_unmapped() {
        let pt = PageTable::new(4, 2).unwrap();
        for p in 0..4 {
            let entry = pt.get_entry(PageId::new(p));
            assert_eq!(entry.frame, None);
            assert_eq!(entry.protection, Protection::None);
        }
    }

    #[test]
    fn test_set_revoke_clear() {
        let mut pt = PageTable::new(4, 2).unwrap();
        let page = PageId::new(1);

        pt.set_entry(page, FrameId::new(0), Protection::Read);
        let entry = pt.get_entry(page);
        assert_eq!(entry.frame, Some(FrameId::new(0)));
        assert_eq!(entry.protection, Protection::Read);

        // Parole keeps the frame association.
        pt.revoke_protection(page);
        let entry = pt.get_entry(page);
        assert_eq!(entry.frame, Some(FrameId::new(0)));
        assert_eq!(entry.protection, Protection::None);

        // Eviction drops it.
        pt.clear_entry(page);
        assert_eq!(pt.get_entry(page).frame, None);
    }

    #[test]
    fn test_frame_data_slices() {
        let mut pt = PageTable::new(4, 2).unwrap();

        pt.frame_data_mut(FrameId::new(1))[0] = 0xAB;
        assert_eq!(pt.frame_data(FrameId::new(1))[0], 0xAB);
        assert_eq!(pt.frame_data(FrameId::new(0))[0], 0);
        assert_eq!(pt.frame_data(FrameId::new(1)).len(), PAGE_SIZE);
    }
}
