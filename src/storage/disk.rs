//! Virtual disk - the file-backed backing store for evicted pages.
//!
//! The [`VirtualDisk`] emulates a block device with one page-sized block
//! per virtual page. Evictions of dirty pages write here; loads read back.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result};

/// Emulates the backing store as a single flat file.
///
/// # File Layout
/// Blocks are laid out sequentially, one per virtual page:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┐
/// │ Block 0 │ Block 1 │  ...    │ Block N │
/// │ (4KB)   │ (4KB)   │         │ (4KB)   │
/// └─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      4096    ...    N×4096
/// ```
///
/// Block N is located at file offset `N × PAGE_SIZE`.
///
/// The file is sized up front so a block that was never written reads back
/// as zeros. Durability is not a goal for a simulated disk, so writes are
/// not fsynced.
pub struct VirtualDisk {
    file: File,
    /// Number of blocks on the store.
    nblocks: u32,
}

impl VirtualDisk {
    /// Open (creating or truncating) a backing store with `nblocks` blocks.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or sized.
    pub fn open<P: AsRef<Path>>(path: P, nblocks: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        file.set_len(nblocks as u64 * PAGE_SIZE as u64)?;

        Ok(Self { file, nblocks })
    }

    /// Read one block into `buf`.
    ///
    /// # Errors
    /// Returns `Error::BlockOutOfRange` if the block doesn't exist.
    ///
    /// # Panics
    /// Panics if `buf` is not exactly one page long.
    pub fn read_block(&mut self, block: PageId, buf: &mut [u8]) -> Result<()> {
        assert_eq!(buf.len(), PAGE_SIZE, "block buffer must be one page");
        self.check_block(block)?;

        let offset = (block.0 as u64) * (PAGE_SIZE as u64);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)?;

        Ok(())
    }

    /// Write one block from `buf`.
    ///
    /// # Errors
    /// Returns `Error::BlockOutOfRange` if the block doesn't exist.
    ///
    /// # Panics
    /// Panics if `buf` is not exactly one page long.
    pub fn write_block(&mut self, block: PageId, buf: &[u8]) -> Result<()> {
        assert_eq!(buf.len(), PAGE_SIZE, "block buffer must be one page");
        self.check_block(block)?;

        let offset = (block.0 as u64) * (PAGE_SIZE as u64);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(buf)?;

        Ok(())
    }

    /// Number of blocks on the store.
    #[inline]
    pub fn nblocks(&self) -> u32 {
        self.nblocks
    }

    fn check_block(&self, block: PageId) -> Result<()> {
        if block.0 >= self.nblocks {
            return Err(Error::BlockOutOfRange {
                block: block.0,
                nblocks: self.nblocks,
            });
        }
        Ok(())
    }
}
