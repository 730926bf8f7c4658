//! Backing-store emulation.
//!
//! One page-sized block per virtual page, block index = page number.

mod disk;

pub use disk::VirtualDisk;
