//! The paging core.
//!
//! # Components
//! - [`FrameDirectory`] - per-frame metadata and the intrusive eviction lists
//! - [`PageTable`] - page-to-frame mappings plus the physical memory
//! - [`replacer`] - the four replacement policies
//! - [`PagingEngine`] - fault dispatcher and eviction primitive
//! - [`Vm`] - the driver that delivers faults synchronously on access
//! - [`PagingStats`] - fault/read/write/eviction counters

pub mod directory;
mod engine;
mod machine;
mod page_table;
pub mod replacer;
mod stats;

pub use directory::{Frame, FrameDirectory, FrameList, Membership, Protection};
pub use engine::PagingEngine;
pub use machine::Vm;
pub use page_table::{PageTable, PageTableEntry};
pub use replacer::{InsertOutcome, PolicyKind, Replacer, ScanPreference};
pub use stats::PagingStats;
