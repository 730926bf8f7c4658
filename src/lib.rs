//! virtmem - a demand-paged virtual memory simulator with swappable
//! page-replacement policies.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          virtmem                              │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │           Workloads (workload/)                        │   │
//! │  │            sort  |  scan  |  focus                     │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! │                            ↓ byte reads/writes                │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │           Vm driver + PageTable (vm/)                  │   │
//! │  │     access check → synchronous fault → retry           │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! │                            ↓ faults                           │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │       PagingEngine (vm/)  [Runtime Swappable]          │   │
//! │  │   ┌──────────────────────────────────────────────┐    │   │
//! │  │   │ Policies: rand | fifo | 2fifo | custom       │    │   │
//! │  │   └──────────────────────────────────────────────┘    │   │
//! │  │     FrameDirectory + intrusive lists + Statistics      │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! │                            ↓ block I/O                        │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │           Backing store (storage/)                     │   │
//! │  │          VirtualDisk, one block per page               │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`vm`] - Page table, frame directory, replacers, fault engine
//! - [`storage`] - The simulated backing store
//! - [`workload`] - Synthetic access-pattern generators
//!
//! # Quick Start
//! ```no_run
//! use virtmem::storage::VirtualDisk;
//! use virtmem::vm::{PolicyKind, Vm};
//! use virtmem::workload::WorkloadKind;
//!
//! let disk = VirtualDisk::open("myvirtualdisk", 100).unwrap();
//! let mut vm = Vm::new(100, 10, PolicyKind::TwoFifo, disk).unwrap();
//! WorkloadKind::Scan.run(&mut vm).unwrap();
//! println!("{}", vm.stats());
//! ```

pub mod common;
pub mod storage;
pub mod vm;
pub mod workload;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, FrameId, PageId, Result};

pub use storage::VirtualDisk;
pub use vm::{PagingEngine, PagingStats, PolicyKind, Vm};
pub use workload::WorkloadKind;
