//! Configuration constants for the simulator.

/// Size of a page (and a physical frame) in bytes (4KB).
///
/// This value is chosen to match:
/// - OS page size on most systems (4096 bytes)
/// - The block size of the simulated backing store (one block per page)
pub const PAGE_SIZE: usize = 4096;
