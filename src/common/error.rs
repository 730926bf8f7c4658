//! Error types for the simulator.

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the simulator.
///
/// Configuration problems are rejected before any paging state exists;
/// everything else escalates out of the run (no retries, per the
/// synchronous fault model).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from backing-store operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested block does not exist on the backing store.
    #[error("block {block} out of range (backing store has {nblocks} blocks)")]
    BlockOutOfRange { block: u32, nblocks: u32 },

    /// A virtual page number outside the configured address range.
    #[error("page {0} out of range")]
    PageOutOfRange(u32),

    /// A byte address outside the mapped virtual region.
    #[error("address {0:#x} out of range")]
    AddressOutOfRange(usize),

    /// A fault handler returned without resolving the fault.
    ///
    /// This indicates a defective handler (e.g. the defensive
    /// full-permissions branch fired); access retries are bounded so the
    /// defect surfaces here instead of livelocking.
    #[error("page fault on {0} was not resolved by the handler")]
    UnresolvedFault(u32),

    /// Invalid simulator configuration (zero pages or frames).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
