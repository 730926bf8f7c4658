//! Page-replacement policy implementations (replacers).
//!
//! One module per discipline:
//! - [`RandomReplacer`] - uniform victim over all frames
//! - [`FifoReplacer`] - strict insertion-order eviction
//! - [`TwoFifoReplacer`] - segmented second-chance ("2fifo")
//! - [`CleanFirstReplacer`] - FIFO with a bounded clean-preferring scan
//!
//! A replacer only *selects* victims and maintains its structures; the
//! paging engine owns the page-table and disk effects. Insertions can ripple
//! (a 2fifo demotion or overflow), so they return an [`InsertOutcome`] the
//! engine applies.

mod clean_first;
mod fifo;
mod random;
mod two_fifo;

pub use clean_first::{CleanFirstReplacer, ScanPreference};
pub use fifo::FifoReplacer;
pub use random::RandomReplacer;
pub use two_fifo::TwoFifoReplacer;

use std::fmt;
use std::str::FromStr;

use crate::common::FrameId;
use crate::vm::directory::FrameDirectory;

/// Structure-side effects of an insertion, applied by the engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Frame demoted into second-chance: its read permission must be
    /// revoked in the directory and page table. Content untouched.
    pub demoted: Option<FrameId>,
    /// Frame pushed out of second-chance: a true eviction is due.
    pub overflow: Option<FrameId>,
}

/// Which replacement discipline is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Fifo,
    TwoFifo,
    CleanFirst,
}

impl FromStr for PolicyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "rand" => Ok(PolicyKind::Random),
            "fifo" => Ok(PolicyKind::Fifo),
            "2fifo" => Ok(PolicyKind::TwoFifo),
            "custom" => Ok(PolicyKind::CleanFirst),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Random => "rand",
            PolicyKind::Fifo => "fifo",
            PolicyKind::TwoFifo => "2fifo",
            PolicyKind::CleanFirst => "custom",
        };
        write!(f, "{name}")
    }
}

/// The active policy, as a closed strategy type.
///
/// All variants share one surface: `take_victim` (select and unlink),
/// `note_loaded` (structure insertion after a load) and `promote`
/// (second-chance bump back; a no-op elsewhere).
pub enum Replacer {
    Random(RandomReplacer),
    Fifo(FifoReplacer),
    TwoFifo(TwoFifoReplacer),
    CleanFirst(CleanFirstReplacer),
}

impl Replacer {
    /// Build the replacer for a policy, sized to the frame count.
    pub fn new(kind: PolicyKind, nframes: usize) -> Self {
        match kind {
            PolicyKind::Random => Replacer::Random(RandomReplacer::new()),
            PolicyKind::Fifo => Replacer::Fifo(FifoReplacer::new()),
            PolicyKind::TwoFifo => Replacer::TwoFifo(TwoFifoReplacer::new(nframes)),
            PolicyKind::CleanFirst => {
                Replacer::CleanFirst(CleanFirstReplacer::new(ScanPreference::default()))
            }
        }
    }

    /// Which discipline this replacer implements.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Replacer::Random(_) => PolicyKind::Random,
            Replacer::Fifo(_) => PolicyKind::Fifo,
            Replacer::TwoFifo(_) => PolicyKind::TwoFifo,
            Replacer::CleanFirst(_) => PolicyKind::CleanFirst,
        }
    }

    /// Select a victim frame and unlink it from the policy's structure.
    ///
    /// Called only when no free frame exists. `None` means the structure
    /// was unexpectedly empty (a structural invariant violation logged by
    /// the policy).
    pub fn take_victim(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        match self {
            Replacer::Random(r) => r.take_victim(dir),
            Replacer::Fifo(r) => r.take_victim(dir),
            Replacer::TwoFifo(r) => r.take_victim(dir),
            Replacer::CleanFirst(r) => r.take_victim(dir),
        }
    }

    /// Record that a freshly loaded page now occupies `frame`.
    pub fn note_loaded(&mut self, dir: &mut FrameDirectory, frame: FrameId) -> InsertOutcome {
        match self {
            Replacer::Random(r) => r.note_loaded(dir, frame),
            Replacer::Fifo(r) => r.note_loaded(dir, frame),
            Replacer::TwoFifo(r) => r.insert(dir, frame),
            Replacer::CleanFirst(r) => r.note_loaded(dir, frame),
        }
    }

    /// Restore a parked second-chance frame to first-chance.
    ///
    /// Only meaningful for 2fifo; other policies never park frames, so this
    /// is a no-op for them.
    pub fn promote(&mut self, dir: &mut FrameDirectory, frame: FrameId) -> InsertOutcome {
        match self {
            Replacer::TwoFifo(r) => r.promote(dir, frame),
            _ => InsertOutcome::default(),
        }
    }
}
