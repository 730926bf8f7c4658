//! FIFO (First-In-First-Out) replacement policy.
//!
//! Evicts pages in the order their frames became resident. Backed by a
//! single intrusive [`FrameList`] with the `Fifo` membership tag.

use tracing::warn;

use crate::common::FrameId;
use crate::vm::directory::{FrameDirectory, FrameList, Membership};
use crate::vm::replacer::InsertOutcome;

/// Strict insertion-order eviction.
pub struct FifoReplacer {
    /// Head = oldest resident, tail = newest.
    queue: FrameList,
}

impl FifoReplacer {
    /// Create an empty FIFO replacer.
    pub fn new() -> Self {
        Self {
            queue: FrameList::new(Membership::Fifo),
        }
    }

    /// Remove and return the oldest-inserted frame.
    pub fn take_victim(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        let victim = self.queue.pop_front(dir);
        if victim.is_none() {
            warn!("fifo eviction requested but the queue is empty");
        }
        victim
    }

    /// Append a newly resident frame at the tail.
    ///
    /// Re-insertion of a frame already queued should not happen given the
    /// eviction semantics; it is kept visible as a logged no-op.
    pub fn note_loaded(&mut self, dir: &mut FrameDirectory, frame: FrameId) -> InsertOutcome {
        if self.queue.contains(dir, frame) {
            warn!(frame = %frame, "frame already in the fifo queue, ignoring re-insert");
            return InsertOutcome::default();
        }
        self.queue.push_back(dir, frame);
        InsertOutcome::default()
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for FifoReplacer {
    fn default() -> Self {
        Self::new()
    }
}
