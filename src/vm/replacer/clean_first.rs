//! Hybrid clean-preferring replacement ("custom").
//!
//! Reuses the FIFO queue, but before evicting the head it scans a bounded
//! window from the oldest end looking for a clean frame, trading victim
//! optimality for bounded cost: evicting a clean page skips the write-back.
//! With no clean candidate in the window, it degrades to strict FIFO.

use tracing::warn;

use crate::common::FrameId;
use crate::vm::directory::{FrameDirectory, FrameList, Membership};
use crate::vm::replacer::InsertOutcome;

/// Numerator/denominator of the scan-window fraction: `5/6 * F` entries.
const SCAN_WINDOW_NUM: usize = 5;
const SCAN_WINDOW_DEN: usize = 6;

/// Which clean candidate inside the window wins.
///
/// The reference behavior keeps the *last* candidate encountered, which
/// contradicts the policy's prefer-the-oldest rationale and may be a defect
/// in the original; both orderings are supported rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPreference {
    /// Keep the last clean frame found (closest to the window's far end).
    /// Matches the reference behavior.
    #[default]
    KeepLast,
    /// Keep the first clean frame found (the oldest one).
    KeepFirst,
}

/// FIFO with a bounded-window clean-page scan.
pub struct CleanFirstReplacer {
    /// Head = oldest resident, tail = newest.
    queue: FrameList,
    preference: ScanPreference,
}

impl CleanFirstReplacer {
    /// Create a replacer with the given scan tie-break.
    pub fn new(preference: ScanPreference) -> Self {
        Self {
            queue: FrameList::new(Membership::Fifo),
            preference,
        }
    }

    /// Scan up to `5/6 * F` entries from the oldest end for a clean frame;
    /// fall back to the FIFO head if none qualifies.
    pub fn take_victim(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        let window = dir.len() * SCAN_WINDOW_NUM / SCAN_WINDOW_DEN;

        let mut candidate = None;
        for (seen, id) in self.queue.iter(dir).enumerate() {
            if seen >= window {
                break;
            }
            if !dir.frame(id).dirty {
                candidate = Some(id);
                if self.preference == ScanPreference::KeepFirst {
                    break;
                }
            }
        }

        match candidate {
            Some(id) => {
                self.queue.unlink(dir, id);
                Some(id)
            }
            None => {
                let victim = self.queue.pop_front(dir);
                if victim.is_none() {
                    warn!("clean-first eviction requested but the queue is empty");
                }
                victim
            }
        }
    }

    /// Append a newly resident frame at the tail (same guard as plain FIFO).
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

#[cfg(test)]
mod tests {
    use super::*;

    /// Queue frames 0..n and mark the given ones dirty.
    fn setup(
        n: usize,
        dirty: &[usize],
        preference: ScanPreference,
    ) -> (FrameDirectory, CleanFirstReplacer) {
        let mut dir = FrameDirectory::new(n);
        let mut replacer = CleanFirstReplacer::new(preference);
        for i in 0..n {
            replacer.note_loaded(&mut dir, FrameId::new(i));
        }
        for &i in dirty {
            dir.frame_mut(FrameId::new(i)).dirty = true;
        }
        (dir, replacer)
    }

    #[test]
    fn test_keep_last_picks_newest_clean_in_window() {
        // 6 frames -> window of 5. Clean frames at 1 and 3; KeepLast takes 3.
        let (mut dir, mut replacer) = setup(6, &[0, 2, 4, 5], ScanPreference::KeepLast);
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(3)));
    }

    #[test]
    fn test_keep_first_picks_oldest_clean() {
        let (mut dir, mut replacer) = setup(6, &[0, 2, 4, 5], ScanPreference::KeepFirst);
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(1)));
    }

    #[test]
    fn test_clean_outside_window_is_invisible() {
        // 6 frames -> window of 5 entries (indices 0..=4). Only frame 5 is
        // clean, but it sits outside the window: fall back to the head.
        let (mut dir, mut replacer) = setup(6, &[0, 1, 2, 3, 4], ScanPreference::KeepLast);
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(0)));
    }

    #[test]
    fn test_all_dirty_falls_back_to_fifo_head() {
        let (mut dir, mut replacer) = setup(4, &[0, 1, 2, 3], ScanPreference::KeepLast);
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(0)));
    }

    #[test]
    fn test_victim_unlinked_from_middle() {
        let (mut dir, mut replacer) = setup(6, &[0, 1, 2, 4, 5], ScanPreference::KeepLast);

        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(3)));
        assert_eq!(replacer.len(), 5);
        assert_eq!(dir.frame(FrameId::new(3)).membership, Membership::None);
        // Remaining order is intact: head is still frame 0.
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(0)));
    }
}
