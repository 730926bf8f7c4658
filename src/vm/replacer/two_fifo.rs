//! Segmented second-chance replacement ("2fifo").
//!
//! Two capacity-bounded lists: `first-chance` holds recently loaded pages,
//! `second-chance` holds parolees whose read permission has been revoked
//! but whose content is still resident. A parked page that is touched again
//! moves back to first-chance without any disk I/O; a parked page that ages
//! out of second-chance is truly evicted.
//!
//! Capacity bounds may be exceeded by one only inside a single insertion;
//! both hold again when the call returns.

use tracing::warn;

use crate::common::FrameId;
use crate::vm::directory::{FrameDirectory, FrameList, Membership};
use crate::vm::replacer::InsertOutcome;

/// List capacities derived from the frame count.
///
/// - `F < 5`: first = `F-1`, second = `1`
/// - else:    first = `ceil(F*3/4)`, second = `floor(F/4)`
///
/// The two always sum to `F`.
pub fn list_capacities(nframes: usize) -> (usize, usize) {
    if nframes < 5 {
        (nframes - 1, 1)
    } else {
        ((nframes * 3).div_ceil(4), nframes / 4)
    }
}

/// Segmented second-chance state.
pub struct TwoFifoReplacer {
    first: FrameList,
    second: FrameList,
    first_cap: usize,
    second_cap: usize,
}

impl TwoFifoReplacer {
    /// Create a replacer sized for `nframes` frames.
    ///
    /// # Panics
    /// Panics if `nframes < 2`: the first-chance list would have zero
    /// capacity and every load would immediately park itself.
    pub fn new(nframes: usize) -> Self {
        assert!(nframes >= 2, "2fifo needs at least 2 frames");
        let (first_cap, second_cap) = list_capacities(nframes);
        Self {
            first: FrameList::new(Membership::FirstChance),
            second: FrameList::new(Membership::SecondChance),
            first_cap,
            second_cap,
        }
    }

    /// Insert a frame into first-chance and rebalance.
    ///
    /// A first-chance overflow demotes the oldest first-chance frame to the
    /// second-chance tail (outcome `demoted`: the engine revokes its read
    /// permission, content untouched). A second-chance overflow surfaces the
    /// oldest parolee as a true-eviction victim (outcome `overflow`).
    pub fn insert(&mut self, dir: &mut FrameDirectory, frame: FrameId) -> InsertOutcome {
        let mut outcome = InsertOutcome::default();

        self.first.push_back(dir, frame);

        if self.first.len() > self.first_cap {
            if let Some(old) = self.first.pop_front(dir) {
                self.second.push_back(dir, old);
                outcome.demoted = Some(old);
            }
        }
        if self.second.len() > self.second_cap {
            outcome.overflow = self.second.pop_front(dir);
        }

        outcome
    }

    /// Bump a parked frame back into first-chance.
    ///
    /// Goes through the same insert path as fresh loads; no disk I/O is
    /// implied at this level.
    pub fn promote(&mut self, dir: &mut FrameDirectory, frame: FrameId) -> InsertOutcome {
        if !self.second.contains(dir, frame) {
            warn!(frame = %frame, "promote of a frame that is not parked");
            return InsertOutcome::default();
        }
        self.second.unlink(dir, frame);
        self.insert(dir, frame)
    }

    /// Victim for a fresh load with no free frame: second-chance head if
    /// any (parolees already wasted their reference window), else the
    /// first-chance head.
    pub fn take_victim(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        if let Some(victim) = self.second.pop_front(dir) {
            return Some(victim);
        }
        let victim = self.first.pop_front(dir);
        if victim.is_none() {
            warn!("2fifo eviction requested but both lists are empty");
        }
        victim
    }

    /// Current first-chance occupancy.
    pub fn first_len(&self) -> usize {
        self.first.len()
    }

    /// Current second-chance occupancy.
    pub fn second_len(&self) -> usize {
        self.second.len()
    }

    /// First-chance capacity bound.
    pub fn first_cap(&self) -> usize {
        self.first_cap
    }

    /// Second-chance capacity bound.
    pub fn second_cap(&self) -> usize {
        self.second_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities_small() {
        assert_eq!(list_capacities(2), (1, 1));
        assert_eq!(list_capacities(3), (2, 1));
        assert_eq!(list_capacities(4), (3, 1));
    }

    #[test]
    fn test_capacities_large() {
        assert_eq!(list_capacities(5), (4, 1));
        assert_eq!(list_capacities(6), (5, 1));
        assert_eq!(list_capacities(8), (6, 2));
        assert_eq!(list_capacities(12), (9, 3));
    }

    #[test]
    fn test_capacities_sum_to_frames() {
        for f in 2..64 {
            let (first, second) = list_capacities(f);
            assert_eq!(first + second, f, "capacities for {f} frames");
        }
    }

    #[test]
    fn test_insert_within_capacity() {
        let mut dir = FrameDirectory::new(8); // caps (6, 2)
        let mut replacer = TwoFifoReplacer::new(8);

        for i in 0..6 {
            let outcome = replacer.insert(&mut dir, FrameId::new(i));
            assert_eq!(outcome, InsertOutcome::default());
        }
        assert_eq!(replacer.first_len(), 6);
        assert_eq!(replacer.second_len(), 0);
    }

    #[test]
    fn test_overflow_demotes_oldest() {
        let mut dir = FrameDirectory::new(8);
        let mut replacer = TwoFifoReplacer::new(8);

        for i in 0..6 {
            replacer.insert(&mut dir, FrameId::new(i));
        }
        let outcome = replacer.insert(&mut dir, FrameId::new(6));

        assert_eq!(outcome.demoted, Some(FrameId::new(0)));
        assert_eq!(outcome.overflow, None);
        assert_eq!(replacer.first_len(), 6);
        assert_eq!(replacer.second_len(), 1);
        assert_eq!(
            dir.frame(FrameId::new(0)).membership,
            Membership::SecondChance
        );
    }

    #[test]
    fn test_cascade_evicts_oldest_parolee() {
        let mut dir = FrameDirectory::new(8); // caps (6, 2)
        let mut replacer = TwoFifoReplacer::new(8);

        // Fill first (6), then demote 0, 1, 2 by inserting 6, 7, then one more.
        for i in 0..8 {
            replacer.insert(&mut dir, FrameId::new(i));
        }
        assert_eq!(replacer.second_len(), 2); // frames 0 and 1 parked

        // Free a frame the way the engine would, then re-load into it.
        let victim = replacer.take_victim(&mut dir).unwrap();
        assert_eq!(victim, FrameId::new(0)); // oldest parolee drains first
        let outcome = replacer.insert(&mut dir, victim);
        // first was full, so the insert demotes its head; second is back at
        // capacity without overflow.
        assert_eq!(outcome.demoted, Some(FrameId::new(2)));
        assert_eq!(outcome.overflow, None);
        assert!(replacer.first_len() <= replacer.first_cap());
        assert!(replacer.second_len() <= replacer.second_cap());
    }

    #[test]
    fn test_promote_goes_back_to_first() {
        let mut dir = FrameDirectory::new(8);
        let mut replacer = TwoFifoReplacer::new(8);

        for i in 0..7 {
            replacer.insert(&mut dir, FrameId::new(i));
        }
        assert_eq!(
            dir.frame(FrameId::new(0)).membership,
            Membership::SecondChance
        );

        let outcome = replacer.promote(&mut dir, FrameId::new(0));
        // Second list had one entry and we removed it, so the re-insert's
        // demotion lands back within capacity: no overflow.
        assert_eq!(outcome.overflow, None);
        assert_eq!(
            dir.frame(FrameId::new(0)).membership,
            Membership::FirstChance
        );
        assert!(replacer.first_len() <= replacer.first_cap());
        assert!(replacer.second_len() <= replacer.second_cap());
    }

    #[test]
    fn test_promote_unparked_frame_is_noop() {
        let mut dir = FrameDirectory::new(4);
        let mut replacer = TwoFifoReplacer::new(4);

        replacer.insert(&mut dir, FrameId::new(0));
        let outcome = replacer.promote(&mut dir, FrameId::new(0)); // in first, not second
        assert_eq!(outcome, InsertOutcome::default());
        assert_eq!(
            dir.frame(FrameId::new(0)).membership,
            Membership::FirstChance
        );
    }

    #[test]
    fn test_victim_prefers_second_chance() {
        let mut dir = FrameDirectory::new(4); // caps (3, 1)
        let mut replacer = TwoFifoReplacer::new(4);

        for i in 0..4 {
            replacer.insert(&mut dir, FrameId::new(i));
        }
        // Frame 0 was demoted when frame 3 arrived.
        assert_eq!(replacer.second_len(), 1);
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(0)));

        // Second drained: fall back to the first-chance head.
        assert_eq!(replacer.take_victim(&mut dir), Some(FrameId::new(1)));
    }
}
