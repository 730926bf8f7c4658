//! Random replacement policy.
//!
//! No eviction structure at all: when no free frame exists the victim is
//! drawn uniformly over all frames.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::FrameId;
use crate::vm::directory::FrameDirectory;
use crate::vm::replacer::InsertOutcome;

/// Uniform-random victim selection.
pub struct RandomReplacer {
    rng: StdRng,
}

impl RandomReplacer {
    /// Create a replacer seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a replacer with a fixed seed (deterministic runs).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a victim uniformly among all frames.
    ///
    /// Only called when every frame is occupied, so any index is a valid
    /// victim. Nothing to unlink: this policy keeps no structure.
    pub fn take_victim(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        Some(FrameId::new(self.rng.gen_range(0..dir.len())))
    }

    /// Loads leave no trace under random replacement.
    pub fn note_loaded(&mut self, _dir: &mut FrameDirectory, _frame: FrameId) -> InsertOutcome {
        InsertOutcome::default()
    }
}

impl Default for RandomReplacer {
    fn default() -> Self {
        Self::new()
    }
}
