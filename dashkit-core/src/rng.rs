//! Deterministic RNG tree.
//!
//! One master seed fans out into named sub-seeds via BLAKE3, so each
//! simulated component draws from its own stream and adding a component
//! never shifts another one's sequence.

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTree {
    master_seed: u64,
}

impl SeedTree {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Sub-seed for `(component, iteration)`, independent of call order.
    pub fn sub_seed(&self, component: &str, iteration: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(component.as_bytes());
        hasher.update(&iteration.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, component: &str, iteration: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(component, iteration))
    }
}
