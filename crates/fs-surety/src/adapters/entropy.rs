//! Entropy source adapters

use crate::ports::EntropySource;
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::Hash;
use std::collections::VecDeque;

/// Hashes the host can look back over, as with EVM `blockhash`.
pub const BLOCK_HASH_HISTORY: usize = 256;

/// Operating-system randomness; ignores the lookback.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn entropy(&self, _lookback: u8) -> Hash {
        let mut out = [0u8; 32];
        OsRng.fill_bytes(&mut out);
        out
    }
}

/// Constant entropy for reproducible tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub Hash);

impl EntropySource for FixedEntropy {
    fn entropy(&self, _lookback: u8) -> Hash {
        self.0
    }
}

/// Recent block hashes, newest last.
///
/// `entropy(n)` returns the hash `n` blocks before the newest one. Lookbacks
/// past the retained history yield the zero hash, as the EVM does.
#[derive(Debug, Default)]
pub struct BlockHashEntropy {
    history: RwLock<VecDeque<Hash>>,
}

impl BlockHashEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly sealed block hash.
    pub fn push_block(&self, hash: Hash) {
        let mut history = self.history.write();
        if history.len() == BLOCK_HASH_HISTORY {
            history.pop_front();
        }
        history.push_back(hash);
    }

    pub fn depth(&self) -> usize {
        self.history.read().len()
    }
}

impl EntropySource for BlockHashEntropy {
    fn entropy(&self, lookback: u8) -> Hash {
        let history = self.history.read();
        let lookback = usize::from(lookback);
        if lookback >= history.len() {
            return [0u8; 32];
        }
        history[history.len() - 1 - lookback]
    }
}
