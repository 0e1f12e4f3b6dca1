//! Committee slot sampling
//!
//! A draw hashes three inputs with Keccak-256:
//!
//! 1. environment entropy looked up `nonce` steps back (unpredictable to callers)
//! 2. the seed account
//! 3. the nonce itself
//!
//! The nonce advances on every draw and wraps inside the environment's
//! lookback window, so the lookup never leaves the range the host can serve.

use super::{SuretyError, SuretyResult, SLOTS_PER_REPORTER};
use crate::ports::EntropySource;
use shared_types::{keccak256, Address, Hash, U256};

/// Process-wide draw counter with bounded wraparound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntropyNonce {
    value: u8,
    window: u8,
}

impl EntropyNonce {
    /// Nonce starting at 0 that wraps after `window` draws.
    pub fn new(window: u8) -> Self {
        Self {
            value: 0,
            window: window.max(1),
        }
    }

    pub fn current(&self) -> u8 {
        self.value
    }

    /// Return the current value and step forward, wrapping to 0 at `window`.
    pub fn advance(&mut self) -> u8 {
        let drawn = self.value;
        self.value = if drawn + 1 >= self.window { 0 } else { drawn + 1 };
        drawn
    }
}

/// Reduce `(environment, seed, nonce)` to a slot in `[0, slot_space)`.
pub fn draw_slot(environment: &Hash, seed: &Address, nonce: u8, slot_space: u8) -> u8 {
    let digest = keccak256(&[environment, seed, &[nonce]]);
    let reduced = U256::from_big_endian(&digest) % U256::from(slot_space.max(1));
    reduced.low_u32() as u8
}

/// Draws slots against an entropy source, advancing a borrowed nonce.
///
/// Callers work on a copy of the service nonce and store it back only when the
/// whole operation succeeds.
pub struct SlotSampler<'a> {
    source: &'a dyn EntropySource,
    nonce: &'a mut EntropyNonce,
    slot_space: u8,
}

impl<'a> SlotSampler<'a> {
    pub fn new(source: &'a dyn EntropySource, nonce: &'a mut EntropyNonce, slot_space: u8) -> Self {
        Self {
            source,
            nonce,
            slot_space,
        }
    }

    /// One slot for `seed`.
    pub fn draw(&mut self, seed: &Address) -> u8 {
        let lookback = self.nonce.advance();
        let environment = self.source.entropy(lookback);
        draw_slot(&environment, seed, lookback, self.slot_space)
    }

    /// Pairwise-distinct slots for `seed` by rejection sampling.
    pub fn draw_distinct(
        &mut self,
        seed: &Address,
        max_attempts: u32,
    ) -> SuretyResult<[u8; SLOTS_PER_REPORTER]> {
        let mut slots = [0u8; SLOTS_PER_REPORTER];
        let mut filled = 0;
        let mut attempts = 0u32;

        while filled < SLOTS_PER_REPORTER {
            if attempts >= max_attempts {
                return Err(SuretyError::EntropyExhausted {
                    needed: SLOTS_PER_REPORTER,
                    attempts,
                });
            }
            attempts += 1;

            let slot = self.draw(seed);
            if !slots[..filled].contains(&slot) {
                slots[filled] = slot;
                filled += 1;
            }
        }

        Ok(slots)
    }
}
