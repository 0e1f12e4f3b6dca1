//! Airline admission rule
//!
//! Admission is unconditional while the network is below its bootstrap size.
//! Past that point a candidate needs votes from a share of the registered
//! airlines:
//!
//! ```text
//! votes * 100 >= registered * threshold_percent
//! ```
//!
//! With the default 50% this is `votes >= ceil(registered / 2)`. The scaled
//! comparison avoids truncating the fractional half.

use super::{SuretyConfig, SuretyError, SuretyResult};
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Vote threshold that changes shape once the network leaves bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdmissionRule {
    bootstrap_airline_count: u64,
    threshold_percent: u64,
}

impl AdmissionRule {
    pub fn new(bootstrap_airline_count: u64, threshold_percent: u64) -> Self {
        Self {
            bootstrap_airline_count,
            threshold_percent,
        }
    }

    pub fn from_config(config: &SuretyConfig) -> Self {
        Self::new(
            config.bootstrap_airline_count,
            config.admission_threshold_percent,
        )
    }

    /// Whether `registered` airlines is still the bootstrap phase.
    pub fn is_bootstrap(&self, registered: u64) -> bool {
        registered < self.bootstrap_airline_count
    }

    /// Decide a proposal given the candidate's tally (including this vote).
    pub fn admits(&self, votes: u64, registered: u64) -> SuretyResult<bool> {
        if self.is_bootstrap(registered) {
            return Ok(true);
        }
        let scaled_votes = votes
            .checked_mul(100)
            .ok_or(SuretyError::ArithmeticOverflow("vote scaling"))?;
        let scaled_required = registered
            .checked_mul(self.threshold_percent)
            .ok_or(SuretyError::ArithmeticOverflow("threshold scaling"))?;
        Ok(scaled_votes >= scaled_required)
    }

    /// Minimum votes needed at the given network size.
    pub fn required_votes(&self, registered: u64) -> u64 {
        if self.is_bootstrap(registered) {
            return 0;
        }
        // ceil(registered * percent / 100), computed in u128 so it cannot overflow
        let scaled = u128::from(registered) * u128::from(self.threshold_percent);
        scaled.div_ceil(100) as u64
    }
}

/// Result of one admission proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionOutcome {
    pub candidate: Address,
    /// Authoritative registration status re-read from the ledger
    pub accepted: bool,
    /// Candidate's vote tally after this proposal
    pub votes: u64,
}
