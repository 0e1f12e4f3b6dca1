//! Subsystem configuration

use super::{CompensationFactor, SuretyError, SuretyResult, SLOTS_PER_REPORTER};
use shared_types::{ether, Address, U256};

/// Surety configuration
#[derive(Clone, Debug)]
pub struct SuretyConfig {
    /// Account allowed to change the compensation factor
    pub admin: Address,
    /// Registered-airline count below which admission is unconditional
    pub bootstrap_airline_count: u64,
    /// Share of registered airlines (percent) whose votes admit a candidate
    pub admission_threshold_percent: u64,
    /// Matching claims required to close a round
    pub consensus_quorum: usize,
    /// Number of committee slots, drawn values lie in `[0, slot_space)`
    pub slot_space: u8,
    /// Nonce wraps to 0 after this many draws (entropy lookback window)
    pub nonce_window: u8,
    /// Upper bound on draws while sampling distinct enrollment slots
    pub max_slot_draw_attempts: u32,
    /// Minimum fee to enroll as a reporter
    pub reporter_enrollment_fee: U256,
    /// Minimum funding to activate a registered airline
    pub airline_funding_fee: U256,
    /// Initial payout multiplier for airline-caused delays
    pub compensation_factor: CompensationFactor,
    /// Count each (reporter, status) pair at most once per round
    pub deduplicate_claims: bool,
}

impl Default for SuretyConfig {
    fn default() -> Self {
        Self {
            admin: [0u8; 20],
            bootstrap_airline_count: 4,
            admission_threshold_percent: 50,
            consensus_quorum: 3,
            slot_space: 10,
            nonce_window: 250,
            max_slot_draw_attempts: 256,
            reporter_enrollment_fee: ether(1),
            airline_funding_fee: ether(10),
            compensation_factor: CompensationFactor::DEFAULT,
            deduplicate_claims: false,
        }
    }
}

impl SuretyConfig {
    /// Default configuration administered by `admin`.
    pub fn with_admin(admin: Address) -> Self {
        Self {
            admin,
            ..Self::default()
        }
    }

    /// Reject configurations the engines cannot operate under.
    pub fn validate(&self) -> SuretyResult<()> {
        if usize::from(self.slot_space) < SLOTS_PER_REPORTER {
            return Err(SuretyError::InvalidConfig(format!(
                "slot_space {} cannot hold {} distinct slots",
                self.slot_space, SLOTS_PER_REPORTER
            )));
        }
        if self.consensus_quorum == 0 {
            return Err(SuretyError::InvalidConfig(
                "consensus_quorum must be positive".into(),
            ));
        }
        if self.nonce_window == 0 {
            return Err(SuretyError::InvalidConfig(
                "nonce_window must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.admission_threshold_percent) {
            return Err(SuretyError::InvalidConfig(format!(
                "admission_threshold_percent {} outside 1..=100",
                self.admission_threshold_percent
            )));
        }
        if u64::from(self.max_slot_draw_attempts) < SLOTS_PER_REPORTER as u64 {
            return Err(SuretyError::InvalidConfig(
                "max_slot_draw_attempts below slots per reporter".into(),
            ));
        }
        CompensationFactor::new(
            self.compensation_factor.numerator,
            self.compensation_factor.denominator,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SuretyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bootstrap_airline_count, 4);
        assert_eq!(config.consensus_quorum, 3);
        assert_eq!(config.slot_space, 10);
        assert_eq!(config.nonce_window, 250);
        assert_eq!(config.compensation_factor, CompensationFactor::new(3, 2).unwrap());
    }

    #[test]
    fn test_slot_space_must_fit_reporter_slots() {
        let config = SuretyConfig {
            slot_space: 2,
            ..SuretyConfig::default()
        };
        assert!(matches!(config.validate(), Err(SuretyError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_quorum_rejected() {
        let config = SuretyConfig {
            consensus_quorum: 0,
            ..SuretyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
