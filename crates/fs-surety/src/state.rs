use crate::domain::{
    CommitteeRegistry, CompensationFactor, EntropyNonce, FlightRegistry, RoundBook, SuretyConfig,
};

/// Encapsulates the mutable state of the Surety Service.
/// Flights, reporter slots, consensus rounds, the draw nonce and the payout factor.
pub struct SuretyState {
    pub flights: FlightRegistry,
    pub committee: CommitteeRegistry,
    pub rounds: RoundBook,
    pub nonce: EntropyNonce,
    pub compensation_factor: CompensationFactor,
}

impl SuretyState {
    pub fn new(config: &SuretyConfig) -> Self {
        Self {
            flights: FlightRegistry::new(),
            committee: CommitteeRegistry::new(),
            rounds: RoundBook::new(),
            nonce: EntropyNonce::new(config.nonce_window),
            compensation_factor: config.compensation_factor,
        }
    }
}
