//! Driven ports (Outbound dependencies)

use crate::events::SuretyEvent;
use async_trait::async_trait;
use shared_types::{Address, Hash, Timestamp};

/// Errors reported by the Ledger Gateway
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Airline already holds a registration
    #[error("Airline already registered: {0:?}")]
    AlreadyRegistered(Address),

    /// Proposer already voted for this candidate
    #[error("Duplicate vote from {proposer:?} for {candidate:?}")]
    DuplicateVote {
        candidate: Address,
        proposer: Address,
    },

    /// Operation requires a registered airline
    #[error("Airline not registered: {0:?}")]
    NotRegistered(Address),

    /// The ledger refused the request
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Authoritative store for airline registry, votes and payout bookkeeping.
///
/// The surety core reads counters and flags through this port and relays its
/// decisions; it never mutates ledger state directly.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Record `proposer`'s vote for `candidate`, registering it when `accepted`.
    async fn register_airline(
        &self,
        candidate: Address,
        accepted: bool,
        proposer: Address,
    ) -> Result<(), LedgerError>;

    /// Mark a funded airline as active.
    async fn activate_airline(&self, airline: Address) -> Result<(), LedgerError>;

    async fn is_airline_registered(&self, airline: Address) -> Result<bool, LedgerError>;

    async fn is_airline_activated(&self, airline: Address) -> Result<bool, LedgerError>;

    async fn airline_votes(&self, airline: Address) -> Result<u64, LedgerError>;

    async fn registered_airlines(&self) -> Result<u64, LedgerError>;

    async fn active_airlines(&self) -> Result<u64, LedgerError>;

    /// Open (`open = true`) or close insurance sales for a flight.
    async fn register_flight_for_insurance(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
        open: bool,
    ) -> Result<(), LedgerError>;

    /// Credit every insuree of the flight with `premium * numerator / denominator`.
    async fn credit_insurees(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
        factor_numerator: u64,
        factor_denominator: u64,
    ) -> Result<(), LedgerError>;
}

/// Environment-provided unpredictable value.
///
/// `lookback` selects how far back the host reaches (e.g. block hashes
/// `lookback` blocks ago); it always lies inside the configured nonce window.
pub trait EntropySource: Send + Sync {
    fn entropy(&self, lookback: u8) -> Hash;
}

/// Event bus for reporter broadcasts and resolution notifications
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: SuretyEvent) -> Result<(), String>;
}

/// Time source for record timestamps
pub trait TimeSource: Send + Sync {
    /// Get current unix timestamp in seconds
    fn now(&self) -> Timestamp;
}

/// Default time source using system time
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
