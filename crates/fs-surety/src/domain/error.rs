//! Error types for the surety subsystem
//!
//! Every rejection is synchronous, carries a distinguishable reason and leaves
//! no partial state behind.

use crate::ports::LedgerError;
use shared_types::{Address, FlightKey, TypeError, U256};

/// Surety error types
#[derive(Debug, thiserror::Error)]
pub enum SuretyError {
    #[error("Airline not registered: {0:?}")]
    AirlineNotRegistered(Address),

    #[error("Airline not activated: {0:?}")]
    AirlineNotActivated(Address),

    #[error("Unknown flight: {0}")]
    FlightNotFound(FlightKey),

    #[error("Flight not open for insurance: {0}")]
    FlightNotRegistered(FlightKey),

    #[error("Flight already landed: {0}")]
    FlightAlreadyLanded(FlightKey),

    #[error("Reporter not enrolled: {0:?}")]
    OracleNotRegistered(Address),

    #[error("Slot {slot} is not assigned to reporter {reporter:?}")]
    SlotNotAssigned { reporter: Address, slot: u8 },

    #[error("No open round for slot {slot} on flight {flight}")]
    RoundNotOpen { slot: u8, flight: FlightKey },

    #[error("Insufficient fee: paid {paid}, required {required}")]
    InsufficientFee { paid: U256, required: U256 },

    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Caller {0:?} is not the administrator")]
    Unauthorized(Address),

    #[error("Invalid compensation factor: {numerator}/{denominator}")]
    InvalidCompensationFactor { numerator: u64, denominator: u64 },

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(#[from] TypeError),

    #[error("Could not draw {needed} distinct slots after {attempts} attempts")]
    EntropyExhausted { needed: usize, attempts: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Ledger gateway error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result type for surety operations
pub type SuretyResult<T> = Result<T, SuretyError>;
