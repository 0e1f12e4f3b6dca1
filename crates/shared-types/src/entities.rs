//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`
//! - **Flights**: `StatusCode`, `FlightKey`

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

// Re-export U256 from primitive-types for fee and balance amounts
pub use primitive_types::U256;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style account address.
pub type Address = [u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Wei per ether, for expressing fees.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Amount of `n` whole ether expressed in wei.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(WEI_PER_ETHER)
}

/// Keccak-256 over a sequence of byte slices.
pub fn keccak256(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

// =============================================================================
// FLIGHT STATUS
// =============================================================================

/// Resolved real-world status of a flight.
///
/// The numeric codes are part of the wire contract with reporters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum StatusCode {
    #[default]
    Unknown = 0,
    OnTime = 10,
    LateAirline = 20,
    LateWeather = 30,
    LateTechnical = 40,
    LateOther = 50,
}

impl StatusCode {
    /// Raw wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the delay is the airline's fault and entitles insurees to payout.
    pub fn is_airline_delay(self) -> bool {
        self == StatusCode::LateAirline
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StatusCode::Unknown),
            10 => Ok(StatusCode::OnTime),
            20 => Ok(StatusCode::LateAirline),
            30 => Ok(StatusCode::LateWeather),
            40 => Ok(StatusCode::LateTechnical),
            50 => Ok(StatusCode::LateOther),
            other => Err(TypeError::UnknownStatusCode(other)),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::Unknown => "unknown",
            StatusCode::OnTime => "on_time",
            StatusCode::LateAirline => "late_airline",
            StatusCode::LateWeather => "late_weather",
            StatusCode::LateTechnical => "late_technical",
            StatusCode::LateOther => "late_other",
        };
        f.write_str(name)
    }
}

// =============================================================================
// FLIGHT KEY
// =============================================================================

/// Composite identity of a flight: (airline, designator, scheduled timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    /// Operating airline account.
    pub airline: Address,
    /// Flight designator, e.g. `"ND1309"`.
    pub designator: String,
    /// Scheduled departure (unix seconds).
    pub timestamp: Timestamp,
}

impl FlightKey {
    pub fn new(airline: Address, designator: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            airline,
            designator: designator.into(),
            timestamp,
        }
    }

    /// Fixed-width structural hash of the key.
    ///
    /// The designator is length-prefixed so `("AB", "C")`-style splits of the
    /// same bytes can never collide.
    pub fn id(&self) -> Hash {
        let designator = self.designator.as_bytes();
        let len = (designator.len() as u64).to_be_bytes();
        keccak256(&[
            &self.airline,
            &len,
            designator,
            &self.timestamp.to_be_bytes(),
        ])
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}/0x{}",
            self.designator,
            self.timestamp,
            self.airline[..4]
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>()
        )
    }
}
