//! Flight registry domain
//!
//! A flight is opened by its airline and resolves exactly once: after a
//! non-`Unknown` status lands, the record is frozen.

use super::{SuretyError, SuretyResult};
use serde::{Deserialize, Serialize};
use shared_types::{FlightKey, Hash, StatusCode, Timestamp, U256};
use std::collections::HashMap;

/// Flight insured on the platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub key: FlightKey,
    pub registered: bool,
    pub landed: bool,
    pub status: StatusCode,
    pub updated_at: Timestamp,
}

impl Flight {
    fn open(key: FlightKey, now: Timestamp) -> Self {
        Self {
            key,
            registered: true,
            landed: false,
            status: StatusCode::Unknown,
            updated_at: now,
        }
    }

    /// Ensure a status may still be resolved for this flight.
    pub fn ensure_resolvable(&self) -> SuretyResult<()> {
        if !self.registered {
            return Err(SuretyError::FlightNotRegistered(self.key.clone()));
        }
        if self.landed {
            return Err(SuretyError::FlightAlreadyLanded(self.key.clone()));
        }
        Ok(())
    }
}

/// Flights by structural key. Records are never removed.
#[derive(Debug, Default)]
pub struct FlightRegistry {
    flights: HashMap<Hash, Flight>,
}

impl FlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `key` may be (re)opened.
    ///
    /// Re-opening an unresolved flight replaces it; a landed flight is frozen.
    pub fn ensure_openable(&self, key: &FlightKey) -> SuretyResult<()> {
        match self.flights.get(&key.id()) {
            Some(flight) if flight.landed => Err(SuretyError::FlightAlreadyLanded(key.clone())),
            _ => Ok(()),
        }
    }

    pub fn open(&mut self, key: FlightKey, now: Timestamp) -> SuretyResult<&Flight> {
        self.ensure_openable(&key)?;
        let id = key.id();
        self.flights.insert(id, Flight::open(key, now));
        Ok(&self.flights[&id])
    }

    pub fn get(&self, key: &FlightKey) -> Option<&Flight> {
        self.flights.get(&key.id())
    }

    /// Look up a flight that can still take a status.
    pub fn resolvable(&self, key: &FlightKey) -> SuretyResult<&Flight> {
        let flight = self
            .get(key)
            .ok_or_else(|| SuretyError::FlightNotFound(key.clone()))?;
        flight.ensure_resolvable()?;
        Ok(flight)
    }

    /// Record the resolved status. Lands the flight unless the status is `Unknown`.
    pub fn resolve(
        &mut self,
        key: &FlightKey,
        status: StatusCode,
        now: Timestamp,
    ) -> SuretyResult<&Flight> {
        self.resolvable(key)?;
        let flight = self
            .flights
            .get_mut(&key.id())
            .ok_or_else(|| SuretyError::FlightNotFound(key.clone()))?;
        flight.status = status;
        flight.landed = status != StatusCode::Unknown;
        flight.updated_at = now;
        Ok(flight)
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

/// Payout multiplier applied to premiums on airline-caused delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationFactor {
    pub numerator: u64,
    pub denominator: u64,
}

impl CompensationFactor {
    /// 1.5x the premium.
    pub const DEFAULT: Self = Self {
        numerator: 3,
        denominator: 2,
    };

    pub fn new(numerator: u64, denominator: u64) -> SuretyResult<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(SuretyError::InvalidCompensationFactor {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `premium * numerator / denominator`, `None` on overflow.
    pub fn apply(&self, premium: U256) -> Option<U256> {
        premium
            .checked_mul(U256::from(self.numerator))
            .map(|scaled| scaled / U256::from(self.denominator))
    }
}

impl Default for CompensationFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}
