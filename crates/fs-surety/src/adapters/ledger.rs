//! In-memory Ledger Gateway adapter
//!
//! Bookkeeping for airline registration, votes, insured flights and insuree
//! credits. Purchases are booked through [`InMemoryLedger::buy_insurance`],
//! which is not part of the gateway port.

use crate::domain::CompensationFactor;
use crate::ports::{LedgerError, LedgerGateway};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, FlightKey, Hash, Timestamp, U256};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct AirlineRecord {
    registered: bool,
    activated: bool,
    voters: Vec<Address>,
}

#[derive(Debug, Default)]
struct InsuredFlight {
    open: bool,
    policies: Vec<(Address, U256)>,
    credited: bool,
}

/// A `creditInsurees` instruction received by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreditInstruction {
    pub flight: FlightKey,
    pub factor: CompensationFactor,
}

#[derive(Debug, Default)]
struct LedgerState {
    airlines: HashMap<Address, AirlineRecord>,
    registered: u64,
    active: u64,
    flights: HashMap<Hash, InsuredFlight>,
    credits: HashMap<Address, U256>,
    instructions: Vec<CreditInstruction>,
}

/// In-memory ledger for tests and single-process deployments
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger whose first airline is registered at genesis.
    pub fn with_founding_airline(airline: Address) -> Self {
        let ledger = Self::new();
        {
            let mut state = ledger.state.write();
            state.airlines.insert(
                airline,
                AirlineRecord {
                    registered: true,
                    ..AirlineRecord::default()
                },
            );
            state.registered = 1;
        }
        ledger
    }

    /// Book a policy on an open flight.
    pub fn buy_insurance(
        &self,
        passenger: Address,
        flight: &FlightKey,
        premium: U256,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        match state.flights.get_mut(&flight.id()) {
            Some(insured) if insured.open => {
                insured.policies.push((passenger, premium));
                Ok(())
            }
            _ => Err(LedgerError::Rejected {
                reason: format!("insurance sales closed for {flight}"),
            }),
        }
    }

    pub fn is_flight_open(&self, flight: &FlightKey) -> bool {
        self.state
            .read()
            .flights
            .get(&flight.id())
            .is_some_and(|f| f.open)
    }

    /// Amount credited to a passenger so far.
    pub fn credit_of(&self, passenger: &Address) -> U256 {
        self.state
            .read()
            .credits
            .get(passenger)
            .copied()
            .unwrap_or_default()
    }

    pub fn credit_instructions(&self) -> Vec<CreditInstruction> {
        self.state.read().instructions.clone()
    }
}

fn overflow(what: &str) -> LedgerError {
    LedgerError::Rejected {
        reason: format!("{what} overflow"),
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn register_airline(
        &self,
        candidate: Address,
        accepted: bool,
        proposer: Address,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let record = state.airlines.entry(candidate).or_default();
        if record.registered {
            return Err(LedgerError::AlreadyRegistered(candidate));
        }
        if record.voters.contains(&proposer) {
            return Err(LedgerError::DuplicateVote {
                candidate,
                proposer,
            });
        }
        record.voters.push(proposer);

        if accepted {
            record.registered = true;
            state.registered = state
                .registered
                .checked_add(1)
                .ok_or_else(|| overflow("registered airline counter"))?;
        }
        debug!(accepted, "[ledger] airline vote recorded");
        Ok(())
    }

    async fn activate_airline(&self, airline: Address) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let record = state
            .airlines
            .get_mut(&airline)
            .filter(|r| r.registered)
            .ok_or(LedgerError::NotRegistered(airline))?;
        if record.activated {
            return Ok(());
        }
        record.activated = true;
        state.active = state
            .active
            .checked_add(1)
            .ok_or_else(|| overflow("active airline counter"))?;
        Ok(())
    }

    async fn is_airline_registered(&self, airline: Address) -> Result<bool, LedgerError> {
        Ok(self
            .state
            .read()
            .airlines
            .get(&airline)
            .is_some_and(|r| r.registered))
    }

    async fn is_airline_activated(&self, airline: Address) -> Result<bool, LedgerError> {
        Ok(self
            .state
            .read()
            .airlines
            .get(&airline)
            .is_some_and(|r| r.activated))
    }

    async fn airline_votes(&self, airline: Address) -> Result<u64, LedgerError> {
        Ok(self
            .state
            .read()
            .airlines
            .get(&airline)
            .map_or(0, |r| r.voters.len() as u64))
    }

    async fn registered_airlines(&self) -> Result<u64, LedgerError> {
        Ok(self.state.read().registered)
    }

    async fn active_airlines(&self) -> Result<u64, LedgerError> {
        Ok(self.state.read().active)
    }

    async fn register_flight_for_insurance(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
        open: bool,
    ) -> Result<(), LedgerError> {
        let key = FlightKey::new(airline, designator, timestamp);
        self.state
            .write()
            .flights
            .entry(key.id())
            .or_default()
            .open = open;
        Ok(())
    }

    async fn credit_insurees(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
        factor_numerator: u64,
        factor_denominator: u64,
    ) -> Result<(), LedgerError> {
        let factor = CompensationFactor::new(factor_numerator, factor_denominator).map_err(
            |e| LedgerError::Rejected {
                reason: e.to_string(),
            },
        )?;
        let flight = FlightKey::new(airline, designator, timestamp);

        let mut guard = self.state.write();
        let state = &mut *guard;
        let insured = state.flights.entry(flight.id()).or_default();

        if !insured.credited {
            let mut payouts = Vec::with_capacity(insured.policies.len());
            for (passenger, premium) in &insured.policies {
                let payout = factor
                    .apply(*premium)
                    .ok_or_else(|| overflow("payout"))?;
                payouts.push((*passenger, payout));
            }
            for (passenger, payout) in payouts {
                let balance = state.credits.entry(passenger).or_default();
                *balance = balance
                    .checked_add(payout)
                    .ok_or_else(|| overflow("credit balance"))?;
            }
            insured.credited = true;
        }

        state.instructions.push(CreditInstruction { flight, factor });
        Ok(())
    }
}
