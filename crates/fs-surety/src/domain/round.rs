//! Status consensus rounds
//!
//! A round is keyed by (slot, flight). It accepts claims while open and closes
//! permanently on the first status whose support reaches the quorum.

use super::{SuretyError, SuretyResult};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, FlightKey, Hash, StatusCode};
use std::collections::{BTreeMap, HashMap};

/// Identity of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundKey {
    pub slot: u8,
    pub flight: FlightKey,
}

impl RoundKey {
    pub fn new(slot: u8, flight: FlightKey) -> Self {
        Self { slot, flight }
    }

    pub fn id(&self) -> Hash {
        keccak256(&[&[self.slot], &self.flight.id()])
    }
}

/// Outcome of recording one claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimTally {
    /// Round already closed, claim not recorded
    Closed,
    /// Claim recorded, no status at quorum yet
    Pending { support: usize },
    /// Reporter already backs this status and repeats are not counted
    Duplicate { support: usize },
    /// This claim brought `status` to quorum
    Quorum { status: StatusCode, support: usize },
}

/// One status-resolution round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusRound {
    pub requester: Address,
    open: bool,
    claims: BTreeMap<StatusCode, Vec<Address>>,
    winner: Option<StatusCode>,
}

impl ConsensusRound {
    pub fn new(requester: Address) -> Self {
        Self {
            requester,
            open: true,
            claims: BTreeMap::new(),
            winner: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn winner(&self) -> Option<StatusCode> {
        self.winner
    }

    /// Reporters backing `status`, in submission order.
    pub fn supporters(&self, status: StatusCode) -> &[Address] {
        self.claims.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn claims(&self) -> &BTreeMap<StatusCode, Vec<Address>> {
        &self.claims
    }

    /// Append a claim and close the round if it reaches `quorum`.
    ///
    /// With `deduplicate` off, a reporter repeating a claim adds to its support
    /// each time.
    pub fn record_claim(
        &mut self,
        reporter: Address,
        status: StatusCode,
        quorum: usize,
        deduplicate: bool,
    ) -> ClaimTally {
        if !self.open {
            return ClaimTally::Closed;
        }
        let supporters = self.claims.entry(status).or_default();
        if deduplicate && supporters.contains(&reporter) {
            return ClaimTally::Duplicate {
                support: supporters.len(),
            };
        }
        supporters.push(reporter);
        let support = supporters.len();

        if support >= quorum {
            self.open = false;
            self.winner = Some(status);
            return ClaimTally::Quorum { status, support };
        }
        ClaimTally::Pending { support }
    }
}

/// Every round ever opened, kept for audit.
#[derive(Debug, Default)]
pub struct RoundBook {
    rounds: HashMap<Hash, ConsensusRound>,
}

impl RoundBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a round; a round already stored under the same key is replaced.
    pub fn open(&mut self, key: &RoundKey, requester: Address) -> Option<ConsensusRound> {
        self.rounds.insert(key.id(), ConsensusRound::new(requester))
    }

    pub fn get(&self, key: &RoundKey) -> Option<&ConsensusRound> {
        self.rounds.get(&key.id())
    }

    /// Copy of the open round at `key` for staged mutation.
    pub fn open_round(&self, key: &RoundKey) -> SuretyResult<ConsensusRound> {
        match self.get(key) {
            Some(round) if round.is_open() => Ok(round.clone()),
            _ => Err(SuretyError::RoundNotOpen {
                slot: key.slot,
                flight: key.flight.clone(),
            }),
        }
    }

    /// Store a staged round back under its key.
    pub fn commit(&mut self, key: &RoundKey, round: ConsensusRound) {
        self.rounds.insert(key.id(), round);
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
