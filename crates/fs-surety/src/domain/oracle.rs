//! Oracle committee membership

use super::{SuretyError, SuretyResult};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::HashMap;

/// Committee slots held by every enrolled reporter.
pub const SLOTS_PER_REPORTER: usize = 3;

/// Enrolled status reporter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub account: Address,
    /// Pairwise distinct, fixed at enrollment
    pub slots: [u8; SLOTS_PER_REPORTER],
}

impl Reporter {
    pub fn holds(&self, slot: u8) -> bool {
        self.slots.contains(&slot)
    }
}

/// Slot assignments for all enrolled reporters.
#[derive(Debug, Default)]
pub struct CommitteeRegistry {
    reporters: HashMap<Address, Reporter>,
}

impl CommitteeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reporter's slots. Re-enrollment replaces the previous assignment.
    pub fn enroll(&mut self, account: Address, slots: [u8; SLOTS_PER_REPORTER]) -> Option<Reporter> {
        self.reporters.insert(account, Reporter { account, slots })
    }

    pub fn is_enrolled(&self, account: &Address) -> bool {
        self.reporters.contains_key(account)
    }

    pub fn slots_of(&self, account: &Address) -> SuretyResult<[u8; SLOTS_PER_REPORTER]> {
        self.reporters
            .get(account)
            .map(|r| r.slots)
            .ok_or(SuretyError::OracleNotRegistered(*account))
    }

    /// Fails unless `account` is enrolled and holds `slot`.
    pub fn ensure_member(&self, account: &Address, slot: u8) -> SuretyResult<()> {
        let reporter = self
            .reporters
            .get(account)
            .ok_or(SuretyError::OracleNotRegistered(*account))?;
        if !reporter.holds(slot) {
            return Err(SuretyError::SlotNotAssigned {
                reporter: *account,
                slot,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}
