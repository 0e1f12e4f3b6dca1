//! Driving ports (Inbound API)

use crate::domain::{
    AdmissionOutcome, ClaimTally, CompensationFactor, ConsensusRound, Flight, SuretyResult,
    SLOTS_PER_REPORTER,
};
use async_trait::async_trait;
use shared_types::{Address, FlightKey, StatusCode, Timestamp, U256};

/// Process-boundary operations of the surety subsystem
#[async_trait]
pub trait SuretyApi: Send + Sync {
    /// Enroll `account` as a status reporter and assign its committee slots.
    ///
    /// Re-enrolling replaces the previous slots.
    async fn enroll_reporter(
        &self,
        account: Address,
        fee: U256,
    ) -> SuretyResult<[u8; SLOTS_PER_REPORTER]>;

    /// Committee slots held by an enrolled reporter.
    async fn reporter_slots(&self, account: Address) -> SuretyResult<[u8; SLOTS_PER_REPORTER]>;

    async fn is_reporter_enrolled(&self, account: Address) -> bool;

    /// Vote for `candidate` on behalf of the activated airline `proposer`.
    async fn propose_airline(
        &self,
        candidate: Address,
        proposer: Address,
    ) -> SuretyResult<AdmissionOutcome>;

    /// Activate a registered airline that pays at least the funding fee.
    async fn fund_airline(&self, airline: Address, amount: U256) -> SuretyResult<()>;

    /// Open a flight for insurance coverage.
    async fn open_flight(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
    ) -> SuretyResult<Flight>;

    /// Open a status round for the flight; returns the sampled committee slot.
    async fn request_status(&self, flight: FlightKey, requester: Address) -> SuretyResult<u8>;

    /// Submit a reporter's claim for the round at (`slot`, `flight`).
    async fn submit_claim(
        &self,
        slot: u8,
        flight: FlightKey,
        status: StatusCode,
        reporter: Address,
    ) -> SuretyResult<ClaimTally>;

    /// Current record of a flight.
    async fn flight_status(&self, flight: FlightKey) -> SuretyResult<Flight>;

    /// Snapshot of the round at (`slot`, `flight`), open or closed.
    async fn round(&self, slot: u8, flight: FlightKey) -> Option<ConsensusRound>;

    /// Administrator-only update of the payout multiplier.
    async fn set_compensation_factor(
        &self,
        caller: Address,
        numerator: u64,
        denominator: u64,
    ) -> SuretyResult<()>;

    async fn compensation_factor(&self) -> CompensationFactor;
}
