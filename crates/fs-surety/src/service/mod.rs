//! Surety Service - Core business logic
//!
//! # Architecture
//! - Admission Engine: bootstrap-then-majority airline voting
//! - Flight Registry: flights open for coverage, resolved exactly once
//! - Oracle Committee: three fixed slots per reporter
//! - Status Consensus: per-(slot, flight) rounds closing at quorum
//!
//! # Serialization
//! Every operation holds the state lock for its full duration, gateway calls
//! included, so check-then-act sequences never interleave. Local state is only
//! written after every check and gateway write has succeeded. Events are
//! published before the lock is released, so the bus sees them in commit order.

use crate::domain::{
    AdmissionOutcome, AdmissionRule, ClaimTally, CompensationFactor, ConsensusRound, Flight,
    RoundKey, SlotSampler, SuretyConfig, SuretyError, SuretyResult, SLOTS_PER_REPORTER,
};
use crate::events::{
    ClaimReportedEvent, StatusRequestedEvent, StatusResolvedEvent, SuretyEvent,
};
use crate::ports::{
    EntropySource, EventBus, LedgerGateway, SuretyApi, SystemTimeSource, TimeSource,
};
use crate::state::SuretyState;
use async_trait::async_trait;
use shared_types::{Address, FlightKey, StatusCode, Timestamp, U256};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};


/// Short hex prefix of an account for log lines.
fn short(account: &Address) -> String {
    format!("{:02x}{:02x}..", account[0], account[1])
}

/// Surety Service
pub struct SuretyService<L, E, B>
where
    L: LedgerGateway,
    E: EntropySource,
    B: EventBus,
{
    ledger: Arc<L>,
    entropy: Arc<E>,
    event_bus: Arc<B>,
    state: Mutex<SuretyState>,
    admission: AdmissionRule,
    config: SuretyConfig,
    time_source: Box<dyn TimeSource>,
}

/// Dependencies for SuretyService
pub struct SuretyDependencies<L, E, B> {
    pub ledger: Arc<L>,
    pub entropy: Arc<E>,
    pub event_bus: Arc<B>,
    pub config: SuretyConfig,
}

impl<L, E, B> SuretyService<L, E, B>
where
    L: LedgerGateway,
    E: EntropySource,
    B: EventBus,
{
    /// Create a new SuretyService, rejecting an unusable configuration
    pub fn new(deps: SuretyDependencies<L, E, B>) -> SuretyResult<Self> {
        deps.config.validate()?;
        Ok(Self {
            ledger: deps.ledger,
            entropy: deps.entropy,
            event_bus: deps.event_bus,
            state: Mutex::new(SuretyState::new(&deps.config)),
            admission: AdmissionRule::from_config(&deps.config),
            config: deps.config,
            time_source: Box::new(SystemTimeSource),
        })
    }

    /// Set custom time source (for testing)
    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn config(&self) -> &SuretyConfig {
        &self.config
    }

    /// Submit a claim given its raw wire code.
    pub async fn submit_claim_code(
        &self,
        slot: u8,
        flight: FlightKey,
        code: u8,
        reporter: Address,
    ) -> SuretyResult<ClaimTally> {
        let status = StatusCode::try_from(code)?;
        self.submit_claim(slot, flight, status, reporter).await
    }

    // === PRECONDITIONS ===

    async fn ensure_activated(&self, airline: Address) -> SuretyResult<()> {
        if self.ledger.is_airline_activated(airline).await? {
            return Ok(());
        }
        if self.ledger.is_airline_registered(airline).await? {
            Err(SuretyError::AirlineNotActivated(airline))
        } else {
            Err(SuretyError::AirlineNotRegistered(airline))
        }
    }

    fn ensure_fee(paid: U256, required: U256) -> SuretyResult<()> {
        if paid < required {
            return Err(SuretyError::InsufficientFee { paid, required });
        }
        Ok(())
    }

    // === SETTLEMENT ===

    /// Ledger side of a resolved round: stop sales, then pay out on airline delay.
    ///
    /// Returns whether insurees were credited. A failed payout reopens sales
    /// before the error is returned.
    async fn settle(
        &self,
        flight: &FlightKey,
        status: StatusCode,
        factor: CompensationFactor,
    ) -> SuretyResult<bool> {
        if status == StatusCode::Unknown {
            return Ok(false);
        }
        self.ledger
            .register_flight_for_insurance(flight.airline, &flight.designator, flight.timestamp, false)
            .await?;

        if !status.is_airline_delay() {
            return Ok(false);
        }
        let credited = self
            .ledger
            .credit_insurees(
                flight.airline,
                &flight.designator,
                flight.timestamp,
                factor.numerator,
                factor.denominator,
            )
            .await;
        if let Err(e) = credited {
            // Sales reopen so the rejected claim leaves the ledger as it found it.
            if let Err(reopen) = self
                .ledger
                .register_flight_for_insurance(flight.airline, &flight.designator, flight.timestamp, true)
                .await
            {
                warn!(
                    "[fs-surety] Failed to reopen sales for {} after payout error: {}",
                    flight, reopen
                );
            }
            return Err(e.into());
        }
        Ok(true)
    }

    async fn publish(&self, event: SuretyEvent) {
        let kind = event.kind();
        if let Err(e) = self.event_bus.publish(event).await {
            warn!("[fs-surety] Failed to publish {} event: {}", kind, e);
        }
    }

    fn now(&self) -> Timestamp {
        self.time_source.now()
    }
}

#[async_trait]
impl<L, E, B> SuretyApi for SuretyService<L, E, B>
where
    L: LedgerGateway,
    E: EntropySource,
    B: EventBus,
{
    async fn enroll_reporter(
        &self,
        account: Address,
        fee: U256,
    ) -> SuretyResult<[u8; SLOTS_PER_REPORTER]> {
        let mut state = self.state.lock().await;
        Self::ensure_fee(fee, self.config.reporter_enrollment_fee)?;

        let mut nonce = state.nonce;
        let slots = SlotSampler::new(&*self.entropy, &mut nonce, self.config.slot_space)
            .draw_distinct(&account, self.config.max_slot_draw_attempts)?;

        state.nonce = nonce;
        if let Some(previous) = state.committee.enroll(account, slots) {
            debug!(
                "[fs-surety] Reporter {} re-enrolled, slots {:?} -> {:?}",
                short(&account),
                previous.slots,
                slots
            );
        }

        crate::metrics::record_enrollment();
        info!("[fs-surety] Reporter {} enrolled with slots {:?}", short(&account), slots);
        Ok(slots)
    }

    async fn reporter_slots(&self, account: Address) -> SuretyResult<[u8; SLOTS_PER_REPORTER]> {
        self.state.lock().await.committee.slots_of(&account)
    }

    async fn is_reporter_enrolled(&self, account: Address) -> bool {
        self.state.lock().await.committee.is_enrolled(&account)
    }

    async fn propose_airline(
        &self,
        candidate: Address,
        proposer: Address,
    ) -> SuretyResult<AdmissionOutcome> {
        let _state = self.state.lock().await;
        self.ensure_activated(proposer).await?;

        let votes = self
            .ledger
            .airline_votes(candidate)
            .await?
            .checked_add(1)
            .ok_or(SuretyError::ArithmeticOverflow("airline votes"))?;
        let registered = self.ledger.registered_airlines().await?;
        let admitted = self.admission.admits(votes, registered)?;

        self.ledger
            .register_airline(candidate, admitted, proposer)
            .await?;

        // The ledger may apply its own checks; its view is authoritative.
        let accepted = self.ledger.is_airline_registered(candidate).await?;
        let votes = self.ledger.airline_votes(candidate).await?;

        crate::metrics::record_admission(accepted);
        info!(
            "[fs-surety] Airline {} proposed by {}: accepted={} votes={} registered={} required={}",
            short(&candidate),
            short(&proposer),
            accepted,
            votes,
            registered,
            self.admission.required_votes(registered)
        );

        Ok(AdmissionOutcome {
            candidate,
            accepted,
            votes,
        })
    }

    async fn fund_airline(&self, airline: Address, amount: U256) -> SuretyResult<()> {
        let _state = self.state.lock().await;
        Self::ensure_fee(amount, self.config.airline_funding_fee)?;
        if !self.ledger.is_airline_registered(airline).await? {
            return Err(SuretyError::AirlineNotRegistered(airline));
        }
        self.ledger.activate_airline(airline).await?;
        info!("[fs-surety] Airline {} funded and activated", short(&airline));
        Ok(())
    }

    async fn open_flight(
        &self,
        airline: Address,
        designator: &str,
        timestamp: Timestamp,
    ) -> SuretyResult<Flight> {
        let mut state = self.state.lock().await;
        self.ensure_activated(airline).await?;

        let key = FlightKey::new(airline, designator, timestamp);
        state.flights.ensure_openable(&key)?;

        self.ledger
            .register_flight_for_insurance(airline, designator, timestamp, true)
            .await?;

        let flight = state.flights.open(key, self.now())?.clone();
        info!("[fs-surety] Flight {} opened for insurance", flight.key);
        Ok(flight)
    }

    async fn request_status(&self, flight: FlightKey, requester: Address) -> SuretyResult<u8> {
        let mut state = self.state.lock().await;
        state.flights.resolvable(&flight)?;

        let mut nonce = state.nonce;
        let slot = SlotSampler::new(&*self.entropy, &mut nonce, self.config.slot_space)
            .draw(&requester);

        let key = RoundKey::new(slot, flight.clone());
        state.nonce = nonce;
        if let Some(previous) = state.rounds.open(&key, requester) {
            if previous.is_open() {
                debug!(
                    "[fs-surety] Open round for slot {} on {} superseded",
                    slot, flight
                );
            }
        }

        crate::metrics::record_round_opened();
        info!(
            "[fs-surety] Status round opened for {} at slot {} by {}",
            flight,
            slot,
            short(&requester)
        );
        self.publish(SuretyEvent::CommitteeBroadcast(StatusRequestedEvent {
            slot,
            flight,
        }))
        .await;
        drop(state);
        Ok(slot)
    }

    async fn submit_claim(
        &self,
        slot: u8,
        flight: FlightKey,
        status: StatusCode,
        reporter: Address,
    ) -> SuretyResult<ClaimTally> {
        let mut state = self.state.lock().await;
        state.committee.ensure_member(&reporter, slot)?;

        let key = RoundKey::new(slot, flight.clone());
        let mut round = state.rounds.open_round(&key)?;

        let tally = round.record_claim(
            reporter,
            status,
            self.config.consensus_quorum,
            self.config.deduplicate_claims,
        );

        let payout = match tally {
            ClaimTally::Closed => {
                return Err(SuretyError::RoundNotOpen {
                    slot,
                    flight: flight.clone(),
                })
            }
            ClaimTally::Duplicate { support } => {
                debug!(
                    "[fs-surety] Repeat claim {} from {} for {} at slot {} ignored (support {})",
                    status,
                    short(&reporter),
                    flight,
                    slot,
                    support
                );
                return Ok(tally);
            }
            ClaimTally::Pending { .. } => None,
            ClaimTally::Quorum { status, .. } => {
                state.flights.resolvable(&flight)?;
                Some(self.settle(&flight, status, state.compensation_factor).await?)
            }
        };

        if payout.is_some() {
            let now = self.now();
            state.flights.resolve(&flight, status, now)?;
        }
        state.rounds.commit(&key, round);

        crate::metrics::record_claim();
        debug!(
            "[fs-surety] Claim {} from {} for {} at slot {}: {:?}",
            status,
            short(&reporter),
            flight,
            slot,
            tally
        );
        self.publish(SuretyEvent::ClaimReported(ClaimReportedEvent {
            slot,
            flight: flight.clone(),
            status,
            reporter,
        }))
        .await;

        if let Some(payout_triggered) = payout {
            crate::metrics::record_round_resolved(&status.to_string());
            info!(
                "[fs-surety] Round for {} at slot {} resolved: {} (payout: {})",
                flight, slot, status, payout_triggered
            );
            self.publish(SuretyEvent::StatusResolved(StatusResolvedEvent {
                slot,
                flight,
                status,
                payout_triggered,
            }))
            .await;
        }
        drop(state);

        Ok(tally)
    }

    async fn flight_status(&self, flight: FlightKey) -> SuretyResult<Flight> {
        self.state
            .lock()
            .await
            .flights
            .get(&flight)
            .cloned()
            .ok_or(SuretyError::FlightNotFound(flight))
    }

    async fn round(&self, slot: u8, flight: FlightKey) -> Option<ConsensusRound> {
        self.state
            .lock()
            .await
            .rounds
            .get(&RoundKey::new(slot, flight))
            .cloned()
    }

    async fn set_compensation_factor(
        &self,
        caller: Address,
        numerator: u64,
        denominator: u64,
    ) -> SuretyResult<()> {
        let mut state = self.state.lock().await;
        if caller != self.config.admin {
            return Err(SuretyError::Unauthorized(caller));
        }
        state.compensation_factor = CompensationFactor::new(numerator, denominator)?;
        info!(
            "[fs-surety] Compensation factor set to {}/{}",
            numerator, denominator
        );
        Ok(())
    }

    async fn compensation_factor(&self) -> CompensationFactor {
        self.state.lock().await.compensation_factor
    }
}
