//! # fs-surety
//!
//! Decision logic for a flight-delay insurance platform.
//!
//! ## Architecture
//!
//! Two coupled consensus mechanisms sit in front of an external ledger:
//!
//! - **Airline admission**: while fewer than four airlines are registered
//!   every proposal from an activated airline admits its candidate. After
//!   that a candidate needs votes from half of the registered airlines.
//! - **Flight status consensus**: a status request samples one of ten
//!   committee slots. Reporters enrolled on that slot submit claims and the
//!   first status backed by three claims resolves the flight.
//!
//! ```text
//! request_status ──CommitteeBroadcast──→ reporters (slot s)
//!                                            │ submit_claim × n
//!                                            ↓
//!                     quorum? ──→ Flight Registry ──→ Ledger Gateway
//!                                  (landed=true)     (close sales, credit insurees)
//! ```
//!
//! Balances, purchases and payouts belong to the ledger and are reached only
//! through [`ports::LedgerGateway`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fs_surety::{SuretyService, SuretyDependencies, SuretyConfig, SuretyApi};
//!
//! let service = SuretyService::new(SuretyDependencies {
//!     ledger,
//!     entropy,
//!     event_bus,
//!     config: SuretyConfig::with_admin(admin),
//! })?;
//!
//! let slot = service.request_status(flight.clone(), passenger).await?;
//! service.submit_claim(slot, flight, StatusCode::LateAirline, reporter).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;
mod state;

// Re-export main types
pub use adapters::{BlockHashEntropy, FixedEntropy, InMemoryEventBus, InMemoryLedger, OsEntropy};
pub use domain::{
    AdmissionOutcome, AdmissionRule, ClaimTally, CompensationFactor, ConsensusRound, Flight,
    Reporter, RoundKey, SuretyConfig, SuretyError, SuretyResult, SLOTS_PER_REPORTER,
};
pub use events::SuretyEvent;
pub use ports::{EntropySource, EventBus, LedgerError, LedgerGateway, SuretyApi, TimeSource};
pub use service::{SuretyDependencies, SuretyService};
