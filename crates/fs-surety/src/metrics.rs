//! # Surety Metrics
//!
//! Prometheus metrics for monitoring admission and status consensus.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! fs-surety = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `surety_admissions_total` - Airline proposals by outcome
//! - `surety_reporters_enrolled_total` - Reporter enrollments
//! - `surety_rounds_opened_total` - Status rounds opened
//! - `surety_claims_submitted_total` - Accepted reporter claims
//! - `surety_rounds_resolved_total` - Rounds closed at quorum, by status

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref ADMISSIONS: IntCounterVec = register_int_counter_vec!(
        "surety_admissions_total",
        "Airline admission proposals by outcome",
        &["outcome"]
    )
    .expect("Failed to create ADMISSIONS metric");

    pub static ref REPORTERS_ENROLLED: IntCounter = register_int_counter!(
        "surety_reporters_enrolled_total",
        "Total number of reporter enrollments"
    )
    .expect("Failed to create REPORTERS_ENROLLED metric");

    pub static ref ROUNDS_OPENED: IntCounter = register_int_counter!(
        "surety_rounds_opened_total",
        "Total number of status rounds opened"
    )
    .expect("Failed to create ROUNDS_OPENED metric");

    pub static ref CLAIMS_SUBMITTED: IntCounter = register_int_counter!(
        "surety_claims_submitted_total",
        "Total number of reporter claims recorded"
    )
    .expect("Failed to create CLAIMS_SUBMITTED metric");

    pub static ref ROUNDS_RESOLVED: IntCounterVec = register_int_counter_vec!(
        "surety_rounds_resolved_total",
        "Rounds closed at quorum, by resolved status",
        &["status"]
    )
    .expect("Failed to create ROUNDS_RESOLVED metric");
}

#[cfg(feature = "metrics")]
pub fn record_admission(accepted: bool) {
    let outcome = if accepted { "accepted" } else { "pending" };
    ADMISSIONS.with_label_values(&[outcome]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_enrollment() {
    REPORTERS_ENROLLED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_round_opened() {
    ROUNDS_OPENED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_claim() {
    CLAIMS_SUBMITTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_round_resolved(status: &str) {
    ROUNDS_RESOLVED.with_label_values(&[status]).inc();
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_admission(_accepted: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_enrollment() {}

#[cfg(not(feature = "metrics"))]
pub fn record_round_opened() {}

#[cfg(not(feature = "metrics"))]
pub fn record_claim() {}

#[cfg(not(feature = "metrics"))]
pub fn record_round_resolved(_status: &str) {}
