//! Published events (Outgoing)

use serde::{Deserialize, Serialize};
use shared_types::{Address, FlightKey, StatusCode};

/// Events observable by reporters and insurance front-ends
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuretyEvent {
    /// A round opened; reporters holding `slot` should answer
    CommitteeBroadcast(StatusRequestedEvent),
    /// A reporter's claim was recorded
    ClaimReported(ClaimReportedEvent),
    /// A round reached quorum
    StatusResolved(StatusResolvedEvent),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequestedEvent {
    pub slot: u8,
    pub flight: FlightKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReportedEvent {
    pub slot: u8,
    pub flight: FlightKey,
    pub status: StatusCode,
    pub reporter: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResolvedEvent {
    pub slot: u8,
    pub flight: FlightKey,
    pub status: StatusCode,
    /// Whether insurees were credited for an airline-caused delay
    pub payout_triggered: bool,
}

impl SuretyEvent {
    /// Metric/log label for the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SuretyEvent::CommitteeBroadcast(_) => "committee_broadcast",
            SuretyEvent::ClaimReported(_) => "claim_reported",
            SuretyEvent::StatusResolved(_) => "status_resolved",
        }
    }
}
