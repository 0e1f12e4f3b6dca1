//! Domain layer for the surety subsystem
//!
//! - admission: bootstrap-then-majority airline admission rule
//! - flight: flight registry and compensation factor
//! - oracle: reporter committee slots
//! - round: per-(slot, flight) status consensus rounds
//! - entropy: nonce-windowed slot sampling

mod admission;
mod config;
mod entropy;
mod error;
mod flight;
mod oracle;
mod round;

pub use admission::*;
pub use config::*;
pub use entropy::*;
pub use error::*;
pub use flight::*;
pub use oracle::*;
pub use round::*;
