//! Adapters layer (Hexagonal Architecture)

mod entropy;
mod event_bus;
mod ledger;

pub use entropy::*;
pub use event_bus::*;
pub use ledger::*;
