//! # Shared Types Crate
//!
//! Primitives shared by the surety subsystem, its adapters and the test suite.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account, hash and flight-key types are defined
//!   once here and re-used by every port.
//! - **Structural Keys**: composite keys are hashed from length-prefixed fields,
//!   never from concatenated strings.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
