//! Cross-crate integration scenarios.

pub mod admission;
pub mod flows;
