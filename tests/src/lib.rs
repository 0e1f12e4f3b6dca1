//! # Flight-Surety Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── admission.rs   # Randomized proposal sequences against the ledger
//!     └── flows.rs       # Enrollment → flight → status round → payout
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fs-tests
//! cargo test -p fs-tests integration::flows::
//! ```

#![allow(dead_code)]

pub mod integration;
