//! # Field State Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared engines and helpers
//! └── integration/      # Field ↔ form ↔ bus flows
//!     ├── field_lifecycle.rs
//!     ├── visibility.rs
//!     ├── validation_flow.rs
//!     └── snapshot_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fc-tests
//!
//! # By flow
//! cargo test -p fc-tests integration::visibility
//! ```

#![allow(dead_code)]

pub mod fixtures;
