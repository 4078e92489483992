//! Ports Layer
//!
//! Defines the interfaces (traits) a field depends on. The in-memory adapters
//! implement them; a real form engine supplies its own.

pub mod outbound;

pub use outbound::{BatchScope, FeedbackStore, FormContainer, ValidatorEngine};
