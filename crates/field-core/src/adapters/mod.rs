//! Adapters Layer
//!
//! In-memory implementations of the outbound ports:
//! - `InMemoryForm`: value trees, field registry, batching, lifecycle bus
//! - `InMemoryFeedbackStore`: slot-keyed feedback entries

pub mod feedback_store;
pub mod memory_form;

pub use feedback_store::InMemoryFeedbackStore;
pub use memory_form::InMemoryForm;
