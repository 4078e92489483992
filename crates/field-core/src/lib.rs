//! # Field Core
//!
//! Reactive state core for one form input ("field") inside a larger
//! form-state tree.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): field state logic
//!   - `Field`: path identity, local overrides, flags, mutators, lifecycle
//!   - `resolve`: value / initial value / display / pattern resolution
//!   - `cache`: hide/show value stash
//!   - `validator`, `validation`: rule descriptions and the validating state machine
//!   - `snapshot`: `to_json` / `reduce` / `from_json`
//!   - `FormConfig`, `FormConfigBuilder`: container configuration
//!
//! - **Ports Layer** (`ports/`): what a field needs from its form
//!   - `FormContainer`: value trees, registry, notifications, batching
//!   - `FeedbackStore`: path/severity-indexed feedback
//!   - `ValidatorEngine`: turns rules into feedback
//!
//! - **Adapters Layer** (`adapters/`): in-memory implementations
//!   - `InMemoryForm`, `InMemoryFeedbackStore`
//!
//! ## Resolution
//!
//! ```text
//! value         = modified ? stored : valid(stored) ?? valid(initialValue) ?? cache.value
//! initialValue  = valid(storedInitial) ?? cache.initialValue
//! display       = local ?? parent.display ?? "visibility"
//! pattern       = local ?? parent.pattern ?? form.pattern ?? "editable"
//! required      = any(description.required)
//! ```
//!
//! "parent" is the nearest *registered* ancestor; unregistered levels are
//! skipped.
//!
//! ## Usage Example
//!
//! ```ignore
//! use field_core::{FieldProps, InMemoryForm};
//! use serde_json::json;
//!
//! let form = InMemoryForm::new();
//! let name = form.create_field("user.name", FieldProps::new().with_required(true))?;
//!
//! name.on_input(vec![json!("ann")]).await;
//! name.set_display(FieldDisplay::Removed);   // value stashed, storage cleared
//! name.set_display(FieldDisplay::Visible);   // value restored
//!
//! let snapshot = name.to_json();
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::{InMemoryFeedbackStore, InMemoryForm};
pub use domain::{
    Field, FieldCaches, FieldProps, FieldResetOptions, FieldValidator, FormConfig,
    FormConfigBuilder, Middleware, ValidatorItem, ValidatorRule,
};
pub use error::{FieldError, ValidatorError};
pub use ports::{BatchScope, FeedbackStore, FormContainer, ValidatorEngine};
