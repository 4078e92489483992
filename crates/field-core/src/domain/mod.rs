//! Domain Layer - Field state logic
//!
//! This layer contains:
//! - The `Field` node and its mutators
//! - Value resolution (pure functions)
//! - Visibility cache policy
//! - Validator descriptions and the validation state machine
//! - Snapshot export/import
//! - Configuration
//!
//! RULES:
//! - No locks held across container calls or awaits
//! - Resolution functions take explicit inputs

pub mod cache;
pub mod config;
pub mod field;
pub mod reaction;
pub mod requests;
pub mod resolve;
pub mod snapshot;
pub mod validation;
pub mod validator;

pub use cache::{plan_display_transition, DisplayTransition, FieldCaches};
pub use config::{FormConfig, FormConfigBuilder, DEFAULT_VALIDATING_DEBOUNCE, MAX_VALIDATING_DEBOUNCE};
pub use field::{Field, FieldProps, FieldResetOptions};
pub use reaction::Reaction;
pub use requests::{FieldRequests, PendingRequest};
pub use resolve::{resolve_display, resolve_initial_value, resolve_pattern, resolve_value};
pub use snapshot::{Middleware, DISPLAY_NAME};
pub use validator::{
    derive_required, parse_validator_descriptions, scoped, trigger_types, with_required,
    FieldValidator, ValidatorItem, ValidatorRule,
};
