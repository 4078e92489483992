//! # Shared Types Crate
//!
//! Vocabulary shared by the field core, the lifecycle bus and container
//! adapters.
//!
//! ## Contents
//!
//! - **Paths**: `FormPath`, canonical dotted addressing with ancestor walks
//! - **Values**: `FieldValue`, the `is_valid` predicate, path-indexed tree access
//! - **Entities**: `FieldDisplay`, `FieldPattern`, `TriggerType`, `ComponentBinding`
//! - **Feedback**: `Feedback`, `FeedbackQuery`, `ValidateResults`
//! - **State**: `FieldState`, the snapshot wire record

pub mod entities;
pub mod errors;
pub mod feedback;
pub mod path;
pub mod state;
pub mod value;

pub use entities::*;
pub use errors::*;
pub use feedback::*;
pub use path::{FormPath, PathSegment};
pub use state::FieldState;
pub use value::{get_in, is_valid, set_in, valid, FieldValue, MAX_DENSE_INDEX};
