//! Visibility cache policy
//!
//! A field keeps private copies of its value and initial value. The value copy
//! holds the stashed value while the field is removed (`display: none`).

use shared_types::{FieldDisplay, FieldValue};

/// Private side channel of a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCaches {
    pub value: Option<FieldValue>,
    pub initial_value: Option<FieldValue>,
}

/// What a display change does to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTransition {
    /// Write the cached value back to storage and clear the cache.
    Restore,
    /// Cache the current value and clear it from storage.
    Stash,
    /// Record the override only.
    Override,
}

/// Decide the transition from the currently resolved display to `target`.
///
/// Removing an already removed field does not stash again, so the cached value
/// survives repeated hides.
#[must_use]
pub fn plan_display_transition(current: FieldDisplay, target: FieldDisplay) -> DisplayTransition {
    match (current, target) {
        (FieldDisplay::Removed, FieldDisplay::Visible) => DisplayTransition::Restore,
        (FieldDisplay::Removed, FieldDisplay::Removed) => DisplayTransition::Override,
        (_, FieldDisplay::Removed) => DisplayTransition::Stash,
        _ => DisplayTransition::Override,
    }
}
