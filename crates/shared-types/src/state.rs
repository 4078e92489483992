//! # Field State Record
//!
//! The plain-record export of a field's observable state. This is the wire
//! format for snapshot export and merge-import: every member is optional so a
//! partial record is valid input, and absent members serialize away.

use crate::entities::{ComponentBinding, FieldDisplay, FieldPattern};
use crate::feedback::Feedback;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Snapshot of a field.
///
/// JSON `null` deserializes to `None`, which import treats the same as an
/// absent member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<FieldDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validating: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_values: Option<Vec<FieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorator: Option<ComponentBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Feedback>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Feedback>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successes: Option<Vec<Feedback>>,
}

impl FieldState {
    /// Overlay every member `partial` carries onto `self`.
    pub fn merge(&mut self, partial: FieldState) {
        macro_rules! overlay {
            ($($member:ident),* $(,)?) => {
                $(
                    if partial.$member.is_some() {
                        self.$member = partial.$member;
                    }
                )*
            };
        }

        overlay!(
            display_name,
            path,
            display,
            pattern,
            loading,
            validating,
            modified,
            active,
            visited,
            value,
            initial_value,
            required,
            input_value,
            input_values,
            decorator,
            component,
            errors,
            warnings,
            successes,
        );
    }

    /// `self` with `partial` overlaid.
    #[must_use]
    pub fn merged(mut self, partial: FieldState) -> Self {
        self.merge(partial);
        self
    }
}
