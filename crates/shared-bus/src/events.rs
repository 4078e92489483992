//! # Lifecycle Events
//!
//! Closed set of notifications a field (or the form on its behalf) emits to
//! the owning container.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every lifecycle notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleType {
    // =========================================================================
    // FIELD LIFECYCLE
    // =========================================================================
    /// Field constructed and registered.
    OnFieldInit,
    /// Attached by the rendering layer.
    OnFieldMount,
    /// Detached by the rendering layer.
    OnFieldUnmount,
    /// Gained focus.
    OnFieldFocus,
    /// Lost focus.
    OnFieldBlur,
    /// Feedback and flags cleared, value restored or cleared.
    OnFieldReset,

    // =========================================================================
    // FIELD VALUES (reactive)
    // =========================================================================
    /// Resolved value changed.
    OnFieldValueChange,
    /// Resolved initial value changed.
    OnFieldInitialValueChange,
    /// Raw input event received.
    OnFieldInputValueChange,

    // =========================================================================
    // VALIDATION
    // =========================================================================
    /// A trigger-scoped validation run started.
    OnFieldValidateStart,
    /// A trigger-scoped validation run settled.
    OnFieldValidateEnd,

    // =========================================================================
    // FORM (emitted alongside field events)
    // =========================================================================
    /// Some value in the form changed.
    OnFormValuesChange,
    /// Some initial value in the form changed.
    OnFormInitialValuesChange,
    /// Some field received input.
    OnFormInputChange,
}

impl LifecycleType {
    /// Topic for subscription filtering.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::OnFieldInit
            | Self::OnFieldMount
            | Self::OnFieldUnmount
            | Self::OnFieldFocus
            | Self::OnFieldBlur
            | Self::OnFieldReset => EventTopic::FieldLifecycle,
            Self::OnFieldValueChange
            | Self::OnFieldInitialValueChange
            | Self::OnFieldInputValueChange => EventTopic::FieldValues,
            Self::OnFieldValidateStart | Self::OnFieldValidateEnd => EventTopic::Validation,
            Self::OnFormValuesChange
            | Self::OnFormInitialValuesChange
            | Self::OnFormInputChange => EventTopic::Form,
        }
    }

    /// Whether the event concerns the whole form rather than one field.
    #[must_use]
    pub fn is_form_level(&self) -> bool {
        self.topic() == EventTopic::Form
    }

    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnFieldInit => "onFieldInit",
            Self::OnFieldMount => "onFieldMount",
            Self::OnFieldUnmount => "onFieldUnmount",
            Self::OnFieldFocus => "onFieldFocus",
            Self::OnFieldBlur => "onFieldBlur",
            Self::OnFieldReset => "onFieldReset",
            Self::OnFieldValueChange => "onFieldValueChange",
            Self::OnFieldInitialValueChange => "onFieldInitialValueChange",
            Self::OnFieldInputValueChange => "onFieldInputValueChange",
            Self::OnFieldValidateStart => "onFieldValidateStart",
            Self::OnFieldValidateEnd => "onFieldValidateEnd",
            Self::OnFormValuesChange => "onFormValuesChange",
            Self::OnFormInitialValuesChange => "onFormInitialValuesChange",
            Self::OnFormInputChange => "onFormInputChange",
        }
    }
}

impl fmt::Display for LifecycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification delivered to the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// What happened.
    pub kind: LifecycleType,
    /// Canonical path of the originating field. For form-level events this is
    /// the field whose change caused it.
    pub path: String,
}

impl LifecycleEvent {
    /// Create an event for the field at `path`.
    #[must_use]
    pub fn new(kind: LifecycleType, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        self.kind.topic()
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Init, mount, unmount, focus, blur, reset.
    FieldLifecycle,
    /// Value, initial value and input changes.
    FieldValues,
    /// Validate start/end.
    Validation,
    /// Form-level aggregates.
    Form,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<LifecycleType>,
    /// Field paths to include. Empty means all paths.
    pub paths: Vec<String>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Default::default()
        }
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<LifecycleType>) -> Self {
        Self {
            kinds,
            ..Default::default()
        }
    }

    /// Builder-style method to restrict to field paths.
    #[must_use]
    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = paths;
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LifecycleEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let kind_match = self.kinds.is_empty() || self.kinds.contains(&event.kind);

        let path_match = self.paths.is_empty() || self.paths.contains(&event.path);

        topic_match && kind_match && path_match
    }
}
