//! # Feedback
//!
//! Severity-tagged messages attached to a path. Entries are owned by the
//! container's feedback store; fields only mediate reads and writes.

use crate::entities::TriggerType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Feedback severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackType {
    Error,
    Warning,
    Success,
}

impl FeedbackType {
    /// All severities, in display order.
    pub const ALL: [FeedbackType; 3] = [Self::Error, Self::Warning, Self::Success];

    /// Code used when a field writes this severity directly.
    #[must_use]
    pub fn effect_code(&self) -> FeedbackCode {
        match self {
            Self::Error => FeedbackCode::EffectError,
            Self::Warning => FeedbackCode::EffectWarning,
            Self::Success => FeedbackCode::EffectSuccess,
        }
    }

    /// Code used when a validator run records this severity.
    #[must_use]
    pub fn validate_code(&self) -> FeedbackCode {
        match self {
            Self::Error => FeedbackCode::ValidateError,
            Self::Warning => FeedbackCode::ValidateWarning,
            Self::Success => FeedbackCode::ValidateSuccess,
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        })
    }
}

/// Origin of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCode {
    /// Written by a field mutator (`set_errors` and friends).
    EffectError,
    EffectWarning,
    EffectSuccess,
    /// Recorded from a validator run.
    ValidateError,
    ValidateWarning,
    ValidateSuccess,
}

/// One feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Canonical path the entry belongs to.
    pub path: String,
    /// Severity.
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    /// Who wrote it.
    pub code: FeedbackCode,
    /// Trigger of the validator run that produced it, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    /// Messages; an empty list on update removes the entry.
    #[serde(default)]
    pub messages: Vec<String>,
}

impl Feedback {
    /// Whether `other` addresses the same store slot.
    #[must_use]
    pub fn same_slot(&self, other: &Feedback) -> bool {
        self.path == other.path
            && self.feedback_type == other.feedback_type
            && self.code == other.code
            && self.trigger_type == other.trigger_type
    }
}

/// Store query. Unset members match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackQuery {
    pub path: Option<String>,
    pub feedback_type: Option<FeedbackType>,
    pub code: Option<FeedbackCode>,
    pub trigger_type: Option<TriggerType>,
}

impl FeedbackQuery {
    /// Everything recorded for `path`.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Builder-style method to restrict severity.
    #[must_use]
    pub fn with_type(mut self, feedback_type: FeedbackType) -> Self {
        self.feedback_type = Some(feedback_type);
        self
    }

    /// Builder-style method to restrict origin.
    #[must_use]
    pub fn with_code(mut self, code: FeedbackCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Builder-style method to restrict trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    /// Whether an entry matches this query.
    #[must_use]
    pub fn matches(&self, entry: &Feedback) -> bool {
        self.path.as_ref().map_or(true, |p| *p == entry.path)
            && self.feedback_type.map_or(true, |t| t == entry.feedback_type)
            && self.code.map_or(true, |c| c == entry.code)
            && self
                .trigger_type
                .map_or(true, |t| Some(t) == entry.trigger_type)
    }
}

/// Validation outcome: messages keyed by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidateResults {
    results: BTreeMap<FeedbackType, Vec<String>>,
}

impl ValidateResults {
    /// Empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to append messages for a severity.
    #[must_use]
    pub fn with(mut self, feedback_type: FeedbackType, messages: Vec<String>) -> Self {
        self.push(feedback_type, messages);
        self
    }

    /// Append messages for a severity.
    pub fn push(&mut self, feedback_type: FeedbackType, messages: Vec<String>) {
        self.results.entry(feedback_type).or_default().extend(messages);
    }

    /// Concatenate another outcome into this one, per severity.
    pub fn merge(&mut self, other: ValidateResults) {
        for (feedback_type, messages) in other.results {
            self.push(feedback_type, messages);
        }
    }

    /// Messages for a severity.
    #[must_use]
    pub fn get(&self, feedback_type: FeedbackType) -> &[String] {
        self.results
            .get(&feedback_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether no severity carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.values().all(Vec::is_empty)
    }

    /// Iterate severities that were reported.
    pub fn iter(&self) -> impl Iterator<Item = (FeedbackType, &[String])> {
        self.results.iter().map(|(t, m)| (*t, m.as_slice()))
    }
}
