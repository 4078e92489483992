//! Validator descriptions
//!
//! A field validator is a format name, a rule object, or a list mixing both.
//! The core never compiles rules into checks; it only normalizes them into
//! descriptions, derives `required`, and scopes rules to trigger types before
//! handing them to the container's validator engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::TriggerType;

/// One rule object.
///
/// Keys the core understands are typed; everything else is kept verbatim for
/// the validator engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rules: Map<String, Value>,
}

impl ValidatorRule {
    /// A rule carrying only the `required` key.
    #[must_use]
    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    /// A rule checking a named format.
    #[must_use]
    pub fn format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..Default::default()
        }
    }

    /// Builder-style method to scope the rule to a trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    /// Builder-style method to set the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builder-style method to add an engine-specific rule.
    #[must_use]
    pub fn with_rule(mut self, key: impl Into<String>, value: Value) -> Self {
        self.rules.insert(key.into(), value);
        self
    }

    /// Trigger the rule runs on.
    #[must_use]
    pub fn trigger(&self) -> TriggerType {
        self.trigger_type.unwrap_or_default()
    }
}

/// An element of a validator list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatorItem {
    Format(String),
    Rule(ValidatorRule),
}

impl ValidatorItem {
    fn to_rule(&self) -> ValidatorRule {
        match self {
            Self::Format(format) => ValidatorRule::format(format.clone()),
            Self::Rule(rule) => rule.clone(),
        }
    }
}

/// A field's validator as configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValidator {
    Format(String),
    Rule(ValidatorRule),
    Rules(Vec<ValidatorItem>),
}

impl From<ValidatorRule> for FieldValidator {
    fn from(rule: ValidatorRule) -> Self {
        Self::Rule(rule)
    }
}

impl From<Vec<ValidatorItem>> for FieldValidator {
    fn from(items: Vec<ValidatorItem>) -> Self {
        Self::Rules(items)
    }
}

/// Normalize a validator into rule descriptions, defaulting the trigger.
#[must_use]
pub fn parse_validator_descriptions(validator: Option<&FieldValidator>) -> Vec<ValidatorRule> {
    let rules = match validator {
        None => Vec::new(),
        Some(FieldValidator::Format(format)) => vec![ValidatorRule::format(format.clone())],
        Some(FieldValidator::Rule(rule)) => vec![rule.clone()],
        Some(FieldValidator::Rules(items)) => items.iter().map(ValidatorItem::to_rule).collect(),
    };

    rules
        .into_iter()
        .map(|mut rule| {
            rule.trigger_type = Some(rule.trigger());
            rule
        })
        .collect()
}

/// True iff any description sets `required: true`.
#[must_use]
pub fn derive_required(descriptions: &[ValidatorRule]) -> bool {
    descriptions.iter().any(|d| d.required == Some(true))
}

/// Merge a `required` flag into an existing validator.
///
/// Rules that already carry the key are updated in place; otherwise the flag
/// is appended as its own rule.
#[must_use]
pub fn with_required(validator: Option<FieldValidator>, required: bool) -> FieldValidator {
    match validator {
        None => FieldValidator::Rules(vec![ValidatorItem::Rule(ValidatorRule::required(required))]),
        Some(FieldValidator::Format(format)) => FieldValidator::Rules(vec![
            ValidatorItem::Format(format),
            ValidatorItem::Rule(ValidatorRule::required(required)),
        ]),
        Some(FieldValidator::Rule(mut rule)) => {
            rule.required = Some(required);
            FieldValidator::Rule(rule)
        }
        Some(FieldValidator::Rules(mut items)) => {
            let mut updated = false;
            for item in &mut items {
                if let ValidatorItem::Rule(rule) = item {
                    if rule.required.is_some() {
                        rule.required = Some(required);
                        updated = true;
                    }
                }
            }
            if !updated {
                items.push(ValidatorItem::Rule(ValidatorRule::required(required)));
            }
            FieldValidator::Rules(items)
        }
    }
}

/// Distinct trigger types, in first-seen order.
#[must_use]
pub fn trigger_types(descriptions: &[ValidatorRule]) -> Vec<TriggerType> {
    let mut triggers = Vec::new();
    for trigger in descriptions.iter().map(ValidatorRule::trigger) {
        if !triggers.contains(&trigger) {
            triggers.push(trigger);
        }
    }
    triggers
}

/// Descriptions scoped to one trigger.
#[must_use]
pub fn scoped(descriptions: &[ValidatorRule], trigger: TriggerType) -> Vec<ValidatorRule> {
    descriptions
        .iter()
        .filter(|d| d.trigger() == trigger)
        .cloned()
        .collect()
}
