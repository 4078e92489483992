//! # Field Vocabulary
//!
//! Display and pattern states, validator trigger types and component bindings.
//! Wire names follow the camelCase strings used in snapshots.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Visibility class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldDisplay {
    /// Rendered and submitted.
    #[default]
    #[serde(rename = "visibility")]
    Visible,
    /// Present in the tree but not rendered.
    #[serde(rename = "hidden")]
    Hidden,
    /// Removed: value is stashed in the field cache while in this state.
    #[serde(rename = "none")]
    Removed,
}

impl FieldDisplay {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visibility",
            Self::Hidden => "hidden",
            Self::Removed => "none",
        }
    }
}

impl fmt::Display for FieldDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction mode of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldPattern {
    #[default]
    Editable,
    ReadOnly,
    Disabled,
    ReadPretty,
}

impl FieldPattern {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editable => "editable",
            Self::ReadOnly => "readOnly",
            Self::Disabled => "disabled",
            Self::ReadPretty => "readPretty",
        }
    }
}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event category a validator rule is scoped to.
///
/// Rules that do not name one run on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerType {
    #[default]
    OnInput,
    OnFocus,
    OnBlur,
}

impl TriggerType {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnInput => "onInput",
            Self::OnFocus => "onFocus",
            Self::OnBlur => "onBlur",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendering-layer component reference plus its props.
///
/// The component itself is opaque to the core; it is carried by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl ComponentBinding {
    /// Binding with a component and no props.
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            props: Map::new(),
        }
    }

    /// Builder-style method to add a prop.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// Shallow-merge `props` over the existing props.
    pub fn merge_props(&mut self, props: Map<String, Value>) {
        self.props.extend(props);
    }
}
