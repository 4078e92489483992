//! Form container configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use field_core::domain::FormConfigBuilder;
//!
//! let config = FormConfigBuilder::new()
//!     .pattern(FieldPattern::ReadPretty)
//!     .validating_debounce(Duration::from_millis(250))
//!     .build()
//!     .expect("Valid config");
//! ```

use crate::error::FieldError;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::FieldPattern;
use std::time::Duration;

/// Delay before a running validation becomes visible as `validating`.
pub const DEFAULT_VALIDATING_DEBOUNCE: Duration = Duration::from_millis(100);

/// Upper bound accepted for the validating debounce.
pub const MAX_VALIDATING_DEBOUNCE: Duration = Duration::from_secs(10);

/// Container configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Pattern for fields with no local override and no registered ancestor
    pub pattern: Option<FieldPattern>,
    /// How long a validation must run before `validating` flips on
    pub validating_debounce: Duration,
    /// Lifecycle bus capacity per subscriber
    pub channel_capacity: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            validating_debounce: DEFAULT_VALIDATING_DEBOUNCE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl FormConfig {
    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.channel_capacity == 0 {
            return Err(FieldError::InvalidConfig(
                "channel_capacity cannot be 0".to_string(),
            ));
        }

        if self.validating_debounce > MAX_VALIDATING_DEBOUNCE {
            return Err(FieldError::InvalidConfig(format!(
                "validating_debounce must be at most {:?}, got {:?}",
                MAX_VALIDATING_DEBOUNCE, self.validating_debounce
            )));
        }

        Ok(())
    }

    /// Builder-style method to set the container pattern
    pub fn with_pattern(mut self, pattern: FieldPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Builder-style method to set the validating debounce
    pub fn with_validating_debounce(mut self, debounce: Duration) -> Self {
        self.validating_debounce = debounce;
        self
    }
}

/// Builder for FormConfig with validation
#[derive(Default)]
pub struct FormConfigBuilder {
    pattern: Option<FieldPattern>,
    validating_debounce: Option<Duration>,
    channel_capacity: Option<usize>,
}

impl FormConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container pattern
    pub fn pattern(mut self, pattern: FieldPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Set the validating debounce (at most 10 seconds)
    pub fn validating_debounce(mut self, debounce: Duration) -> Self {
        self.validating_debounce = Some(debounce);
        self
    }

    /// Set the lifecycle bus capacity (must be non-zero)
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<FormConfig, FieldError> {
        let defaults = FormConfig::default();
        let config = FormConfig {
            pattern: self.pattern.or(defaults.pattern),
            validating_debounce: self
                .validating_debounce
                .unwrap_or(defaults.validating_debounce),
            channel_capacity: self.channel_capacity.unwrap_or(defaults.channel_capacity),
        };
        config.validate()?;
        Ok(config)
    }
}
