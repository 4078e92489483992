//! Shared test fixtures: a small rule engine and event helpers.

use async_trait::async_trait;
use field_core::{Field, ValidatorEngine, ValidatorError, ValidatorRule};
use form_telemetry::{init_telemetry, TelemetryConfig};
use parking_lot::Mutex;
use shared_bus::{LifecycleType, Subscription};
use shared_types::{FeedbackType, TriggerType, ValidateResults};
use std::sync::Once;
use std::time::Duration;

static LOGGING: Once = Once::new();

/// Install a quiet global subscriber once per test binary.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::from_env()
        };
        // Another harness may already own the global subscriber.
        let _ = init_telemetry(config);
    });
}

/// Understands `required`, `format: "email"` and a `minLength` rule.
///
/// Fails with an engine error on `format: "explode"`.
#[derive(Default)]
pub struct RuleEngine {
    delay: Duration,
    calls: Mutex<Vec<(String, TriggerType)>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    /// Every `(path, trigger)` the engine was invoked with.
    pub fn calls(&self) -> Vec<(String, TriggerType)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ValidatorEngine for RuleEngine {
    async fn validate(
        &self,
        field: &Field,
        trigger: TriggerType,
        rules: &[ValidatorRule],
    ) -> Result<ValidateResults, ValidatorError> {
        self.calls
            .lock()
            .push((field.identifier().to_string(), trigger));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let value = field.value();
        let text = value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let empty = value.as_ref().map_or(true, |v| v.is_null()) || text.is_empty();

        let mut results = ValidateResults::new();
        for rule in rules {
            let message = |fallback: &str| rule.message.clone().unwrap_or_else(|| fallback.to_string());

            if rule.required == Some(true) && empty {
                results.push(FeedbackType::Error, vec![message("This field is required")]);
            }
            match rule.format.as_deref() {
                Some("explode") => return Err(ValidatorError::Failed("engine exploded".into())),
                Some("email") if !empty && !text.contains('@') => {
                    results.push(FeedbackType::Error, vec![message("Invalid email")]);
                }
                Some("email") | None => {}
                Some(other) => return Err(ValidatorError::UnknownFormat(other.to_string())),
            }
            if let Some(min) = rule.rules.get("minLength").and_then(|v| v.as_u64()) {
                if !empty && (text.chars().count() as u64) < min {
                    results.push(FeedbackType::Warning, vec![message("Too short")]);
                }
            }
        }
        Ok(results)
    }
}

/// Kinds of every pending event on `sub`.
pub fn kinds(sub: &mut Subscription) -> Vec<LifecycleType> {
    sub.drain().into_iter().map(|e| e.kind).collect()
}

/// Count pending events of one kind.
pub fn count(sub: &mut Subscription, kind: LifecycleType) -> usize {
    kinds(sub).into_iter().filter(|k| *k == kind).count()
}
