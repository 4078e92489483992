//! Validation state machine
//!
//! ```text
//! validate(Some(trigger))
//!   set_validating(true)   -- arms the debounce timer
//!   notify validate-start
//!   run engine on rules scoped to trigger, record feedback
//!   set_validating(false)  -- cancels the timer, clears the flag
//!   notify validate-end
//! ```
//!
//! `validate(None)` runs every trigger the validator mentions, in first-seen
//! order, without toggling the flag or notifying.
//!
//! The closing half of a trigger-scoped run lives in `ValidationRun`'s
//! `Drop`, so a run whose future is dropped mid-engine (timeout, `select!`,
//! aborted task) still clears the flag and announces its end.

use form_telemetry::log_field_event;
use shared_bus::LifecycleType;
use shared_types::{Feedback, FeedbackType, TriggerType, ValidateResults};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::domain::field::Field;
use crate::domain::validator::{scoped, trigger_types};

impl Field {
    /// Set the `validating` flag.
    ///
    /// Turning it on is debounced by the container's validating debounce so
    /// that fast validations never flicker; turning it off is immediate. Every
    /// call cancels a pending debounce. Outside a tokio runtime, or once the
    /// field is disposed, the flag is set directly.
    pub fn set_validating(&self, validating: bool) {
        self.requests.lock().cancel_validate();

        if !validating {
            self.state.write().validating = false;
            return;
        }

        let debounce = match self.form() {
            Some(form) => form.validating_debounce(),
            None => crate::domain::config::DEFAULT_VALIDATING_DEBOUNCE,
        };

        let handle = match Handle::try_current() {
            Ok(handle) if !self.is_disposed() && !debounce.is_zero() => handle,
            _ => {
                self.state.write().validating = true;
                return;
            }
        };

        let state = Arc::clone(&self.state);
        let task = handle.spawn(async move {
            tokio::time::sleep(debounce).await;
            state.write().validating = true;
        });
        self.requests.lock().arm_validate(task);
    }

    /// Validate for one trigger, or for every trigger the validator uses.
    pub async fn validate(&self, trigger: Option<TriggerType>) -> ValidateResults {
        match trigger {
            Some(trigger) => {
                let _run = ValidationRun::start(self);
                self.run_validator(trigger).await
            }
            None => {
                let mut results = ValidateResults::new();
                for trigger in trigger_types(&self.descriptions()) {
                    results.merge(self.run_validator(trigger).await);
                }
                results
            }
        }
    }

    /// Run the rules scoped to `trigger` and record the outcome for every
    /// severity.
    async fn run_validator(&self, trigger: TriggerType) -> ValidateResults {
        let Some(form) = self.attached("validate") else {
            return ValidateResults::new();
        };

        let rules = scoped(&self.descriptions(), trigger);
        let results = match form.validator_engine() {
            Some(engine) if !rules.is_empty() => {
                match engine.validate(self, trigger, &rules).await {
                    Ok(results) => results,
                    Err(e) => {
                        log_field_event!(warn, self.identifier(), "Validator engine failed", trigger = %trigger, error = %e);
                        ValidateResults::new()
                    }
                }
            }
            _ => ValidateResults::new(),
        };

        let entries = FeedbackType::ALL
            .iter()
            .map(|feedback_type| Feedback {
                path: self.identifier().to_string(),
                feedback_type: *feedback_type,
                code: feedback_type.validate_code(),
                trigger_type: Some(trigger),
                messages: results.get(*feedback_type).to_vec(),
            })
            .collect();
        form.feedback().update(entries);

        log_field_event!(trace, self.identifier(), "Validation settled", trigger = %trigger, clean = results.is_empty());
        results
    }
}

/// An open trigger-scoped run. Dropping it settles the run.
struct ValidationRun<'a> {
    field: &'a Field,
}

impl<'a> ValidationRun<'a> {
    fn start(field: &'a Field) -> Self {
        field.set_validating(true);
        field.notify(LifecycleType::OnFieldValidateStart);
        Self { field }
    }
}

impl Drop for ValidationRun<'_> {
    fn drop(&mut self) {
        self.field.set_validating(false);
        self.field.notify(LifecycleType::OnFieldValidateEnd);
    }
}
