//! Outbound Ports (Driven Ports)
//!
//! These traits define what a field needs from the form that owns it. The
//! field holds the container through a non-owning reference and never locks
//! container state across calls.

use async_trait::async_trait;
use shared_bus::LifecycleEvent;
use shared_types::{Feedback, FeedbackQuery, FieldPattern, FieldValue, FormPath, TriggerType, ValidateResults};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::config::DEFAULT_VALIDATING_DEBOUNCE;
use crate::domain::field::Field;
use crate::domain::snapshot::Middleware;
use crate::domain::validator::ValidatorRule;
use crate::error::ValidatorError;

/// Owning form container (Driven Port)
pub trait FormContainer: Send + Sync {
    /// Read the stored value at `path`.
    fn get_values_in(&self, path: &FormPath) -> Option<FieldValue>;

    /// Write (`Some`) or remove (`None`) the stored value at `path`.
    fn set_values_in(&self, path: &FormPath, value: Option<FieldValue>);

    /// Read the stored initial value at `path`.
    fn get_initial_values_in(&self, path: &FormPath) -> Option<FieldValue>;

    /// Write or remove the stored initial value at `path`.
    fn set_initial_values_in(&self, path: &FormPath, value: Option<FieldValue>);

    /// Registry lookup by canonical identifier.
    fn field(&self, identifier: &str) -> Option<Arc<Field>>;

    /// Shared feedback collection.
    fn feedback(&self) -> &dyn FeedbackStore;

    /// Deliver a lifecycle event.
    fn notify(&self, event: LifecycleEvent);

    /// Default pattern for fields without an override or ancestor.
    fn pattern(&self) -> Option<FieldPattern>;

    /// Ordered reduction functions applied by [`Field::reduce`].
    fn middlewares(&self) -> Vec<Middleware>;

    /// Set the form-level modified flag.
    fn set_modified(&self, modified: bool);

    /// Open a mutation batch.
    fn begin_batch(&self);

    /// Close a mutation batch. Closing the outermost batch settles every
    /// registered field.
    fn end_batch(&self);

    /// Engine that runs validator rules, if the form has one.
    fn validator_engine(&self) -> Option<Arc<dyn ValidatorEngine>>;

    /// Delay before a running validation shows as `validating`.
    fn validating_debounce(&self) -> Duration {
        DEFAULT_VALIDATING_DEBOUNCE
    }
}

/// Feedback collection keyed by path, severity, code and trigger (Driven Port)
pub trait FeedbackStore: Send + Sync {
    /// Entries matching `query`, in insertion order.
    fn find(&self, query: &FeedbackQuery) -> Vec<Feedback>;

    /// Upsert each entry into its slot; an entry with no messages removes the
    /// slot.
    fn update(&self, entries: Vec<Feedback>);

    /// Remove every entry matching `query`.
    fn clear(&self, query: &FeedbackQuery);
}

/// Validator engine (Driven Port)
///
/// Turns rule descriptions into feedback. The rules passed are already scoped
/// to `trigger`.
#[async_trait]
pub trait ValidatorEngine: Send + Sync {
    async fn validate(
        &self,
        field: &Field,
        trigger: TriggerType,
        rules: &[ValidatorRule],
    ) -> Result<ValidateResults, ValidatorError>;
}

/// RAII mutation batch. Closes on drop.
pub struct BatchScope {
    form: Arc<dyn FormContainer>,
}

impl BatchScope {
    /// Open a batch on `form`.
    pub fn open(form: Arc<dyn FormContainer>) -> Self {
        form.begin_batch();
        Self { form }
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        self.form.end_batch();
    }
}
