//! In-memory form container.
//!
//! Holds the value trees, the field registry, the feedback store and a
//! lifecycle bus. Every notification a field sends is published on the bus.

use form_telemetry::log_form_event;
use parking_lot::{Mutex, RwLock};
use serde_json::Map;
use shared_bus::{
    EventFilter, EventStream, InMemoryLifecycleBus, LifecycleEvent, LifecyclePublisher,
    Subscription,
};
use shared_types::{get_in, set_in, FieldPattern, FieldValue, FormPath};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::adapters::feedback_store::InMemoryFeedbackStore;
use crate::domain::config::FormConfig;
use crate::domain::field::{Field, FieldProps};
use crate::domain::snapshot::Middleware;
use crate::error::FieldError;
use crate::ports::{BatchScope, FeedbackStore, FormContainer, ValidatorEngine};

/// Reference form container.
pub struct InMemoryForm {
    config: FormConfig,
    values: RwLock<FieldValue>,
    initial_values: RwLock<FieldValue>,
    fields: RwLock<BTreeMap<String, Arc<Field>>>,
    feedback: InMemoryFeedbackStore,
    bus: Arc<InMemoryLifecycleBus>,
    modified: AtomicBool,
    middlewares: RwLock<Vec<Middleware>>,
    validator: RwLock<Option<Arc<dyn ValidatorEngine>>>,
    batch_depth: Mutex<usize>,
    this: Weak<InMemoryForm>,
}

impl InMemoryForm {
    /// Create a form with the default configuration.
    pub fn new() -> Arc<Self> {
        Self::build(FormConfig::default())
    }

    /// Create a form from a validated configuration.
    pub fn with_config(config: FormConfig) -> Result<Arc<Self>, FieldError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: FormConfig) -> Arc<Self> {
        let bus = Arc::new(InMemoryLifecycleBus::with_capacity(config.channel_capacity));
        Arc::new_cyclic(|this| Self {
            config,
            values: RwLock::new(FieldValue::Object(Map::new())),
            initial_values: RwLock::new(FieldValue::Object(Map::new())),
            fields: RwLock::new(BTreeMap::new()),
            feedback: InMemoryFeedbackStore::new(),
            bus,
            modified: AtomicBool::new(false),
            middlewares: RwLock::new(Vec::new()),
            validator: RwLock::new(None),
            batch_depth: Mutex::new(0),
            this: this.clone(),
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Bind `path` to a field, creating it on first use.
    ///
    /// Binding a path that is already registered returns the existing field
    /// and ignores `props`.
    pub fn create_field(&self, path: &str, props: FieldProps) -> Result<Arc<Field>, FieldError> {
        let path = FormPath::parse(path)?;
        let identifier = path.to_string();

        if let Some(existing) = self.fields.read().get(&identifier) {
            return Ok(Arc::clone(existing));
        }

        let form: Weak<dyn FormContainer> = self.this.clone();
        let field = Field::new(path, props, form);

        let mut fields = self.fields.write();
        if let Some(existing) = fields.get(&identifier) {
            let existing = Arc::clone(existing);
            drop(fields);
            field.dispose();
            return Ok(existing);
        }
        fields.insert(identifier.clone(), Arc::clone(&field));
        drop(fields);

        log_form_event!(debug, "Field registered", path = %identifier);
        Ok(field)
    }

    /// Unregister and dispose the field at `path`.
    pub fn remove_field(&self, path: &str) -> Option<Arc<Field>> {
        let identifier = FormPath::parse(path).ok()?.to_string();
        let field = self.fields.write().remove(&identifier)?;
        field.dispose();
        log_form_event!(debug, "Field removed", path = %identifier);
        Some(field)
    }

    /// Registered fields, ordered by identifier.
    pub fn fields(&self) -> Vec<Arc<Field>> {
        self.fields.read().values().cloned().collect()
    }

    /// Copy of the value tree.
    pub fn values(&self) -> FieldValue {
        self.values.read().clone()
    }

    /// Copy of the initial value tree.
    pub fn initial_values(&self) -> FieldValue {
        self.initial_values.read().clone()
    }

    /// Replace the whole value tree.
    pub fn set_values(&self, values: FieldValue) {
        self.set_values_in(&FormPath::root(), Some(values));
    }

    /// Replace the whole initial value tree.
    pub fn set_initial_values(&self, values: FieldValue) {
        self.set_initial_values_in(&FormPath::root(), Some(values));
    }

    pub fn is_modified(&self) -> bool {
        self.modified.load(Ordering::Acquire)
    }

    pub fn add_middleware(&self, middleware: Middleware) {
        self.middlewares.write().push(middleware);
    }

    pub fn set_validator_engine(&self, engine: Arc<dyn ValidatorEngine>) {
        *self.validator.write() = Some(engine);
    }

    /// Run `f` inside one batch; fields settle once it returns.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = self.this.upgrade().map(|form| {
            let form: Arc<dyn FormContainer> = form;
            BatchScope::open(form)
        });
        f()
    }

    pub fn bus(&self) -> Arc<InMemoryLifecycleBus> {
        Arc::clone(&self.bus)
    }

    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.bus.event_stream(filter)
    }

    fn write_tree(&self, tree: &RwLock<FieldValue>, path: &FormPath, value: Option<FieldValue>) {
        self.begin_batch();
        set_in(&mut tree.write(), path, value);
        self.end_batch();
    }
}

impl FormContainer for InMemoryForm {
    fn get_values_in(&self, path: &FormPath) -> Option<FieldValue> {
        get_in(&self.values.read(), path).cloned()
    }

    fn set_values_in(&self, path: &FormPath, value: Option<FieldValue>) {
        self.write_tree(&self.values, path, value);
    }

    fn get_initial_values_in(&self, path: &FormPath) -> Option<FieldValue> {
        get_in(&self.initial_values.read(), path).cloned()
    }

    fn set_initial_values_in(&self, path: &FormPath, value: Option<FieldValue>) {
        self.write_tree(&self.initial_values, path, value);
    }

    fn field(&self, identifier: &str) -> Option<Arc<Field>> {
        self.fields.read().get(identifier).cloned()
    }

    fn feedback(&self) -> &dyn FeedbackStore {
        &self.feedback
    }

    fn notify(&self, event: LifecycleEvent) {
        self.bus.publish(event);
    }

    fn pattern(&self) -> Option<FieldPattern> {
        self.config.pattern
    }

    fn middlewares(&self) -> Vec<Middleware> {
        self.middlewares.read().clone()
    }

    fn set_modified(&self, modified: bool) {
        self.modified.store(modified, Ordering::Release);
    }

    fn begin_batch(&self) {
        *self.batch_depth.lock() += 1;
    }

    fn end_batch(&self) {
        let outermost = {
            let mut depth = self.batch_depth.lock();
            *depth = depth.saturating_sub(1);
            *depth == 0
        };
        if !outermost {
            return;
        }

        let fields = self.fields();
        for field in &fields {
            field.settle();
        }
        log_form_event!(trace, "Batch settled", fields = fields.len());
    }

    fn validator_engine(&self) -> Option<Arc<dyn ValidatorEngine>> {
        self.validator.read().clone()
    }

    fn validating_debounce(&self) -> Duration {
        self.config.validating_debounce
    }
}
