//! # Field
//!
//! One addressable input node of a form-state tree.
//!
//! A field owns only its local overrides, flags, input echo and caches. Its
//! value lives in the container's value tree and its feedback in the
//! container's feedback store; every read of a derived attribute recomputes it
//! from those sources.
//!
//! ## Change notification
//!
//! Each mutator runs inside a container batch. When the outermost batch
//! closes the container calls [`Field::settle`] on every registered field,
//! which compares the resolved value and initial value with the last settled
//! ones and emits one change event per transition.

use form_telemetry::log_field_event;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_bus::{LifecycleEvent, LifecycleType};
use shared_types::{
    ComponentBinding, Feedback, FeedbackQuery, FeedbackType, FieldDisplay, FieldPattern,
    FieldValue, FormPath, TriggerType, ValidateResults,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::domain::cache::{plan_display_transition, DisplayTransition, FieldCaches};
use crate::domain::reaction::Reaction;
use crate::domain::requests::FieldRequests;
use crate::domain::resolve::{
    resolve_display, resolve_initial_value, resolve_pattern, resolve_value,
};
use crate::domain::validator::{
    derive_required, parse_validator_descriptions, with_required, FieldValidator, ValidatorRule,
};
use crate::ports::{BatchScope, FormContainer};

/// Construction props.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldProps {
    pub display: Option<FieldDisplay>,
    pub pattern: Option<FieldPattern>,
    pub validator: Option<FieldValidator>,
    pub decorator: Option<ComponentBinding>,
    pub component: Option<ComponentBinding>,
    /// Seeds the value cache, not container storage.
    pub value: Option<FieldValue>,
    /// Seeds the initial value cache.
    pub initial_value: Option<FieldValue>,
    pub required: Option<bool>,
}

impl FieldProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, display: FieldDisplay) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_pattern(mut self, pattern: FieldPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_validator(mut self, validator: impl Into<FieldValidator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    pub fn with_decorator(mut self, decorator: ComponentBinding) -> Self {
        self.decorator = Some(decorator);
        self
    }

    pub fn with_component(mut self, component: ComponentBinding) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_initial_value(mut self, initial_value: FieldValue) -> Self {
        self.initial_value = Some(initial_value);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Options for [`Field::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldResetOptions {
    /// Clear the value (and input echo) instead of restoring the initial value.
    pub force_clear: bool,
    /// Run every validator after resetting.
    pub validate: bool,
    /// Remove the stored initial value first.
    pub clear_initial_value: bool,
}

impl FieldResetOptions {
    pub fn force_clear(mut self) -> Self {
        self.force_clear = true;
        self
    }

    pub fn validate(mut self) -> Self {
        self.validate = true;
        self
    }

    pub fn clear_initial_value(mut self) -> Self {
        self.clear_initial_value = true;
        self
    }
}

/// Local overrides, flags and input echo.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocalState {
    pub display: Option<FieldDisplay>,
    pub pattern: Option<FieldPattern>,
    pub loading: bool,
    pub validating: bool,
    pub modified: bool,
    pub active: bool,
    pub visited: bool,
    pub initialized: bool,
    pub mounted: bool,
    pub unmounted: bool,
    pub input_value: Option<FieldValue>,
    pub input_values: Vec<FieldValue>,
    pub validator: Option<FieldValidator>,
    pub decorator: Option<ComponentBinding>,
    pub component: Option<ComponentBinding>,
}

struct FieldReactions {
    value: Reaction<Option<FieldValue>>,
    initial_value: Reaction<Option<FieldValue>>,
}

impl FieldReactions {
    fn new(value: Option<FieldValue>, initial_value: Option<FieldValue>) -> Self {
        Self {
            value: Reaction::new(value),
            initial_value: Reaction::new(initial_value),
        }
    }
}

/// A form field.
pub struct Field {
    path: FormPath,
    identifier: String,
    form: Weak<dyn FormContainer>,
    pub(crate) state: Arc<RwLock<LocalState>>,
    caches: RwLock<FieldCaches>,
    pub(crate) requests: Mutex<FieldRequests>,
    reactions: Mutex<FieldReactions>,
    disposed: AtomicBool,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("path", &self.identifier)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl Field {
    /// Construct a field, start observing it and run `on_init`.
    ///
    /// Registration is the container's job; the field only keeps a weak
    /// reference back to it.
    pub fn new(path: FormPath, props: FieldProps, form: Weak<dyn FormContainer>) -> Arc<Self> {
        let identifier = path.to_string();
        let state = LocalState {
            display: props.display,
            pattern: props.pattern,
            validator: props.validator,
            decorator: props.decorator,
            component: props.component,
            ..Default::default()
        };

        let field = Arc::new(Self {
            path,
            identifier,
            form,
            state: Arc::new(RwLock::new(state)),
            caches: RwLock::new(FieldCaches {
                value: props.value,
                initial_value: props.initial_value,
            }),
            requests: Mutex::new(FieldRequests::default()),
            reactions: Mutex::new(FieldReactions::new(None, None)),
            disposed: AtomicBool::new(false),
        });

        if let Some(required) = props.required {
            field.set_required(required);
        }
        field.make_reactive();
        field.on_init();
        field
    }

    fn make_reactive(&self) {
        let reactions = FieldReactions::new(self.value(), self.initial_value());
        *self.reactions.lock() = reactions;
    }

    pub(crate) fn form(&self) -> Option<Arc<dyn FormContainer>> {
        self.form.upgrade()
    }

    /// The container, or a warning when it has been dropped.
    pub(crate) fn attached(&self, operation: &str) -> Option<Arc<dyn FormContainer>> {
        let form = self.form.upgrade();
        if form.is_none() {
            log_field_event!(warn, self.identifier, "Form container dropped, ignoring mutation", operation = operation);
        }
        form
    }

    pub(crate) fn notify(&self, kind: LifecycleType) {
        if let Some(form) = self.form() {
            form.notify(LifecycleEvent::new(kind, self.identifier.clone()));
        }
    }

    // =========================================================================
    // IDENTITY
    // =========================================================================

    pub fn path(&self) -> &FormPath {
        &self.path
    }

    /// Canonical dotted identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Nearest registered ancestor. Unregistered levels are skipped.
    pub fn parent(&self) -> Option<Arc<Field>> {
        let form = self.form()?;
        self.path
            .ancestors()
            .find_map(|ancestor| form.field(&ancestor.to_string()))
    }

    // =========================================================================
    // RESOLVED STATE
    // =========================================================================

    pub fn value(&self) -> Option<FieldValue> {
        let stored = self.form().and_then(|form| form.get_values_in(&self.path));
        let modified = self.state.read().modified;
        let cached = self.caches.read().value.clone();
        resolve_value(modified, stored, self.initial_value(), cached)
    }

    pub fn initial_value(&self) -> Option<FieldValue> {
        let stored = self
            .form()
            .and_then(|form| form.get_initial_values_in(&self.path));
        let cached = self.caches.read().initial_value.clone();
        resolve_initial_value(stored, cached)
    }

    pub fn display(&self) -> FieldDisplay {
        let local = self.state.read().display;
        let parent = match local {
            Some(_) => None,
            None => self.parent().map(|parent| parent.display()),
        };
        resolve_display(local, parent)
    }

    pub fn pattern(&self) -> FieldPattern {
        let local = self.state.read().pattern;
        if local.is_some() {
            return resolve_pattern(local, None, None);
        }
        let parent = self.parent().map(|parent| parent.pattern());
        let form = self.form().and_then(|form| form.pattern());
        resolve_pattern(None, parent, form)
    }

    pub fn required(&self) -> bool {
        derive_required(&self.descriptions())
    }

    /// Parsed validator descriptions.
    pub fn descriptions(&self) -> Vec<ValidatorRule> {
        parse_validator_descriptions(self.state.read().validator.as_ref())
    }

    pub fn errors(&self) -> Vec<Feedback> {
        self.feedback_of(FeedbackType::Error)
    }

    pub fn warnings(&self) -> Vec<Feedback> {
        self.feedback_of(FeedbackType::Warning)
    }

    pub fn successes(&self) -> Vec<Feedback> {
        self.feedback_of(FeedbackType::Success)
    }

    fn feedback_of(&self, feedback_type: FeedbackType) -> Vec<Feedback> {
        let query = FeedbackQuery::path(self.identifier.clone()).with_type(feedback_type);
        self.form()
            .map(|form| form.feedback().find(&query))
            .unwrap_or_default()
    }

    // =========================================================================
    // LOCAL STATE
    // =========================================================================

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn validating(&self) -> bool {
        self.state.read().validating
    }

    pub fn modified(&self) -> bool {
        self.state.read().modified
    }

    pub fn active(&self) -> bool {
        self.state.read().active
    }

    pub fn visited(&self) -> bool {
        self.state.read().visited
    }

    pub fn initialized(&self) -> bool {
        self.state.read().initialized
    }

    pub fn mounted(&self) -> bool {
        self.state.read().mounted
    }

    pub fn unmounted(&self) -> bool {
        self.state.read().unmounted
    }

    pub fn input_value(&self) -> Option<FieldValue> {
        self.state.read().input_value.clone()
    }

    pub fn input_values(&self) -> Vec<FieldValue> {
        self.state.read().input_values.clone()
    }

    pub fn validator(&self) -> Option<FieldValidator> {
        self.state.read().validator.clone()
    }

    pub fn decorator(&self) -> Option<ComponentBinding> {
        self.state.read().decorator.clone()
    }

    pub fn component(&self) -> Option<ComponentBinding> {
        self.state.read().component.clone()
    }

    pub fn caches(&self) -> FieldCaches {
        self.caches.read().clone()
    }

    /// Whether a `validating` debounce is armed and has not fired.
    pub fn validating_pending(&self) -> bool {
        self.requests.lock().validate_pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    // =========================================================================
    // MUTATORS
    // =========================================================================

    pub fn set_errors(&self, messages: Vec<String>) {
        self.write_feedback(FeedbackType::Error, messages);
    }

    pub fn set_warnings(&self, messages: Vec<String>) {
        self.write_feedback(FeedbackType::Warning, messages);
    }

    pub fn set_successes(&self, messages: Vec<String>) {
        self.write_feedback(FeedbackType::Success, messages);
    }

    fn write_feedback(&self, feedback_type: FeedbackType, messages: Vec<String>) {
        let Some(form) = self.attached("set_feedback") else {
            return;
        };
        form.feedback().update(vec![Feedback {
            path: self.identifier.clone(),
            feedback_type,
            code: feedback_type.effect_code(),
            trigger_type: None,
            messages,
        }]);
    }

    /// Replace the validator wholesale.
    pub fn set_validator(&self, validator: Option<FieldValidator>) {
        self.state.write().validator = validator;
    }

    /// Merge a `required` flag into the current validator.
    pub fn set_required(&self, required: bool) {
        let mut state = self.state.write();
        let current = state.validator.take();
        state.validator = Some(with_required(current, required));
    }

    /// Write the value to container storage and mark the field modified.
    pub fn set_value(&self, value: Option<FieldValue>) {
        let Some(form) = self.attached("set_value") else {
            return;
        };
        let _batch = BatchScope::open(Arc::clone(&form));
        self.state.write().modified = true;
        form.set_modified(true);
        form.set_values_in(&self.path, value);
    }

    /// Write the initial value to container storage.
    pub fn set_initial_value(&self, initial_value: Option<FieldValue>) {
        let Some(form) = self.attached("set_initial_value") else {
            return;
        };
        let _batch = BatchScope::open(Arc::clone(&form));
        form.set_initial_values_in(&self.path, initial_value);
    }

    pub fn set_cache_value(&self, value: Option<FieldValue>) {
        self.caches.write().value = value;
    }

    pub fn set_cache_initial_value(&self, initial_value: Option<FieldValue>) {
        self.caches.write().initial_value = initial_value;
    }

    /// Set the display override, stashing or restoring the value as the
    /// field leaves or re-enters `none`.
    pub fn set_display(&self, target: FieldDisplay) {
        let Some(form) = self.attached("set_display") else {
            return;
        };
        let _batch = BatchScope::open(form);

        let current = self.display();
        match plan_display_transition(current, target) {
            DisplayTransition::Restore => {
                let cached = self.caches.read().value.clone();
                self.set_value(cached);
                self.set_cache_value(None);
            }
            DisplayTransition::Stash => {
                let value = self.value();
                self.set_cache_value(value);
                self.set_value(None);
            }
            DisplayTransition::Override => {}
        }
        self.state.write().display = Some(target);

        log_field_event!(debug, self.identifier, "Display changed", from = %current, to = %target);
    }

    pub fn set_pattern(&self, pattern: FieldPattern) {
        self.state.write().pattern = Some(pattern);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().loading = loading;
    }

    /// Set the component, shallow-merging `props` over the current ones.
    pub fn set_component(&self, component: impl Into<String>, props: Option<Map<String, Value>>) {
        rebind(&mut self.state.write().component, Some(component.into()), props);
    }

    pub fn set_component_props(&self, props: Map<String, Value>) {
        rebind(&mut self.state.write().component, None, Some(props));
    }

    /// Set the decorator, shallow-merging `props` over the current ones.
    pub fn set_decorator(&self, decorator: impl Into<String>, props: Option<Map<String, Value>>) {
        rebind(&mut self.state.write().decorator, Some(decorator.into()), props);
    }

    pub fn set_decorator_props(&self, props: Map<String, Value>) {
        rebind(&mut self.state.write().decorator, None, Some(props));
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    fn on_init(&self) {
        self.state.write().initialized = true;
        self.notify(LifecycleType::OnFieldInit);
    }

    pub fn on_mount(&self) {
        {
            let mut state = self.state.write();
            state.mounted = true;
            state.unmounted = false;
        }
        self.notify(LifecycleType::OnFieldMount);
    }

    pub fn on_unmount(&self) {
        {
            let mut state = self.state.write();
            state.mounted = false;
            state.unmounted = true;
        }
        self.notify(LifecycleType::OnFieldUnmount);
    }

    /// Handle an input event: echo the arguments, write the first one as the
    /// value, then validate on input.
    pub async fn on_input(&self, args: Vec<FieldValue>) -> ValidateResults {
        {
            let Some(form) = self.attached("on_input") else {
                return ValidateResults::new();
            };
            let _batch = BatchScope::open(Arc::clone(&form));
            let value = args.first().cloned();
            {
                let mut state = self.state.write();
                state.input_value = value.clone();
                state.input_values = args;
                state.modified = true;
            }
            form.set_modified(true);
            form.set_values_in(&self.path, value);
            self.notify(LifecycleType::OnFieldInputValueChange);
            self.notify(LifecycleType::OnFormInputChange);
        }
        self.validate(Some(TriggerType::OnInput)).await
    }

    pub async fn on_focus(&self) -> ValidateResults {
        {
            let mut state = self.state.write();
            state.active = true;
            state.visited = true;
        }
        self.notify(LifecycleType::OnFieldFocus);
        self.validate(Some(TriggerType::OnFocus)).await
    }

    pub async fn on_blur(&self) -> ValidateResults {
        self.state.write().active = false;
        self.notify(LifecycleType::OnFieldBlur);
        self.validate(Some(TriggerType::OnBlur)).await
    }

    /// Clear feedback and interaction flags, then restore the initial value
    /// (or clear the value with `force_clear`).
    ///
    /// Restoring writes the initial value without marking the field modified.
    /// A forced clear marks it modified so the empty value is not masked by
    /// the initial value.
    pub async fn reset(&self, options: FieldResetOptions) -> Option<ValidateResults> {
        {
            let form = self.attached("reset")?;
            let _batch = BatchScope::open(Arc::clone(&form));
            {
                let mut state = self.state.write();
                state.modified = false;
                state.visited = false;
            }
            form.feedback()
                .clear(&FeedbackQuery::path(self.identifier.clone()));
            if options.clear_initial_value {
                self.set_initial_value(None);
            }
            if options.force_clear {
                {
                    let mut state = self.state.write();
                    state.input_value = None;
                    state.input_values.clear();
                }
                self.set_value(None);
            } else {
                form.set_values_in(&self.path, self.initial_value());
            }
            self.notify(LifecycleType::OnFieldReset);
            log_field_event!(debug, self.identifier, "Field reset", force_clear = options.force_clear);
        }

        if options.validate {
            Some(self.validate(None).await)
        } else {
            None
        }
    }

    /// Run the change observers. Called by the container when a batch settles.
    pub fn settle(&self) {
        if self.is_disposed() {
            return;
        }
        let value = self.value();
        let initial_value = self.initial_value();
        let (value_changed, initial_changed) = {
            let mut reactions = self.reactions.lock();
            (
                reactions.value.track(value),
                reactions.initial_value.track(initial_value),
            )
        };

        if value_changed {
            self.notify(LifecycleType::OnFieldValueChange);
            self.notify(LifecycleType::OnFormValuesChange);
        }
        if initial_changed {
            self.notify(LifecycleType::OnFieldInitialValueChange);
            self.notify(LifecycleType::OnFormInitialValuesChange);
        }
    }

    /// Stop the observers and cancel the debounce. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        {
            let mut reactions = self.reactions.lock();
            reactions.value.dispose();
            reactions.initial_value.dispose();
        }
        self.requests.lock().cancel_validate();
        log_field_event!(debug, self.identifier, "Field disposed");
    }
}

fn rebind(
    slot: &mut Option<ComponentBinding>,
    component: Option<String>,
    props: Option<Map<String, Value>>,
) {
    let mut binding = slot.take().unwrap_or_default();
    if component.is_some() {
        binding.component = component;
    }
    if let Some(props) = props {
        binding.merge_props(props);
    }
    *slot = Some(binding);
}
