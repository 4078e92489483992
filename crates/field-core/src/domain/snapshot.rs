//! Snapshot codec
//!
//! Export a field's observable state as a [`FieldState`] record, fold the
//! container's middlewares over it, and merge a record back in.
//!
//! Import applies a member only when it is present, valid and different from
//! the current resolved value, so importing an export of the same field is a
//! no-op.

use shared_types::{is_valid, Feedback, FieldState};
use std::sync::Arc;

use crate::domain::field::Field;
use crate::ports::BatchScope;

/// Wire name of the field node type.
pub const DISPLAY_NAME: &str = "Field";

/// Reduction step applied by [`Field::reduce`].
///
/// Receives the accumulated record and the field; returns a partial record
/// merged over the accumulator.
pub type Middleware = Arc<dyn Fn(&FieldState, &Field) -> FieldState + Send + Sync>;

impl Field {
    /// Export every observable attribute.
    pub fn to_json(&self) -> FieldState {
        let local = self.state.read().clone();

        FieldState {
            display_name: Some(DISPLAY_NAME.to_string()),
            path: Some(self.identifier().to_string()),
            display: Some(self.display()),
            pattern: Some(self.pattern()),
            loading: Some(local.loading),
            validating: Some(local.validating),
            modified: Some(local.modified),
            active: Some(local.active),
            visited: Some(local.visited),
            value: self.value(),
            initial_value: self.initial_value(),
            required: Some(self.required()),
            input_value: local.input_value,
            input_values: Some(local.input_values),
            decorator: local.decorator,
            component: local.component,
            errors: Some(self.errors()),
            warnings: Some(self.warnings()),
            successes: Some(self.successes()),
        }
    }

    /// Export, then fold the container's middlewares over the record.
    pub fn reduce(&self) -> FieldState {
        let base = self.to_json();
        let Some(form) = self.form() else {
            return base;
        };
        form.middlewares()
            .iter()
            .fold(base, |acc, middleware| {
                let partial = middleware(&acc, self);
                acc.merged(partial)
            })
    }

    /// Merge a record into the field.
    ///
    /// Value, initial value, required, display, pattern, loading and
    /// validating go through their mutators. Flags, input echo and component
    /// bindings are written directly. Feedback lists are written to the store
    /// only when they differ from what it holds.
    pub fn from_json(&self, state: FieldState) {
        let Some(form) = self.attached("from_json") else {
            return;
        };
        let _batch = BatchScope::open(Arc::clone(&form));

        {
            let mut local = self.state.write();
            if let Some(modified) = state.modified {
                local.modified = modified;
            }
            if let Some(active) = state.active {
                local.active = active;
            }
            if let Some(visited) = state.visited {
                local.visited = visited;
            }
            if is_valid(state.input_value.as_ref()) && state.input_value != local.input_value {
                local.input_value = state.input_value;
            }
            if let Some(input_values) = state.input_values {
                if input_values != local.input_values {
                    local.input_values = input_values;
                }
            }
            if state.component.is_some() && state.component != local.component {
                local.component = state.component;
            }
            if state.decorator.is_some() && state.decorator != local.decorator {
                local.decorator = state.decorator;
            }
        }

        if is_valid(state.value.as_ref()) && state.value != self.value() {
            self.set_value(state.value);
        }

        self.import_feedback(&*form, state.errors, Field::errors);
        self.import_feedback(&*form, state.warnings, Field::warnings);
        self.import_feedback(&*form, state.successes, Field::successes);

        if is_valid(state.initial_value.as_ref()) && state.initial_value != self.initial_value() {
            self.set_initial_value(state.initial_value);
        }
        if let Some(required) = state.required {
            if required != self.required() {
                self.set_required(required);
            }
        }
        if let Some(display) = state.display {
            if display != self.display() {
                self.set_display(display);
            }
        }
        if let Some(pattern) = state.pattern {
            if pattern != self.pattern() {
                self.set_pattern(pattern);
            }
        }
        if let Some(loading) = state.loading {
            if loading != self.loading() {
                self.set_loading(loading);
            }
        }
        if let Some(validating) = state.validating {
            if validating != self.validating() {
                self.set_validating(validating);
            }
        }
    }

    fn import_feedback(
        &self,
        form: &dyn crate::ports::FormContainer,
        incoming: Option<Vec<Feedback>>,
        current: fn(&Field) -> Vec<Feedback>,
    ) {
        let Some(incoming) = incoming else {
            return;
        };
        if incoming != current(self) {
            form.feedback().update(incoming);
        }
    }
}
