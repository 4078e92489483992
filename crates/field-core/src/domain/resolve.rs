//! Value resolution pipeline
//!
//! Pure functions over explicit inputs. The field gathers the inputs (container
//! storage, caches, ancestor state) and these decide what is observable.

use shared_types::{is_valid, FieldDisplay, FieldPattern, FieldValue};

/// Resolve the observable value.
///
/// Once a field is modified the stored value is authoritative, even when it is
/// empty. Before that, an empty store falls back to the initial value and then
/// to the cache.
#[must_use]
pub fn resolve_value(
    modified: bool,
    stored: Option<FieldValue>,
    initial: Option<FieldValue>,
    cached: Option<FieldValue>,
) -> Option<FieldValue> {
    if modified || is_valid(stored.as_ref()) {
        return stored;
    }
    if is_valid(initial.as_ref()) {
        return initial;
    }
    cached
}

/// Resolve the observable initial value: stored if valid, else cached.
#[must_use]
pub fn resolve_initial_value(
    stored: Option<FieldValue>,
    cached: Option<FieldValue>,
) -> Option<FieldValue> {
    if is_valid(stored.as_ref()) {
        stored
    } else {
        cached
    }
}

/// Resolve display: local override, then nearest registered ancestor.
#[must_use]
pub fn resolve_display(local: Option<FieldDisplay>, parent: Option<FieldDisplay>) -> FieldDisplay {
    local.or(parent).unwrap_or_default()
}

/// Resolve pattern: local override, then ancestor, then container default.
#[must_use]
pub fn resolve_pattern(
    local: Option<FieldPattern>,
    parent: Option<FieldPattern>,
    form: Option<FieldPattern>,
) -> FieldPattern {
    local.or(parent).or(form).unwrap_or_default()
}
