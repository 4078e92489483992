//! # Snapshot Flows
//!
//! Exporting field state, shaping it with middlewares, and importing it into
//! a fresh field or another form.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use field_core::{Field, FieldProps, FormContainer, InMemoryForm};
    use serde_json::json;
    use shared_bus::EventFilter;
    use shared_types::{
        ComponentBinding, Feedback, FeedbackCode, FeedbackType, FieldDisplay, FieldPattern,
        FieldState,
    };

    use crate::fixtures::init_test_logging;

    fn populated(form: &Arc<InMemoryForm>) -> Arc<Field> {
        let field = form
            .create_field(
                "profile.email",
                FieldProps::new()
                    .with_initial_value(json!("old@example.com"))
                    .with_required(true)
                    .with_component(ComponentBinding::new("Input").with_prop("size", json!("large"))),
            )
            .unwrap();
        field.set_value(Some(json!("new@example.com")));
        field.set_pattern(FieldPattern::ReadOnly);
        field.set_warnings(vec!["Looks unusual".into()]);
        field
    }

    #[test]
    fn test_import_into_fresh_field_is_idempotent() {
        init_test_logging();
        let form = InMemoryForm::new();
        let snapshot = populated(&form).to_json();

        form.remove_field("profile.email");
        let fresh = form
            .create_field("profile.email", FieldProps::new())
            .unwrap();
        fresh.from_json(snapshot.clone());
        assert_eq!(fresh.to_json(), snapshot);

        let mut sub = form.subscribe(EventFilter::all());
        fresh.from_json(snapshot.clone());
        assert!(sub.drain().is_empty());
        assert_eq!(fresh.to_json(), snapshot);
    }

    #[test]
    fn test_transfer_through_json_text() {
        let source_form = InMemoryForm::new();
        let source = populated(&source_form);
        let text = serde_json::to_string(&source.to_json()).unwrap();

        let target_form = InMemoryForm::new();
        let target = target_form
            .create_field("profile.email", FieldProps::new())
            .unwrap();
        let state: FieldState = serde_json::from_str(&text).unwrap();
        target.from_json(state);

        assert_eq!(target.value(), Some(json!("new@example.com")));
        assert_eq!(target.initial_value(), Some(json!("old@example.com")));
        assert_eq!(
            target_form.get_initial_values_in(target.path()),
            Some(json!("old@example.com"))
        );
        assert_eq!(target.pattern(), FieldPattern::ReadOnly);
        assert!(target.required());
        assert!(target.modified());
        assert_eq!(target.warnings(), source.warnings());
        assert_eq!(
            target.component().and_then(|c| c.component),
            Some("Input".to_string())
        );
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let form = InMemoryForm::new();
        let field = populated(&form);
        let wire = serde_json::to_value(field.to_json()).unwrap();

        assert_eq!(wire["displayName"], json!("Field"));
        assert_eq!(wire["path"], json!("profile.email"));
        assert_eq!(wire["initialValue"], json!("old@example.com"));
        assert_eq!(wire["pattern"], json!("readOnly"));
        assert_eq!(wire["display"], json!("visibility"));
        assert!(wire.get("inputValues").is_some());
    }

    #[test]
    fn test_differing_feedback_replaces_store() {
        let form = InMemoryForm::new();
        let field = populated(&form);

        let incoming = vec![Feedback {
            path: "profile.email".into(),
            feedback_type: FeedbackType::Warning,
            code: FeedbackCode::EffectWarning,
            trigger_type: None,
            messages: vec!["Replaced".into()],
        }];
        field.from_json(FieldState {
            warnings: Some(incoming.clone()),
            ..Default::default()
        });
        assert_eq!(field.warnings(), incoming);

        // An empty list names no slots, so nothing is removed.
        field.from_json(FieldState {
            warnings: Some(Vec::new()),
            ..Default::default()
        });
        assert_eq!(field.warnings(), incoming);
    }

    #[test]
    fn test_middleware_masks_sensitive_fields() {
        let form = InMemoryForm::new();
        form.add_middleware(Arc::new(|_acc: &FieldState, field: &Field| {
            if field.identifier().ends_with("password") {
                FieldState {
                    value: Some(json!("********")),
                    ..Default::default()
                }
            } else {
                FieldState::default()
            }
        }));
        let password = form.create_field("login.password", FieldProps::new()).unwrap();
        let user = form.create_field("login.user", FieldProps::new()).unwrap();
        password.set_value(Some(json!("hunter2")));
        user.set_value(Some(json!("ann")));

        assert_eq!(password.reduce().value, Some(json!("********")));
        assert_eq!(password.value(), Some(json!("hunter2")));
        assert_eq!(user.reduce().value, Some(json!("ann")));
    }

    #[test]
    fn test_import_display_removed_stashes() {
        let form = InMemoryForm::new();
        let field = form.create_field("a", FieldProps::new()).unwrap();
        field.set_value(Some(json!("v")));

        field.from_json(FieldState {
            display: Some(FieldDisplay::Removed),
            ..Default::default()
        });
        assert_eq!(field.display(), FieldDisplay::Removed);
        assert_eq!(field.caches().value, Some(json!("v")));
        assert_eq!(form.get_values_in(field.path()), None);
    }
}
