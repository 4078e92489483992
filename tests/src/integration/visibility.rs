//! # Visibility Flows
//!
//! Display inheritance and the hide/show value cache.

#[cfg(test)]
mod tests {
    use field_core::{FieldProps, FormContainer, InMemoryForm};
    use serde_json::json;
    use shared_bus::{EventFilter, LifecycleType};
    use shared_types::FieldDisplay;

    use crate::fixtures::{count, init_test_logging};

    #[test]
    fn test_hide_and_show_restore_value() {
        init_test_logging();
        let form = InMemoryForm::new();
        let field = form.create_field("email", FieldProps::new()).unwrap();
        field.set_value(Some(json!("a@b.c")));

        field.set_display(FieldDisplay::Removed);
        assert_eq!(form.get_values_in(field.path()), None);
        assert_eq!(field.caches().value, Some(json!("a@b.c")));

        field.set_display(FieldDisplay::Visible);
        assert_eq!(field.value(), Some(json!("a@b.c")));
        assert_eq!(form.get_values_in(field.path()), Some(json!("a@b.c")));
        assert_eq!(field.caches().value, None);
    }

    #[test]
    fn test_hide_show_notifies_each_transition() {
        let form = InMemoryForm::new();
        let field = form.create_field("email", FieldProps::new()).unwrap();
        field.set_value(Some(json!("x")));
        let mut sub = form.subscribe(EventFilter::kinds(vec![LifecycleType::OnFieldValueChange]));

        field.set_display(FieldDisplay::Removed);
        assert_eq!(count(&mut sub, LifecycleType::OnFieldValueChange), 1);

        field.set_display(FieldDisplay::Visible);
        assert_eq!(count(&mut sub, LifecycleType::OnFieldValueChange), 1);
    }

    #[test]
    fn test_repeated_hide_keeps_cache() {
        let form = InMemoryForm::new();
        let field = form.create_field("a", FieldProps::new()).unwrap();
        field.set_value(Some(json!(42)));

        field.set_display(FieldDisplay::Removed);
        field.set_display(FieldDisplay::Removed);
        field.set_display(FieldDisplay::Visible);
        assert_eq!(field.value(), Some(json!(42)));
    }

    #[test]
    fn test_hidden_keeps_value() {
        let form = InMemoryForm::new();
        let field = form.create_field("a", FieldProps::new()).unwrap();
        field.set_value(Some(json!("kept")));

        field.set_display(FieldDisplay::Hidden);
        assert_eq!(form.get_values_in(field.path()), Some(json!("kept")));
        assert_eq!(field.caches().value, None);

        // Hidden to removed still stashes.
        field.set_display(FieldDisplay::Removed);
        assert_eq!(form.get_values_in(field.path()), None);
        assert_eq!(field.caches().value, Some(json!("kept")));
    }

    #[test]
    fn test_display_inherits_with_local_override() {
        let form = InMemoryForm::new();
        let user = form.create_field("user", FieldProps::new()).unwrap();
        let age = form.create_field("user.age", FieldProps::new()).unwrap();
        let name = form
            .create_field("user.name", FieldProps::new().with_display(FieldDisplay::Visible))
            .unwrap();

        user.set_display(FieldDisplay::Hidden);
        assert_eq!(age.display(), FieldDisplay::Hidden);
        assert_eq!(name.display(), FieldDisplay::Visible);

        user.set_display(FieldDisplay::Removed);
        assert_eq!(age.display(), FieldDisplay::Removed);
        assert_eq!(name.display(), FieldDisplay::Visible);
    }

    #[test]
    fn test_ancestor_removal_stashes_its_own_subtree() {
        let form = InMemoryForm::new();
        let user = form.create_field("user", FieldProps::new()).unwrap();
        let age = form.create_field("user.age", FieldProps::new()).unwrap();
        age.set_value(Some(json!(30)));

        user.set_display(FieldDisplay::Removed);
        assert_eq!(user.caches().value, Some(json!({"age": 30})));
        assert_eq!(age.caches().value, None);
        assert_eq!(age.value(), None);

        user.set_display(FieldDisplay::Visible);
        assert_eq!(age.value(), Some(json!(30)));
        assert_eq!(age.display(), FieldDisplay::Visible);
    }

    #[test]
    fn test_restore_unmodified_initial_value() {
        let form = InMemoryForm::new();
        let field = form
            .create_field("a", FieldProps::new().with_initial_value(json!("seed")))
            .unwrap();
        assert!(!field.modified());

        field.set_display(FieldDisplay::Removed);
        assert_eq!(field.caches().value, Some(json!("seed")));
        assert_eq!(field.value(), None);

        field.set_display(FieldDisplay::Visible);
        assert_eq!(field.value(), Some(json!("seed")));
        assert_eq!(form.get_values_in(field.path()), Some(json!("seed")));
        assert!(field.modified());
    }

    #[test]
    fn test_initial_display_from_props() {
        let form = InMemoryForm::new();
        let field = form
            .create_field("a", FieldProps::new().with_display(FieldDisplay::Removed))
            .unwrap();
        assert_eq!(field.display(), FieldDisplay::Removed);

        // No stash happened, so showing restores nothing.
        field.set_display(FieldDisplay::Visible);
        assert_eq!(field.value(), None);
        assert_eq!(field.display(), FieldDisplay::Visible);
    }
}
