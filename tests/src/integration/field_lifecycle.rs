//! # Field Lifecycle Flows
//!
//! Registration, ancestry, lifecycle notifications and change observation
//! through the in-memory form and its bus.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use field_core::{
        FieldProps, FieldValidator, FormContainer, InMemoryForm, ValidatorItem, ValidatorRule,
    };
    use proptest::prelude::*;
    use serde_json::json;
    use shared_bus::{EventFilter, EventTopic, LifecycleType};
    use shared_types::{FieldDisplay, FieldPattern, TriggerType};
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use crate::fixtures::{count, init_test_logging, kinds};

    // =========================================================================
    // ANCESTRY
    // =========================================================================

    #[test]
    fn test_parent_skips_unregistered_level() {
        init_test_logging();
        let form = InMemoryForm::new();
        let a = form.create_field("a", FieldProps::new()).unwrap();
        let abc = form.create_field("a.b.c", FieldProps::new()).unwrap();

        assert!(Arc::ptr_eq(&abc.parent().unwrap(), &a));

        // Registering the middle level makes it the nearest ancestor.
        let ab = form.create_field("a.b", FieldProps::new()).unwrap();
        assert!(Arc::ptr_eq(&abc.parent().unwrap(), &ab));

        // Removing it falls back again.
        form.remove_field("a.b");
        assert!(Arc::ptr_eq(&abc.parent().unwrap(), &a));
    }

    #[test]
    fn test_bracket_and_dot_paths_address_one_field() {
        let form = InMemoryForm::new();
        let by_bracket = form.create_field("users[2].email", FieldProps::new()).unwrap();
        let by_dot = form.create_field("users.2.email", FieldProps::new()).unwrap();
        assert!(Arc::ptr_eq(&by_bracket, &by_dot));
        assert_eq!(by_dot.identifier(), "users.2.email");
    }

    #[test]
    fn test_pattern_falls_back_to_form() {
        let config = field_core::FormConfigBuilder::new()
            .pattern(FieldPattern::ReadOnly)
            .build()
            .unwrap();
        let form = InMemoryForm::with_config(config).unwrap();
        let group = form.create_field("group", FieldProps::new()).unwrap();
        let item = form.create_field("group.item", FieldProps::new()).unwrap();

        assert_eq!(item.pattern(), FieldPattern::ReadOnly);
        group.set_pattern(FieldPattern::Disabled);
        assert_eq!(item.pattern(), FieldPattern::Disabled);
        item.set_pattern(FieldPattern::Editable);
        assert_eq!(item.pattern(), FieldPattern::Editable);
    }

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    #[tokio::test]
    async fn test_input_event_sequence() {
        init_test_logging();
        let form = InMemoryForm::new();
        let field = form.create_field("name", FieldProps::new()).unwrap();
        let mut sub = form.subscribe(EventFilter::all());

        field.on_input(vec![json!("ann"), json!({"source": "keyboard"})]).await;

        assert_eq!(
            kinds(&mut sub),
            vec![
                LifecycleType::OnFieldInputValueChange,
                LifecycleType::OnFormInputChange,
                LifecycleType::OnFieldValueChange,
                LifecycleType::OnFormValuesChange,
                LifecycleType::OnFieldValidateStart,
                LifecycleType::OnFieldValidateEnd,
            ]
        );
        assert_eq!(field.input_value(), Some(json!("ann")));
        assert_eq!(field.input_values().len(), 2);
        assert_eq!(form.get_values_in(field.path()), Some(json!("ann")));
        assert!(field.modified());
        assert!(form.is_modified());
    }

    #[tokio::test]
    async fn test_focus_and_blur_events() {
        let form = InMemoryForm::new();
        let field = form.create_field("name", FieldProps::new()).unwrap();
        let mut sub = form.subscribe(EventFilter::topics(vec![EventTopic::FieldLifecycle]));

        field.on_focus().await;
        field.on_blur().await;
        field.on_mount();
        field.on_unmount();

        assert_eq!(
            kinds(&mut sub),
            vec![
                LifecycleType::OnFieldFocus,
                LifecycleType::OnFieldBlur,
                LifecycleType::OnFieldMount,
                LifecycleType::OnFieldUnmount,
            ]
        );
        assert!(field.visited());
        assert!(!field.active());
    }

    #[test]
    fn test_value_change_from_other_field_write() {
        let form = InMemoryForm::new();
        let user = form.create_field("user", FieldProps::new()).unwrap();
        let _name = form.create_field("user.name", FieldProps::new()).unwrap();
        let mut sub = form.subscribe(
            EventFilter::kinds(vec![LifecycleType::OnFieldValueChange])
                .with_paths(vec!["user.name".to_string()]),
        );

        user.set_value(Some(json!({"name": "bo"})));
        assert_eq!(count(&mut sub, LifecycleType::OnFieldValueChange), 1);

        // Same resolved value again: no transition.
        user.set_value(Some(json!({"name": "bo", "age": 3})));
        assert!(kinds(&mut sub).is_empty());

        user.set_value(Some(json!({})));
        assert_eq!(count(&mut sub, LifecycleType::OnFieldValueChange), 1);
    }

    #[test]
    fn test_one_change_per_batch() {
        let form = InMemoryForm::new();
        let field = form.create_field("n", FieldProps::new()).unwrap();
        let mut sub = form.subscribe(EventFilter::kinds(vec![LifecycleType::OnFieldValueChange]));

        form.batch(|| {
            for i in 0..10 {
                field.set_value(Some(json!(i)));
            }
        });
        assert_eq!(count(&mut sub, LifecycleType::OnFieldValueChange), 1);
        assert_eq!(field.value(), Some(json!(9)));
    }

    #[test]
    fn test_no_notifications_after_dispose() {
        let form = InMemoryForm::new();
        let field = form.create_field("gone", FieldProps::new()).unwrap();
        let _other = form.create_field("kept", FieldProps::new()).unwrap();
        let mut sub = form.subscribe(EventFilter::kinds(vec![LifecycleType::OnFieldValueChange]));

        form.remove_field("gone");
        form.set_values(json!({"gone": 1, "kept": 2}));
        field.settle();

        let events = sub.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "kept");
    }

    #[tokio::test]
    async fn test_event_stream_delivers() {
        let form = InMemoryForm::new();
        let mut stream = form.event_stream(EventFilter::kinds(vec![LifecycleType::OnFieldInit]));
        form.create_field("streamed", FieldProps::new()).unwrap();

        let event = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(event.path, "streamed");
    }

    #[test]
    fn test_dropped_form_leaves_field_inert() {
        let form = InMemoryForm::new();
        let field = form
            .create_field("orphan", FieldProps::new().with_display(FieldDisplay::Hidden))
            .unwrap();
        field.set_value(Some(json!(1)));
        drop(form);

        assert_eq!(field.value(), None);
        assert!(field.parent().is_none());
        assert_eq!(field.display(), FieldDisplay::Hidden);
        field.set_display(FieldDisplay::Removed);
        assert_eq!(field.display(), FieldDisplay::Hidden);
    }

    // =========================================================================
    // REQUIRED DERIVATION
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        SetRequired(bool),
        SetValidator(Option<FieldValidator>),
    }

    fn arb_rule() -> impl Strategy<Value = ValidatorRule> {
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(prop_oneof![
                Just(TriggerType::OnInput),
                Just(TriggerType::OnBlur),
            ]),
        )
            .prop_map(|(required, trigger_type)| ValidatorRule {
                required,
                trigger_type,
                ..Default::default()
            })
    }

    fn arb_validator() -> impl Strategy<Value = Option<FieldValidator>> {
        proptest::option::of(prop_oneof![
            "[a-z]{1,5}".prop_map(FieldValidator::Format),
            arb_rule().prop_map(FieldValidator::Rule),
            proptest::collection::vec(
                prop_oneof![
                    "[a-z]{1,5}".prop_map(ValidatorItem::Format),
                    arb_rule().prop_map(ValidatorItem::Rule),
                ],
                0..4
            )
            .prop_map(FieldValidator::Rules),
        ])
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::SetRequired),
            arb_validator().prop_map(Op::SetValidator),
        ]
    }

    proptest! {
        #[test]
        fn prop_required_tracks_descriptions(ops in proptest::collection::vec(arb_op(), 1..8)) {
            let form = InMemoryForm::new();
            let field = form.create_field("p", FieldProps::new()).unwrap();

            for op in ops {
                match op {
                    Op::SetRequired(required) => {
                        field.set_required(required);
                        prop_assert_eq!(field.required(), required);
                    }
                    Op::SetValidator(validator) => field.set_validator(validator),
                }
                let expected = field
                    .descriptions()
                    .iter()
                    .any(|d| d.required == Some(true));
                prop_assert_eq!(field.required(), expected);
            }
        }
    }
}
