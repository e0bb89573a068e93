use futures::executor::block_on;

#[test]
fn prelude_covers_a_login_form() {
    use crate::prelude::*;

    let controller = FormConfig::new(
        FieldMap::from([
            (FieldKey::from_static("email"), FieldValue::from("")),
            (FieldKey::from_static("remember"), FieldValue::from(false)),
        ]),
        SyncSubmit(|_values: &FieldMap| Ok::<(), BoxError>(())),
    )
    .max_submit_attempts(3)
    .build()
    .expect("build form");

    let email = controller.get_form_field_props("email").expect("email props");
    (email.on_change)(&ChangeEvent::text("email", "me@example.com")).expect("type email");
    controller
        .handle_change(&ChangeEvent::checkbox("remember", true))
        .expect("tick remember");

    let outcome = block_on(controller.handle_submit(&mut SubmitEvent::new())).expect("submit");
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(controller.dirty_fields().expect("dirty fields").len(), 2);
}

#[test]
fn root_reexports_match_form_module() {
    fn accepts(_: &crate::FormController) {}

    let on_submit = |_values: crate::form::FieldMap| async { Ok::<(), crate::form::BoxError>(()) };
    let controller = crate::FormConfig::new(crate::form::FieldMap::new(), on_submit)
        .build()
        .expect("empty form builds");
    accepts(&controller);
    assert!(controller.values().expect("values").is_empty());
}
