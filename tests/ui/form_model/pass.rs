use formstate::form::{FieldValue, FormModel};

#[derive(Clone, Debug, PartialEq, formstate::form::FormModel)]
struct DemoForm {
    email: String,
    subscribed: bool,
}

fn main() {
    let fields = DemoForm::fields();
    let model = DemoForm {
        email: "a@example.com".to_string(),
        subscribed: true,
    };

    let values = model.to_values();
    assert_eq!(fields.email().as_str(), "email");
    assert_eq!(values.get("subscribed"), Some(&FieldValue::Bool(true)));
    assert_eq!(DemoForm::from_values(&values).ok(), Some(model));
}
