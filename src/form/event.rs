use super::value::{FieldKey, FieldValue};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

/// A value change reported by an input control.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeEvent {
    pub name: FieldKey,
    pub value: String,
    pub kind: InputKind,
    pub checked: bool,
}

impl ChangeEvent {
    pub fn new(name: impl Into<FieldKey>, value: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            checked: false,
        }
    }

    pub fn text(name: impl Into<FieldKey>, value: impl Into<String>) -> Self {
        Self::new(name, value, InputKind::Text)
    }

    /// Checkbox controls still report a raw `value` (usually `"on"`); it is ignored.
    pub fn checkbox(name: impl Into<FieldKey>, checked: bool) -> Self {
        Self {
            name: name.into(),
            value: "on".to_string(),
            kind: InputKind::Checkbox,
            checked,
        }
    }

    pub fn field_value(&self) -> FieldValue {
        if self.kind == InputKind::Checkbox {
            FieldValue::Bool(self.checked)
        } else {
            FieldValue::Text(self.value.clone())
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
