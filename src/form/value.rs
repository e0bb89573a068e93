use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Name of a field. Ordered and hashed by its string content.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(Cow<'static, str>);

impl FieldKey {
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FieldKey {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for FieldKey {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// A reference to a file picked by the user. The bytes stay with the host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub mime_type: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Null,
    Text,
    Number,
    Bool,
    Date,
    File,
    List,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Null => "null",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Bool => "bool",
            FieldKind::Date => "date",
            FieldKind::File => "file",
            FieldKind::List => "list",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Number(Decimal),
    Bool(bool),
    Date(NaiveDate),
    File(FileRef),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Null => FieldKind::Null,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::File(_) => FieldKind::File,
            FieldValue::List(_) => FieldKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Lists hold scalars of a single kind.
    pub(crate) fn check_shape(&self) -> Result<(), String> {
        let FieldValue::List(items) = self else {
            return Ok(());
        };
        let mut first_kind = None;
        for item in items {
            let kind = item.kind();
            if kind == FieldKind::List {
                return Err("lists cannot contain lists".to_string());
            }
            match first_kind {
                None => first_kind = Some(kind),
                Some(expected) if expected != kind => {
                    return Err(format!(
                        "list mixes {} and {} items",
                        expected.as_str(),
                        kind.as_str()
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

pub type FieldMap = BTreeMap<FieldKey, FieldValue>;
pub type FieldErrors = BTreeMap<FieldKey, String>;

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<FileRef> for FieldValue {
    fn from(value: FileRef) -> Self {
        FieldValue::File(value)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T> From<Vec<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Vec<T>) -> Self {
        FieldValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// Reads a typed value back out of a [`FieldValue`].
pub trait FromFieldValue: Sized {
    fn expected() -> &'static str;
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    fn expected() -> &'static str {
        "any"
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromFieldValue for String {
    fn expected() -> &'static str {
        FieldKind::Text.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

impl FromFieldValue for bool {
    fn expected() -> &'static str {
        FieldKind::Bool.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFieldValue for Decimal {
    fn expected() -> &'static str {
        FieldKind::Number.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    fn expected() -> &'static str {
        "integer"
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(number) if number.fract().is_zero() => number.to_i64(),
            _ => None,
        }
    }
}

impl FromFieldValue for u32 {
    fn expected() -> &'static str {
        "unsigned integer"
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(number) if number.fract().is_zero() => number.to_u32(),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDate {
    fn expected() -> &'static str {
        FieldKind::Date.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl FromFieldValue for FileRef {
    fn expected() -> &'static str {
        FieldKind::File.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::File(file) => Some(file.clone()),
            _ => None,
        }
    }
}

impl<T> FromFieldValue for Option<T>
where
    T: FromFieldValue,
{
    fn expected() -> &'static str {
        T::expected()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_field_value(value).map(Some)
    }
}

impl<T> FromFieldValue for Vec<T>
where
    T: FromFieldValue,
{
    fn expected() -> &'static str {
        FieldKind::List.as_str()
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.iter().map(T::from_field_value).collect(),
            _ => None,
        }
    }
}
