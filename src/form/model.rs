use super::controller::{FormError, FormResult};
use super::value::{FieldKey, FieldMap, FromFieldValue};

/// A typed struct that maps onto a form's field map.
///
/// Usually derived with `#[derive(FormModel)]`, which also generates a
/// `<Name>Fields` type with one key accessor per field.
pub trait FormModel: Sized {
    type Fields;

    fn fields() -> Self::Fields;
    fn to_values(&self) -> FieldMap;
    fn from_values(values: &FieldMap) -> FormResult<Self>;
}

pub fn read_field<V>(values: &FieldMap, key: FieldKey) -> FormResult<V>
where
    V: FromFieldValue,
{
    let Some(value) = values.get(&key) else {
        return Err(FormError::UnknownField(key));
    };
    V::from_field_value(value).ok_or(FormError::TypeMismatch {
        field: key,
        expected: V::expected(),
    })
}
