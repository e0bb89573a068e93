pub use crate::form::{
    BoxError, ChangeEvent, FieldErrors, FieldKey, FieldMap, FieldProps, FieldValue, FileRef,
    FormConfig, FormController, FormError, FormModel, FormResult, FormSnapshot, FormValidator,
    InputKind, SubmitEvent, SubmitHandler, SubmitOutcome, SyncSubmit,
};
pub use crate::keyboard::{KeyEvent, KeyModifier, KeyboardShortcut};
pub use crate::state::{Disclosure, Previous, Toggle, ToggleValue};
pub use crate::utils::{
    DateFormat, Debouncer, InvalidDate, Throttle, clamp, format_date, format_date_str, parse_date,
    user_initials,
};
