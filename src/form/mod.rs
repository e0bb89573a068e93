mod controller;
mod event;
mod handler;
mod model;
mod value;


pub use controller::{
    ChangeHandler, FieldProps, FormConfig, FormController, FormError, FormId, FormResult,
    FormSnapshot, MAX_SUBMIT_ATTEMPTS_MESSAGE, SUBMIT_ATTEMPTS_KEY, SubmitOutcome,
};
pub use event::{ChangeEvent, InputKind, SubmitEvent};
pub use formstate_derive::FormModel;
pub use handler::{BoxError, BoxedSubmitFuture, FormValidator, SubmitHandler, SyncSubmit};
pub use model::{FormModel, read_field};
pub use value::{FieldErrors, FieldKey, FieldKind, FieldMap, FieldValue, FileRef, FromFieldValue};
