use std::future::{Future, ready};
use std::pin::Pin;

use super::value::{FieldErrors, FieldMap};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxedSubmitFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// Computes per-field error messages for the current values.
pub trait FormValidator: Send + Sync {
    fn validate(&self, values: &FieldMap) -> FieldErrors;
}

impl<F> FormValidator for F
where
    F: Fn(&FieldMap) -> FieldErrors + Send + Sync,
{
    fn validate(&self, values: &FieldMap) -> FieldErrors {
        (self)(values)
    }
}

/// Performs the form's side effect once validation passes.
pub trait SubmitHandler: Send + Sync {
    fn submit(&self, values: FieldMap) -> BoxedSubmitFuture;
}

impl<F, Fut> SubmitHandler for F
where
    F: Fn(FieldMap) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn submit(&self, values: FieldMap) -> BoxedSubmitFuture {
        Box::pin((self)(values))
    }
}

/// Adapts a blocking submit function; it runs before the returned future is polled.
pub struct SyncSubmit<F>(pub F);

impl<F> SubmitHandler for SyncSubmit<F>
where
    F: Fn(&FieldMap) -> Result<(), BoxError> + Send + Sync,
{
    fn submit(&self, values: FieldMap) -> BoxedSubmitFuture {
        Box::pin(ready((self.0)(&values)))
    }
}
