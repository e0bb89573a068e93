use std::collections::BTreeSet;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::{ChangeEvent, SubmitEvent};
use super::handler::{BoxError, FormValidator, SubmitHandler};
use super::model::FormModel;
use super::value::{FieldErrors, FieldKey, FieldMap, FieldValue};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

/// Error key written when the submit-attempt limit is reached. It shares the
/// namespace of real fields, so a field named `submitAttempts` collides with it.
pub const SUBMIT_ATTEMPTS_KEY: FieldKey = FieldKey::from_static("submitAttempts");

pub const MAX_SUBMIT_ATTEMPTS_MESSAGE: &str = "Maximum number of submit attempts reached";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid form configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown field `{0}`")]
    UnknownField(FieldKey),
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidValue { field: FieldKey, reason: String },
    #[error("field `{field}` does not hold a {expected} value")]
    TypeMismatch {
        field: FieldKey,
        expected: &'static str,
    },
    #[error("submit handler failed: {0}")]
    SubmitFailed(#[source] BoxError),
    #[error("form state lock poisoned while {0}")]
    StatePoisoned(&'static str),
}

pub type FormResult<T> = Result<T, FormError>;

pub type ChangeHandler = Arc<dyn Fn(&ChangeEvent) -> FormResult<()> + Send + Sync>;

/// How a call to [`FormController::handle_submit`] ended without an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// The attempt limit was already reached; nothing ran.
    Rejected,
    /// The validator reported errors; the submit handler did not run.
    Invalid,
    Submitted,
}

/// Construction input for a [`FormController`].
///
/// Without a validator every submit passes validation. Without an attempt
/// limit submits are never rejected.
pub struct FormConfig {
    initial_values: FieldMap,
    on_submit: Arc<dyn SubmitHandler>,
    validator: Option<Arc<dyn FormValidator>>,
    max_submit_attempts: Option<u32>,
}

impl FormConfig {
    pub fn new<S>(initial_values: FieldMap, on_submit: S) -> Self
    where
        S: SubmitHandler + 'static,
    {
        Self {
            initial_values,
            on_submit: Arc::new(on_submit),
            validator: None,
            max_submit_attempts: None,
        }
    }

    pub fn from_model<M, S>(model: &M, on_submit: S) -> Self
    where
        M: FormModel,
        S: SubmitHandler + 'static,
    {
        Self::new(model.to_values(), on_submit)
    }

    pub fn validate<V>(mut self, validator: V) -> Self
    where
        V: FormValidator + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Must be positive; zero is rejected by [`FormConfig::build`].
    pub fn max_submit_attempts(mut self, limit: u32) -> Self {
        self.max_submit_attempts = Some(limit);
        self
    }

    pub fn build(self) -> FormResult<FormController> {
        FormController::new(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub form_id: FormId,
    pub values: FieldMap,
    pub errors: FieldErrors,
    pub dirty_fields: BTreeSet<FieldKey>,
    pub is_submitting: bool,
    pub submit_attempts: u32,
}

/// Everything a rendering surface needs to wire up one field.
#[derive(Clone)]
pub struct FieldProps {
    pub name: FieldKey,
    pub value: FieldValue,
    pub on_change: ChangeHandler,
    pub error: Option<String>,
}

impl Debug for FieldProps {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldProps")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

struct FormState {
    id: FormId,
    initial_values: FieldMap,
    values: FieldMap,
    errors: FieldErrors,
    dirty_fields: BTreeSet<FieldKey>,
    is_submitting: bool,
    submit_attempts: u32,
}

/// Owns one form's values, errors and submission bookkeeping.
///
/// Clones are handles to the same form.
#[derive(Clone)]
pub struct FormController {
    state: Arc<RwLock<FormState>>,
    validator: Option<Arc<dyn FormValidator>>,
    submit_handler: Arc<dyn SubmitHandler>,
    max_submit_attempts: Option<u32>,
    change_handler: ChangeHandler,
}

impl FormController {
    pub fn new(config: FormConfig) -> FormResult<Self> {
        let FormConfig {
            initial_values,
            on_submit,
            validator,
            max_submit_attempts,
        } = config;

        if max_submit_attempts == Some(0) {
            return Err(FormError::InvalidConfig(
                "max_submit_attempts must be a positive integer".to_string(),
            ));
        }
        for (key, value) in &initial_values {
            value.check_shape().map_err(|reason| {
                FormError::InvalidConfig(format!("initial value of `{key}`: {reason}"))
            })?;
        }

        let id = FormId::next();
        log::debug!(
            "form {id} created with {} fields, attempt limit {max_submit_attempts:?}",
            initial_values.len()
        );

        let state = Arc::new(RwLock::new(FormState {
            id,
            values: initial_values.clone(),
            initial_values,
            errors: FieldErrors::new(),
            dirty_fields: BTreeSet::new(),
            is_submitting: false,
            submit_attempts: 0,
        }));

        // Weak so the cached handler does not keep a dropped form alive.
        let weak_state = Arc::downgrade(&state);
        let change_handler: ChangeHandler = Arc::new(move |event: &ChangeEvent| {
            let Some(state) = weak_state.upgrade() else {
                return Ok(());
            };
            write_field(&state, event.name.clone(), event.field_value())
        });

        Ok(Self {
            state,
            validator,
            submit_handler: on_submit,
            max_submit_attempts,
            change_handler,
        })
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn max_submit_attempts(&self) -> Option<u32> {
        self.max_submit_attempts
    }

    pub fn set_field_value(
        &self,
        field: impl Into<FieldKey>,
        value: impl Into<FieldValue>,
    ) -> FormResult<()> {
        write_field(&self.state, field.into(), value.into())
    }

    pub fn handle_change(&self, event: &ChangeEvent) -> FormResult<()> {
        write_field(&self.state, event.name.clone(), event.field_value())
    }

    /// Validates and submits the current values.
    ///
    /// Validation failures and the attempt limit are reported through
    /// [`FormController::errors`]; only a failing submit handler yields `Err`.
    /// Overlapping calls are not serialized, see [`FormController::is_submitting`].
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> FormResult<SubmitOutcome> {
        event.prevent_default();

        let (id, values) = {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if let Some(limit) = self.max_submit_attempts {
                if state.submit_attempts >= limit {
                    log::warn!(
                        "form {} rejected submit: {} of {limit} attempts used",
                        state.id,
                        state.submit_attempts
                    );
                    state
                        .errors
                        .insert(SUBMIT_ATTEMPTS_KEY, MAX_SUBMIT_ATTEMPTS_MESSAGE.to_string());
                    return Ok(SubmitOutcome::Rejected);
                }
            }
            state.is_submitting = true;
            state.submit_attempts = state.submit_attempts.saturating_add(1);
            log::debug!("form {} submit attempt {}", state.id, state.submit_attempts);
            (state.id, state.values.clone())
        };
        let submitting = SubmittingGuard { state: &self.state };

        let validation_errors = self
            .validator
            .as_ref()
            .map(|validator| validator.validate(&values))
            .unwrap_or_default();
        if !validation_errors.is_empty() {
            log::debug!(
                "form {id} failed validation with {} errors",
                validation_errors.len()
            );
            write_lock(&self.state, "applying validation errors")?.errors = validation_errors;
            return Ok(SubmitOutcome::Invalid);
        }

        let result = self.submit_handler.submit(values).await;
        drop(submitting);
        match result {
            Ok(()) => {
                log::debug!("form {id} submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(error) => {
                log::debug!("form {id} submit handler failed: {error}");
                Err(FormError::SubmitFailed(error))
            }
        }
    }

    /// Restores the initial values and clears errors. Dirty fields and the
    /// attempt counter are kept; see [`FormController::reset_all`].
    pub fn reset(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.values = state.initial_values.clone();
        state.errors.clear();
        log::debug!("form {} reset", state.id);
        Ok(())
    }

    pub fn reset_all(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting all form state")?;
        state.values = state.initial_values.clone();
        state.errors.clear();
        state.dirty_fields.clear();
        state.submit_attempts = 0;
        log::debug!("form {} reset including attempts", state.id);
        Ok(())
    }

    pub fn get_field_value(&self, field: &str) -> FormResult<FieldValue> {
        read_lock(&self.state, "reading field value")?
            .values
            .get(field)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(FieldKey::new(field)))
    }

    pub fn get_form_field_props(&self, field: &str) -> FormResult<FieldProps> {
        let state = read_lock(&self.state, "reading field props")?;
        let Some((name, value)) = state.values.get_key_value(field) else {
            return Err(FormError::UnknownField(FieldKey::new(field)));
        };
        Ok(FieldProps {
            name: name.clone(),
            value: value.clone(),
            on_change: self.change_handler.clone(),
            error: state.errors.get(field).cloned(),
        })
    }

    pub fn change_handler(&self) -> ChangeHandler {
        self.change_handler.clone()
    }

    pub fn values(&self) -> FormResult<FieldMap> {
        Ok(read_lock(&self.state, "reading values")?.values.clone())
    }

    pub fn values_as<M>(&self) -> FormResult<M>
    where
        M: FormModel,
    {
        M::from_values(&read_lock(&self.state, "reading typed values")?.values)
    }

    pub fn initial_values(&self) -> FormResult<FieldMap> {
        Ok(read_lock(&self.state, "reading initial values")?
            .initial_values
            .clone())
    }

    pub fn errors(&self) -> FormResult<FieldErrors> {
        Ok(read_lock(&self.state, "reading errors")?.errors.clone())
    }

    pub fn dirty_fields(&self) -> FormResult<BTreeSet<FieldKey>> {
        Ok(read_lock(&self.state, "reading dirty fields")?
            .dirty_fields
            .clone())
    }

    pub fn is_dirty(&self, field: &str) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading dirty flag")?
            .dirty_fields
            .contains(field))
    }

    /// True while a submit is between acceptance and its outcome. Callers that
    /// want a single in-flight submit should check this before submitting.
    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading submitting flag")?.is_submitting)
    }

    pub fn submit_attempts(&self) -> FormResult<u32> {
        Ok(read_lock(&self.state, "reading submit attempts")?.submit_attempts)
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        Ok(FormSnapshot {
            form_id: state.id,
            values: state.values.clone(),
            errors: state.errors.clone(),
            dirty_fields: state.dirty_fields.clone(),
            is_submitting: state.is_submitting,
            submit_attempts: state.submit_attempts,
        })
    }
}

/// Clears `is_submitting` when an accepted submit ends, including when the
/// submit future is dropped or the validator or handler panics.
struct SubmittingGuard<'a> {
    state: &'a RwLock<FormState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.is_submitting = false;
    }
}

fn write_field(lock: &RwLock<FormState>, field: FieldKey, value: FieldValue) -> FormResult<()> {
    let mut state = write_lock(lock, "writing field value")?;
    if !state.values.contains_key(&field) {
        return Err(FormError::UnknownField(field));
    }
    if let Err(reason) = value.check_shape() {
        return Err(FormError::InvalidValue { field, reason });
    }
    log::trace!("form {} set field `{field}`", state.id);
    state.errors.remove(&field);
    state.values.insert(field.clone(), value);
    state.dirty_fields.insert(field);
    Ok(())
}

fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
