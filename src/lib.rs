pub mod form;
pub mod keyboard;
pub mod prelude;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_public_api;

pub use form::{FormConfig, FormController, FormError, FormResult};
