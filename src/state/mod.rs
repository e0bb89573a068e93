mod disclosure;
mod previous;
mod toggle;

pub use disclosure::Disclosure;
pub use previous::Previous;
pub use toggle::{Toggle, ToggleValue};
