//! Table rows for each kind of output

mod account;
mod choice;
pub(crate) mod common;

pub use account::AccountDisplay;
pub use choice::ChoiceDisplay;
