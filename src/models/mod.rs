//! Display models for CLI output
//!
//! Converts vocabulary choices and API types into rows for table output.

pub mod display;

pub use display::{AccountDisplay, ChoiceDisplay};
