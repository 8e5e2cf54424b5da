//! Report output: colored console and machine-readable JSON.

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
