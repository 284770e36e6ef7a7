//! Shared utilities for the AgriCarbon core.

pub mod display;
pub mod logging;

pub use display::format_credits;
pub use logging::init_tracing;
