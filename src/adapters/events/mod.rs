//! Event handler adapters.

mod log_handler;

pub use log_handler::LogEventHandler;
