//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EventHandler` - Processes a verified webhook event

mod event_handler;

pub use event_handler::EventHandler;
