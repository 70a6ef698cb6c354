//! Adapters - implementations of ports against concrete infrastructure.

pub mod events;
pub mod http;
