//! Domain layer - core webhook protocol logic.

pub mod webhook;
