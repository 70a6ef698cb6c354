//! Application layer - orchestration of the verify-then-dispatch flow.

mod dispatcher;

pub use dispatcher::{DispatchOutcome, EventDispatcher};
