//! Cost Katana Webhook Receiver
//!
//! This crate implements the receiver side of the Cost Katana webhook
//! protocol: HMAC-SHA256 signature verification with replay protection,
//! and dispatch of verified event envelopes to registered handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
