//! Integration test common infrastructure.
//!
//! Provides a recording client and helpers for asserting on which
//! handlers ran and with what arguments.

pub mod client;

#[allow(unused_imports)]
pub use client::{Calls, RecordingClient, channel_msg, private_msg, recorder};
