//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the application layer reaches the
//! Mojify HTTP API. The reqwest implementation lives in the CLI crate.

mod api;

pub use api::*;
