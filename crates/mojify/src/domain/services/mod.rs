//! Domain Services
//!
//! Stateless helpers over domain values.

mod time_ago;

pub use time_ago::*;
