//! Application Services (Use Cases)
//!
//! Stateful services that own client-side snapshots and talk to the API
//! through the [`MojifyApi`](crate::ports::MojifyApi) port.

mod agent_directory;
mod catalog;
mod feed_sync;
mod leaderboard;

#[cfg(test)]
pub(crate) mod fake_api;

pub use agent_directory::*;
pub use catalog::*;
pub use feed_sync::*;
pub use leaderboard::*;
