//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod api_key;
mod fingerprint;
mod media_type;
mod prompt_status;
mod search_entity_type;
mod sort_mode;
mod vote_value;

pub use api_key::*;
pub use fingerprint::*;
pub use media_type::*;
pub use prompt_status::*;
pub use search_entity_type::*;
pub use sort_mode::*;
pub use vote_value::*;
