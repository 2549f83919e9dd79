//! Input crate: the action dispatcher and the terminal key-code adapter.

pub mod dispatcher;
pub mod map;

pub use dispatcher::InputDispatcher;
pub use map::{key_name, should_quit};
