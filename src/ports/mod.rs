//! Port traits: the seams between domain logic and the outside world.

pub mod config_port;
pub mod quote_port;
