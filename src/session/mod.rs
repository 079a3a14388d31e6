//! Session layer root module.
//!
//! Wraps a running game with an identity, a command inbox and the one-shot
//! end-of-game notification to the presentation layer.

pub mod messages;
pub mod session;
