//! BAML schema emission.
//!
//! Turns catalog definitions into `class` and `enum` blocks, in dependency
//! order, with member documentation attached.

mod config;
mod emitter;

#[cfg(test)]
mod emitter_tests;

pub use config::Config;
pub use emitter::Emitter;
