//! Core type definitions for the clinic assistant.

pub mod intent;
pub mod message;
pub mod transcript;

pub use intent::*;
pub use message::*;
pub use transcript::*;
