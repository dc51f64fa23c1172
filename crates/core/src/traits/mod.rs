//! Core trait definitions for the clinic assistant.
//!
//! These are the seams between the matching engine and whatever surface
//! drives it (HTTP sessions, a browser widget, tests).

pub mod resolver;
pub mod view;

pub use resolver::*;
pub use view::*;
