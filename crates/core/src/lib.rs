#![deny(unused)]
//! Core types, traits, and error definitions for the clinic assistant.
//!
//! This crate holds the intent catalog data model, the rendered message
//! types exchanged with a conversation surface, and the configuration
//! shared by every layer.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
