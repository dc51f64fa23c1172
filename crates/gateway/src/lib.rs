#![deny(unused)]
//! Intent resolution and chat gateway for the clinic assistant.
//!
//! This crate provides text normalization, the keyword intent resolver,
//! answer rendering, the conversation flow and its HTTP entry point.

pub mod catalog;
pub mod conversation;
pub mod normalizer;
pub mod renderer;
pub mod router;
pub mod server;

pub use catalog::{clinic_catalog, load_catalog};
pub use conversation::{Conversation, ConversationScript, Reply, SurfaceState};
pub use normalizer::{Normalizer, Strategy};
pub use renderer::render;
pub use router::KeywordResolver;
pub use server::{GatewayConfig, GatewayServer};
