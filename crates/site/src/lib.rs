#![deny(unused)]
//! Page behaviours of the clinic website, as headless state machines.
//!
//! - Theme preference with persisted storage
//! - Responsive navigation menu
//! - One-shot scroll reveal scheduling

pub mod nav;
pub mod reveal;
pub mod storage;
pub mod theme;

pub use nav::{NavEvent, NavMenu};
pub use reveal::{RevealEnvironment, RevealPlan, RevealTracker};
pub use storage::{MemoryStorage, PreferenceStore, StorageError};
pub use theme::{Theme, ThemeController};
