//! Core domain for COSMOS, the cosmic perspective meditation.
//!
//! This crate is framework-free: it holds the session record, the timing
//! tables, the guide script, the scene contract and the meditation
//! sequencer. Time is always supplied by the caller through [`clock::Clock`],
//! so every behavior here can be exercised deterministically.

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod guide;
pub mod navigation;
pub mod reflection;
pub mod scale;
pub mod scene;
pub mod sequencer;
pub mod session;
pub mod timer;
pub mod timing;

// Re-export common types
pub use error::{CosmosError, Result};
pub use navigation::Route;
pub use scale::Scale;
pub use session::Session;
