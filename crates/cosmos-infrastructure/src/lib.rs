//! Filesystem, process and logging adapters for COSMOS.

pub mod audio;
pub mod config_service;
pub mod logging;
pub mod paths;

pub use crate::audio::{ExternalPlayerBackend, FileAudioPreloader, SilentAudioBackend};
pub use crate::config_service::ConfigService;
pub use crate::paths::CosmosPaths;
