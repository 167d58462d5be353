//! Audio backends.
//!
//! [`ExternalPlayerBackend`] plays through a command-line player such as
//! `ffplay`; [`SilentAudioBackend`] keeps the contract without sound.

mod external;
mod preload;
mod silent;

pub use external::{ExternalPlayer, ExternalPlayerBackend, PlayerKind};
pub use preload::FileAudioPreloader;
pub use silent::{SilentAudioBackend, SilentPlayer};
