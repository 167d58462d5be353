//! Contract between the run and whatever draws the cosmos.
//!
//! The renderer is free to draw however it likes; it receives which layers
//! are visible and how opaque they are, plus where the camera is.

pub mod camera;
pub mod directive;

pub use camera::{CameraRig, Vec3, camera_preset};
pub use directive::{Layer, LayerState, SceneDirective};
