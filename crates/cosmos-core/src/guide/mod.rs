//! Guidance text shown during the scales.

pub mod presenter;
pub mod script;

pub use presenter::{GuidePresenter, GuideView};
