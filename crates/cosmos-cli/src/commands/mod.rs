pub mod config;
pub mod guide;
pub mod play;
pub mod run;
pub mod timeline;
pub mod utils;
