//! The meditation sequencer.
//!
//! Earth → Solar → Galaxy → Universe → Reflecting → Completed, on the fixed
//! schedule of [`crate::timing`].

mod machine;
mod state;

#[cfg(test)]
mod machine_test;

pub use machine::Sequencer;
pub use state::{RunSnapshot, RunState, SequencerEvent};
