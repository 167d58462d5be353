//! Application layer for COSMOS.
//!
//! Wires the core state machines to real time and to the infrastructure
//! adapters: entry submission, routing, the composed meditation screen, a
//! headless narrated player and the reference timeline.

pub mod clock;
pub mod entry_usecase;
pub mod headless;
pub mod meditation_run;
pub mod router;
pub mod timeline;

pub use clock::TokioClock;
pub use entry_usecase::{EntryUseCase, PreloadOutcome, Submission};
pub use headless::{HeadlessPlayer, Narration, Narrator};
pub use meditation_run::{
    MeditationRun, MeditationView, MusicIndicator, Panel, ScaleReflection, TickOutcome,
};
pub use router::Router;
pub use timeline::{TimelineEntry, reference_timeline};
