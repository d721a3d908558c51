pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{FixedClock, GeminiFetcher, SystemClock};
pub use core::{segments::lit_segments, time_source::TimeSource, tuner::Tuner};
pub use domain::model::{Segment, SegmentSet, TimeSnapshot, TransmissionResult, TunerState};
pub use utils::error::{ChronosError, Result};
