pub mod segments;
pub mod time_source;
pub mod tuner;

pub use crate::domain::model::{Segment, SegmentSet, TimeSnapshot, TransmissionResult, TunerState};
pub use crate::domain::ports::{Clock, ConfigProvider, TransmissionFetcher};
pub use crate::utils::error::Result;
