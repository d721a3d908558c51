// Adapters layer: concrete implementations of the domain ports (system clock, model API).

pub mod clock;
pub mod gemini;

pub use clock::{FixedClock, SystemClock};
pub use gemini::GeminiFetcher;
