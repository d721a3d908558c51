// Terminal presentation: theme styler, seven-segment glyphs, app model, rendering and event loop.

pub mod app;
pub mod digits;
pub mod render;
pub mod runner;
pub mod theme;

pub use app::{Action, ClockApp};
pub use theme::{Theme, ThemeStyle};
