//! Click-to-draw rectangles with debounced removal and closest-area painting.
//!
//! [`session::DrawingSession`] holds all state and logic; it emits
//! [`render::RenderCommand`]s that a drawing surface applies to a
//! [`render::Scene`]. The `rectpaint` binary hosts it in a druid window.

pub mod color;
pub mod config;
pub mod debounce;
pub mod diagnostics;
pub mod pairing;
pub mod rectangle;
pub mod render;
pub mod session;

pub use config::Config;
pub use rectangle::{RectId, Rectangle, Rgb};
pub use render::{RenderCommand, Scene};
pub use session::{DrawingSession, Mode, Outcome, ScheduledFlush};
