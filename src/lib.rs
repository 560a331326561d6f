// Flipbook: draw on one canvas, capture it as frames, flip through them.
//
// Module map:
// - frames:    the frame store (sequence + cursor + every frame operation)
// - surface:   the canvas the store reads from / writes to
// - playback:  clock-driven, cancellable flipbook playback
// - thumbnail: 60x40 strip pictures and strip layout
// - brush:     freehand strokes onto the canvas
// - controls:  commands and the session that routes them
// - draw:      minifb window, compositing, HUD
// - config / error: command line and error type

pub mod brush;
pub mod config;
pub mod controls;
pub mod draw;
pub mod error;
pub mod frames;
pub mod playback;
pub mod surface;
pub mod thumbnail;
pub mod types;

pub use brush::{Brush, StrokeRenderer};
pub use config::{Cli, Config};
pub use controls::{Command, Session};
pub use error::{Error, Result};
pub use frames::FrameStore;
pub use playback::PlaybackTicket;
pub use surface::{Canvas, DrawingSurface};
pub use thumbnail::Thumbnail;
pub use types::{Frame, FrameBuffer};
