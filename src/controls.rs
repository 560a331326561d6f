// Control surface: what each button, key and pointer event does.
// The window layer turns raw input into `Command`s and pointer calls; this
// module routes them to the frame store and the brush.

use std::time::{Duration, Instant};

use crate::brush::{Brush, StrokeRenderer};
use crate::config::Config;
use crate::frames::FrameStore;
use crate::surface::Canvas;

/// Colours on the 1..8 keys.
pub const PALETTE: [u32; 8] = [
    0x00_00_00_00, // black
    0x00_E0_30_30, // red
    0x00_F0_90_20, // orange
    0x00_F0_D0_20, // yellow
    0x00_30_B0_40, // green
    0x00_30_60_E0, // blue
    0x00_90_40_C0, // purple
    0x00_80_50_30, // brown
];

/// How much `[` and `]` change the brush width.
pub const BRUSH_STEP: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NewFrame,
    DuplicateFrame,
    DeleteFrame,
    NextFrame,
    PrevFrame,
    SelectFrame(usize),
    Play,
    Stop,
    ToggleErase,
    BrushBigger,
    BrushSmaller,
    PickColor(usize),
}

impl Command {
    /// True for commands that move the cursor or repaint the canvas.
    pub fn changes_frames(&self) -> bool {
        !matches!(
            self,
            Command::Stop
                | Command::ToggleErase
                | Command::BrushBigger
                | Command::BrushSmaller
                | Command::PickColor(_)
        )
    }
}

/// Everything one drawing session owns: the canvas, its frames and the brush.
#[derive(Debug)]
pub struct Session {
    pub canvas: Canvas,
    pub store: FrameStore,
    pub brush: Brush,
    stroke: StrokeRenderer,
    interval: Duration,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let mut canvas = Canvas::new(config.width, config.height);
        let store = FrameStore::initialize(&mut canvas);
        Self {
            canvas,
            store,
            brush: Brush::new(config.brush_size, config.color),
            stroke: StrokeRenderer::default(),
            interval: config.interval,
        }
    }

    pub fn apply(&mut self, cmd: Command, now: Instant) {
        tracing::debug!(?cmd, "command");
        // A stroke never spans two frames: finish it on the frame it started on.
        if cmd.changes_frames() {
            self.pointer_up();
        }
        let canvas = &mut self.canvas;
        match cmd {
            Command::NewFrame => self.store.create_new(canvas),
            Command::DuplicateFrame => self.store.duplicate_current(canvas),
            Command::DeleteFrame => self.store.delete_current(canvas),
            Command::NextFrame => self.store.advance(canvas),
            Command::PrevFrame => self.store.retreat(canvas),
            Command::SelectFrame(i) => self.store.select_frame(i, canvas),
            Command::Play => {
                self.store.play(self.interval, now, canvas);
            }
            Command::Stop => self.store.stop_playback(),
            Command::ToggleErase => self.brush.erasing = !self.brush.erasing,
            Command::BrushBigger => self.brush.grow(BRUSH_STEP),
            Command::BrushSmaller => self.brush.shrink(BRUSH_STEP),
            Command::PickColor(i) => {
                if let Some(&color) = PALETTE.get(i) {
                    self.brush.color = color;
                    self.brush.erasing = false;
                }
            }
        }
    }

    /// Visual: drawing starts; a running playback freezes on its current frame.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.store.stop_playback();
        self.stroke.pointer_down(x, y, &self.brush, &mut self.canvas);
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.stroke.pointer_move(x, y, &self.brush, &mut self.canvas);
    }

    /// Releasing the button saves the stroke into the current frame.
    /// Visual: the current thumbnail catches up with the canvas.
    pub fn pointer_up(&mut self) {
        if self.stroke.pointer_up() {
            self.store.commit_current(&self.canvas);
            self.store.refresh_thumbnails();
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    /// Let playback advance. Returns the frame shown this tick, if any.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        self.store.tick(now, &mut self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PAPER;

    fn config() -> Config {
        Config { width: 16, height: 12, interval: Duration::from_millis(100), brush_size: 2, color: 0 }
    }

    #[test]
    fn buttons_route_to_the_store() {
        let mut s = Session::new(&config());
        let now = Instant::now();
        s.apply(Command::NewFrame, now);
        s.apply(Command::DuplicateFrame, now);
        assert_eq!((s.store.len(), s.store.cursor()), (3, 2));
        s.apply(Command::PrevFrame, now);
        s.apply(Command::DeleteFrame, now);
        assert_eq!((s.store.len(), s.store.cursor()), (2, 0));
        s.apply(Command::SelectFrame(1), now);
        assert_eq!(s.store.cursor(), 1);
        s.apply(Command::NextFrame, now);
        assert_eq!(s.store.cursor(), 1);
    }

    #[test]
    fn brush_commands_only_touch_the_brush() {
        let mut s = Session::new(&config());
        let now = Instant::now();
        s.apply(Command::BrushBigger, now);
        s.apply(Command::PickColor(1), now);
        s.apply(Command::ToggleErase, now);
        assert_eq!(s.brush.size, 3);
        assert_eq!(s.brush.color, PALETTE[1]);
        assert!(s.brush.erasing);
        s.apply(Command::PickColor(99), now);
        assert!(s.brush.erasing);
        assert_eq!(s.store.len(), 1);
    }

    #[test]
    fn pointer_up_commits_the_stroke() {
        let mut s = Session::new(&config());
        s.pointer_down(3, 3);
        s.pointer_move(8, 3);
        assert!(s.is_drawing());
        assert_eq!(s.store.frames()[0].pixels()[3 * 16 + 5], PAPER);
        s.pointer_up();
        assert_eq!(s.store.frames()[0].pixels()[3 * 16 + 5], 0);
        assert!(!s.is_drawing());
    }

    #[test]
    fn drawing_stops_playback() {
        let mut s = Session::new(&config());
        let now = Instant::now();
        s.apply(Command::NewFrame, now);
        s.apply(Command::Play, now);
        assert!(s.store.is_playing());
        s.pointer_down(1, 1);
        assert!(!s.store.is_playing());
        assert_eq!(s.tick(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn stop_command_cancels_playback() {
        let mut s = Session::new(&config());
        let now = Instant::now();
        s.apply(Command::Play, now);
        s.apply(Command::Stop, now);
        assert!(!s.store.is_playing());
    }

    #[test]
    fn play_mid_stroke_keeps_the_stroke_on_its_own_frame() {
        let mut s = Session::new(&config());
        let now = Instant::now();
        s.apply(Command::NewFrame, now);
        s.pointer_down(1, 1);
        s.apply(Command::Play, now);
        assert!(!s.is_drawing());
        assert_eq!(s.store.frames()[1].pixels()[16 + 1], 0);

        assert_eq!(s.tick(now + Duration::from_millis(100)), Some(0));
        s.pointer_move(10, 1);
        s.pointer_up();

        assert!(s.store.frames()[0].pixels().iter().all(|&p| p == PAPER));
        assert!(s.store.is_playing());
    }

    #[test]
    fn brush_commands_do_not_end_a_stroke() {
        let mut s = Session::new(&config());
        s.pointer_down(1, 1);
        s.apply(Command::BrushBigger, Instant::now());
        assert!(s.is_drawing());
        s.apply(Command::NextFrame, Instant::now());
        assert!(!s.is_drawing());
    }
}
