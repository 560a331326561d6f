// Freehand strokes: round-capped lines painted straight onto the canvas.
// Visual: hold the left button and drag; a line of the brush width and colour
// follows the pointer. In erase mode the line is paper-white.

use crate::surface::Canvas;
use crate::types::{FrameBuffer, PAPER};

pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 64;

/// What the next stroke looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    pub size: u32,   // line width in pixels
    pub color: u32,  // 0x00RRGGBB
    pub erasing: bool,
}

impl Brush {
    pub fn new(size: u32, color: u32) -> Self {
        Self { size: size.clamp(MIN_BRUSH, MAX_BRUSH), color, erasing: false }
    }

    /// The colour actually laid down.
    pub fn ink(&self) -> u32 {
        if self.erasing { PAPER } else { self.color }
    }

    pub fn grow(&mut self, by: u32) {
        self.size = self.size.saturating_add(by).min(MAX_BRUSH);
    }

    pub fn shrink(&mut self, by: u32) {
        self.size = self.size.saturating_sub(by).max(MIN_BRUSH);
    }
}

/// Pointer state for the stroke in progress.
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    drawing: bool,
    last: (i32, i32),
}

impl StrokeRenderer {
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Begin a stroke. Visual: a single round dot appears under the pointer.
    pub fn pointer_down(&mut self, x: i32, y: i32, brush: &Brush, canvas: &mut Canvas) {
        self.drawing = true;
        self.last = (x, y);
        stamp_disc(canvas.buffer_mut(), x, y, brush.size, brush.ink());
    }

    /// Extend the stroke to (x, y). Ignored unless a stroke is in progress.
    pub fn pointer_move(&mut self, x: i32, y: i32, brush: &Brush, canvas: &mut Canvas) {
        if !self.drawing || (x, y) == self.last {
            return;
        }
        let (x0, y0) = self.last;
        draw_thick_line(canvas.buffer_mut(), x0, y0, x, y, brush.size, brush.ink());
        self.last = (x, y);
    }

    /// End the stroke. Returns true if one was in progress, meaning the
    /// canvas changed and the current frame should be committed.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::take(&mut self.drawing)
    }
}

/// Fill a disc of diameter `size` centred at (cx, cy), clipped to the buffer.
fn stamp_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, size: u32, color: u32) {
    let r = size as f32 / 2.0;
    let reach = r.ceil() as i32;
    let r2 = r * r;
    let (w, h) = (fb.width as i32, fb.height as i32);

    for y in (cy - reach)..=(cy + reach) {
        if y < 0 || y >= h { continue; }
        for x in (cx - reach)..=(cx + reach) {
            if x < 0 || x >= w { continue; }
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            // Size 1 still paints its centre pixel.
            if dx * dx + dy * dy <= r2.max(0.25) {
                fb.pixels[y as usize * fb.width + x as usize] = color;
            }
        }
    }
}

/// Walk the line with Bresenham and dab a disc at every step.
/// Visual: a solid line with round ends, `size` pixels thick.
fn draw_thick_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, size: u32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp_disc(fb, x0, y0, size, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_size_is_clamped() {
        let mut b = Brush::new(0, 0);
        assert_eq!(b.size, MIN_BRUSH);
        b.grow(1000);
        assert_eq!(b.size, MAX_BRUSH);
        b.shrink(1000);
        assert_eq!(b.size, MIN_BRUSH);
    }

    #[test]
    fn eraser_paints_paper() {
        let mut b = Brush::new(3, 0x00_12_34_56);
        assert_eq!(b.ink(), 0x00_12_34_56);
        b.erasing = true;
        assert_eq!(b.ink(), PAPER);
    }

    #[test]
    fn stroke_paints_between_points() {
        let mut canvas = Canvas::new(20, 10);
        let brush = Brush::new(1, 0);
        let mut stroke = StrokeRenderer::default();

        stroke.pointer_down(2, 5, &brush, &mut canvas);
        stroke.pointer_move(12, 5, &brush, &mut canvas);
        assert!(stroke.pointer_up());

        let fb = canvas.buffer();
        for x in 2..=12 {
            assert_eq!(fb.get(x, 5), Some(0), "x={x}");
        }
        assert_eq!(fb.get(13, 5), Some(PAPER));
        assert_eq!(fb.get(7, 4), Some(PAPER));
    }

    #[test]
    fn wide_brush_covers_its_radius() {
        let mut canvas = Canvas::new(20, 20);
        let brush = Brush::new(6, 0);
        let mut stroke = StrokeRenderer::default();
        stroke.pointer_down(10, 10, &brush, &mut canvas);
        let fb = canvas.buffer();
        assert_eq!(fb.get(13, 10), Some(0));
        assert_eq!(fb.get(10, 7), Some(0));
        assert_eq!(fb.get(14, 10), Some(PAPER));
    }

    #[test]
    fn move_without_down_paints_nothing() {
        let mut canvas = Canvas::new(10, 10);
        let mut stroke = StrokeRenderer::default();
        stroke.pointer_move(5, 5, &Brush::new(4, 0), &mut canvas);
        assert!(canvas.buffer().pixels.iter().all(|&p| p == PAPER));
        assert!(!stroke.pointer_up());
    }

    #[test]
    fn strokes_clip_at_edges() {
        let mut canvas = Canvas::new(4, 4);
        let brush = Brush::new(10, 0);
        let mut stroke = StrokeRenderer::default();
        stroke.pointer_down(-3, -3, &brush, &mut canvas);
        stroke.pointer_move(8, 8, &brush, &mut canvas);
        assert_eq!(canvas.buffer().get(0, 0), Some(0));
    }
}
