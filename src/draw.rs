// Window + software drawing utilities.
// Visual layout of the window:
// 1) The canvas on top, exactly canvas-sized.
// 2) The frame strip underneath: one 60x40 thumbnail per frame, current one framed.
// 3) A crosshair sized like the brush, and a tiny 5x7 HUD line over the canvas.

use crate::controls::Command;
use crate::error::Error;
use crate::thumbnail::{STRIP_H, THUMB_GAP, THUMB_H, THUMB_W, Thumbnail, slot_x, strip_scroll, visible_slots};
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

const STRIP_BG: u32 = 0x00_3A_3A_40;
const SELECTED_RING: u32 = 0x00_FF_CC_33;

/// Keys that map straight to a command (pressed once, no repeat).
const KEYMAP: [(Key, Command); 19] = [
    (Key::N, Command::NewFrame),
    (Key::D, Command::DuplicateFrame),
    (Key::X, Command::DeleteFrame),
    (Key::Delete, Command::DeleteFrame),
    (Key::Right, Command::NextFrame),
    (Key::Left, Command::PrevFrame),
    (Key::Space, Command::Play),
    (Key::S, Command::Stop),
    (Key::E, Command::ToggleErase),
    (Key::RightBracket, Command::BrushBigger),
    (Key::LeftBracket, Command::BrushSmaller),
    (Key::Key1, Command::PickColor(0)),
    (Key::Key2, Command::PickColor(1)),
    (Key::Key3, Command::PickColor(2)),
    (Key::Key4, Command::PickColor(3)),
    (Key::Key5, Command::PickColor(4)),
    (Key::Key6, Command::PickColor(5)),
    (Key::Key7, Command::PickColor(6)),
    (Key::Key8, Command::PickColor(7)),
];

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window with room for the canvas plus the strip below it.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, canvas_w: usize, canvas_h: usize) -> Result<Self, Error> {
        let (w, h) = screen_size(canvas_w, canvas_h);
        let window = Window::new(title, w, h, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        tracing::info!(width = w, height = h, "window opened");
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while outside the window.
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Commands for every mapped key pressed since the last update.
    pub fn pressed_commands(&self) -> Vec<Command> {
        KEYMAP
            .iter()
            .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|&(_, cmd)| cmd)
            .collect()
    }
}

/// Window size for a canvas of the given size.
pub fn screen_size(canvas_w: usize, canvas_h: usize) -> (usize, usize) {
    (canvas_w.max(THUMB_W + 2 * THUMB_GAP), canvas_h + STRIP_H)
}

/* ---------- Compositing: canvas + strip into the screen buffer ---------- */

/// Copy the canvas into the top of the screen and draw the strip below it.
/// Returns the index of the first thumbnail shown (for click mapping).
pub fn compose(screen: &mut FrameBuffer, canvas: &FrameBuffer, strip: &[Thumbnail]) -> usize {
    // 1) Background, then canvas rows, one memcpy per row.
    screen.pixels.fill(STRIP_BG);
    let w = canvas.width.min(screen.width);
    for y in 0..canvas.height.min(screen.height) {
        let dst = y * screen.width;
        let src = y * canvas.width;
        screen.pixels[dst..dst + w].copy_from_slice(&canvas.pixels[src..src + w]);
    }

    // 2) Thumbnails, scrolled so the selected one is on screen.
    let selected = strip.iter().position(|t| t.selected).unwrap_or(0);
    let first = strip_scroll(selected, visible_slots(screen.width));
    let y0 = (canvas.height + THUMB_GAP) as i32;
    for (slot, thumb) in strip.iter().skip(first).take(visible_slots(screen.width)).enumerate() {
        let x0 = slot_x(slot) as i32;
        blit(screen, &thumb.raster, x0, y0);
        if thumb.selected {
            draw_rect(screen, x0 - 2, y0 - 2, THUMB_W as i32 + 4, THUMB_H as i32 + 4, SELECTED_RING);
            draw_rect(screen, x0 - 1, y0 - 1, THUMB_W as i32 + 2, THUMB_H as i32 + 2, SELECTED_RING);
        }
    }
    first
}

/// Copy `src` onto `dst` with its top-left at (x0,y0), clipped.
fn blit(dst: &mut FrameBuffer, src: &FrameBuffer, x0: i32, y0: i32) {
    for sy in 0..src.height {
        for sx in 0..src.width {
            put_pixel(dst, x0 + sx as i32, y0 + sy as i32, src.pixels[sy * src.width + sx]);
        }
    }
}

/* ---------- Software drawing: pixels, lines, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// 1-pixel rectangle outline.
fn draw_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    let (x1, y1) = (x + w - 1, y + h - 1);
    draw_line(fb, x, y, x1, y, color);
    draw_line(fb, x, y1, x1, y1, color);
    draw_line(fb, x, y, x, y1, color);
    draw_line(fb, x1, y, x1, y1, color);
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" as wide as the brush (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    let size = size.max(4);
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (what "FRAME 2/5 | BRUSH 5 | ERASE | PLAY | FPS: 60.0" needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters the HUD uses
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, vertical bar, colon, dot, slash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, shadow: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass offset by (1,1), then the glyph itself.
        for (off, c) in [(1, shadow), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + off, y + ry as i32 + off, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, shadow: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, shadow);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// The HUD line for the current state.
pub fn hud_text(cursor: usize, frames: usize, brush: u32, erasing: bool, playing: bool, fps: f32) -> String {
    let mut hud = format!("FRAME {}/{} | BRUSH {}", cursor + 1, frames, brush);
    if erasing {
        hud.push_str(" | ERASE");
    }
    if playing {
        hud.push_str(" | PLAY");
    }
    hud.push_str(&format!(" | FPS: {fps:.1}"));
    hud
}
