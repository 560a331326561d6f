// Core pixel types shared by the canvas, the frame store and the window.

use std::rc::Rc;

/// Paper colour: a cleared canvas and the eraser both paint this.
pub const PAPER: u32 = 0x00_FF_FF_FF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the buffer is on screen (pixels)
    pub height: usize,     // how tall the buffer is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with one colour.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// One captured animation cell: the full canvas at capture time.
/// Visual: what the canvas shows again when this frame becomes current.
///
/// Pixels live behind an `Rc` so a frame never changes after capture. Every
/// capture allocates fresh pixels; clones of one frame share them, which is
/// how the strip tells an unchanged frame from a newly captured one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Rc<[u32]>,
}

impl Frame {
    pub fn from_buffer(fb: &FrameBuffer) -> Self {
        Self { width: fb.width, height: fb.height, pixels: Rc::from(fb.pixels.as_slice()) }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// True when both frames share the same pixel storage (not just equal pixels).
    pub fn shares_pixels_with(&self, other: &Frame) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Pack 8-bit channels as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split 0x00RRGGBB into 8-bit channels.
#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_captures_a_snapshot_not_a_view() {
        let mut fb = FrameBuffer::filled(3, 2, PAPER);
        let frame = Frame::from_buffer(&fb);
        fb.pixels[0] = 0;
        assert_eq!(frame.pixels()[0], PAPER);
        assert_eq!((frame.width(), frame.height()), (3, 2));
    }

    #[test]
    fn clone_shares_storage() {
        let frame = Frame::from_buffer(&FrameBuffer::filled(2, 2, 7));
        let copy = frame.clone();
        assert!(copy.shares_pixels_with(&frame));
        assert!(!Frame::from_buffer(&FrameBuffer::filled(2, 2, 7)).shares_pixels_with(&frame));
    }

    #[test]
    fn rgb_packing() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x00_12_34_56);
        assert_eq!(unpack_rgb(0x00_AB_CD_EF), (0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn get_is_bounds_checked() {
        let fb = FrameBuffer::filled(2, 2, 1);
        assert_eq!(fb.get(1, 1), Some(1));
        assert_eq!(fb.get(2, 0), None);
    }
}
