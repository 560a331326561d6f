// Thumbnails for the frame strip under the canvas.
// Visual: each frame appears as a small 60x40 picture; the current one is framed.

use std::rc::Rc;

use image::{ImageBuffer, Rgb, RgbImage, imageops::FilterType};

use crate::types::{Frame, FrameBuffer, pack_rgb, unpack_rgb};

pub const THUMB_W: usize = 60;
pub const THUMB_H: usize = 40;
/// Gap between thumbnails and around the strip.
pub const THUMB_GAP: usize = 6;
/// Total strip height below the canvas.
pub const STRIP_H: usize = THUMB_H + 2 * THUMB_GAP;

/// One entry of the strip: which frame, its picture, and whether it is current.
/// The raster is shared with the store's cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub raster: Rc<FrameBuffer>,
    pub selected: bool,
}

/// Downscale a full frame to THUMB_W x THUMB_H.
pub fn downscale(frame: &Frame) -> FrameBuffer {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    if w == 0 || h == 0 {
        return FrameBuffer::filled(THUMB_W, THUMB_H, 0);
    }

    // 1) 0x00RRGGBB -> RGB8 image so `image` can filter it.
    let mut raw = Vec::with_capacity(frame.pixels().len() * 3);
    for &px in frame.pixels() {
        let (r, g, b) = unpack_rgb(px);
        raw.extend_from_slice(&[r, g, b]);
    }
    let src: RgbImage = match ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, raw) {
        Some(img) => img,
        None => return FrameBuffer::filled(THUMB_W, THUMB_H, 0),
    };

    // 2) Triangle keeps thin strokes visible at 1/10th scale.
    let small = image::imageops::resize(&src, THUMB_W as u32, THUMB_H as u32, FilterType::Triangle);

    // 3) Back to minifb pixels.
    let pixels = small.pixels().map(|p| pack_rgb(p[0], p[1], p[2])).collect();
    FrameBuffer { width: THUMB_W, height: THUMB_H, pixels }
}

/// First thumbnail index to draw so the selected one fits in `visible` slots.
pub fn strip_scroll(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    (selected + 1).saturating_sub(visible)
}

/// How many thumbnails fit side by side in a window `width` pixels wide.
pub fn visible_slots(width: usize) -> usize {
    width.saturating_sub(THUMB_GAP) / (THUMB_W + THUMB_GAP)
}

/// Left x of slot `slot` inside the strip.
pub fn slot_x(slot: usize) -> usize {
    THUMB_GAP + slot * (THUMB_W + THUMB_GAP)
}

/// Map a click inside the strip (strip-local coordinates) to a frame index.
/// Clicks in the gaps, or past the last frame, hit nothing.
pub fn hit_test(x: usize, y: usize, first: usize, frame_count: usize) -> Option<usize> {
    if y < THUMB_GAP || y >= THUMB_GAP + THUMB_H || x < THUMB_GAP {
        return None;
    }
    let rel = x - THUMB_GAP;
    let slot = rel / (THUMB_W + THUMB_GAP);
    if rel % (THUMB_W + THUMB_GAP) >= THUMB_W {
        return None;
    }
    let index = first + slot;
    (index < frame_count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscale_of_flat_frame_is_flat() {
        let frame = Frame::from_buffer(&FrameBuffer::filled(600, 400, 0x00_20_40_80));
        let t = downscale(&frame);
        assert_eq!((t.width, t.height), (THUMB_W, THUMB_H));
        assert!(t.pixels.iter().all(|&p| p == 0x00_20_40_80));
    }

    #[test]
    fn downscale_keeps_left_right_halves() {
        let mut fb = FrameBuffer::filled(120, 80, 0x00_FF_FF_FF);
        for y in 0..80 {
            for x in 0..60 {
                fb.pixels[y * 120 + x] = 0;
            }
        }
        let t = downscale(&Frame::from_buffer(&fb));
        assert_eq!(t.get(5, 20), Some(0));
        assert_eq!(t.get(55, 20), Some(0x00_FF_FF_FF));
    }

    #[test]
    fn scroll_keeps_selected_visible() {
        assert_eq!(strip_scroll(0, 5), 0);
        assert_eq!(strip_scroll(4, 5), 0);
        assert_eq!(strip_scroll(7, 5), 3);
    }

    #[test]
    fn hit_test_maps_slots_and_gaps() {
        let y = THUMB_GAP + 1;
        assert_eq!(hit_test(slot_x(0), y, 0, 3), Some(0));
        assert_eq!(hit_test(slot_x(2) + THUMB_W - 1, y, 0, 3), Some(2));
        assert_eq!(hit_test(slot_x(1) - 1, y, 0, 3), None); // gap
        assert_eq!(hit_test(slot_x(3), y, 0, 3), None); // past the end
        assert_eq!(hit_test(slot_x(1), y, 4, 6), Some(5)); // scrolled
        assert_eq!(hit_test(slot_x(0), 0, 0, 3), None);
    }

    #[test]
    fn slots_fit_in_width() {
        assert_eq!(visible_slots(640), 9);
        assert_eq!(visible_slots(10), 0);
    }
}
