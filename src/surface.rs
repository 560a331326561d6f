// The drawing surface: the one pixel buffer the user paints on.
// The frame store reads it (capture), writes it (restore) and wipes it (clear)
// but never owns it; the event loop hands it in with every operation.

use crate::types::{Frame, FrameBuffer, PAPER};

/// Read/write/clear contract between the frame store and whatever holds the
/// live pixels. Dimensions are fixed for the session.
pub trait DrawingSurface {
    fn dimensions(&self) -> (usize, usize);

    /// Snapshot every pixel into a new frame.
    fn capture_full_buffer(&self) -> Frame;

    /// Overwrite every pixel with the frame's contents.
    fn restore_full_buffer(&mut self, frame: &Frame);

    /// Back to blank paper.
    fn clear(&mut self);
}

/// In-memory canvas backed by a `FrameBuffer`.
/// Visual: the big white area of the window that strokes land on.
#[derive(Clone, Debug)]
pub struct Canvas {
    fb: FrameBuffer,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { fb: FrameBuffer::filled(width, height, PAPER) }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }
}

impl DrawingSurface for Canvas {
    fn dimensions(&self) -> (usize, usize) {
        (self.fb.width, self.fb.height)
    }

    fn capture_full_buffer(&self) -> Frame {
        Frame::from_buffer(&self.fb)
    }

    fn restore_full_buffer(&mut self, frame: &Frame) {
        if (frame.width(), frame.height()) != self.dimensions() {
            tracing::warn!(
                frame_w = frame.width(),
                frame_h = frame.height(),
                canvas_w = self.fb.width,
                canvas_h = self.fb.height,
                "ignoring restore of a frame with different dimensions"
            );
            return;
        }
        self.fb.pixels.copy_from_slice(frame.pixels());
    }

    fn clear(&mut self) {
        self.fb.pixels.fill(PAPER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_restore_is_exact() {
        let mut canvas = Canvas::new(4, 3);
        canvas.buffer_mut().pixels[5] = 0x00_11_22_33;
        let frame = canvas.capture_full_buffer();

        canvas.clear();
        assert!(canvas.buffer().pixels.iter().all(|&p| p == PAPER));

        canvas.restore_full_buffer(&frame);
        assert_eq!(canvas.buffer().pixels[5], 0x00_11_22_33);
        assert_eq!(canvas.capture_full_buffer(), frame);
    }

    #[test]
    fn restore_with_wrong_size_is_ignored() {
        let mut canvas = Canvas::new(4, 3);
        let other = Canvas::new(2, 2);
        let mut odd = other.buffer().clone();
        odd.pixels.fill(0);
        canvas.restore_full_buffer(&Frame::from_buffer(&odd));
        assert!(canvas.buffer().pixels.iter().all(|&p| p == PAPER));
    }
}
