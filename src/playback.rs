// Flipbook playback as a cancellable, clock-driven task.
// Visual: frames flip by one at a fixed interval, starting from frame 0, and
// stop on the last one.
//
// Nothing runs in the background: the event loop polls `due` with the current
// time every iteration and the store displays whatever frame it returns.

use std::time::{Duration, Instant};

/// Identifies one playback run. Cancelling with a stale ticket does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackTicket(u64);

#[derive(Clone, Debug)]
pub struct Playback {
    ticket: PlaybackTicket,
    interval: Duration,
    started: Instant,
    next_frame: usize, // the frame the next tick shows
}

impl Playback {
    pub fn new(ticket: u64, interval: Duration, started: Instant) -> Self {
        Self { ticket: PlaybackTicket(ticket), interval, started, next_frame: 0 }
    }

    pub fn ticket(&self) -> PlaybackTicket {
        self.ticket
    }

    /// Frame k is due one interval after frame k-1, the first one interval
    /// after start.
    pub fn due_at(&self, frame: usize) -> Instant {
        let ticks = u32::try_from(frame + 1).unwrap_or(u32::MAX);
        self.started + self.interval.saturating_mul(ticks)
    }

    /// Returns the frame to show if its tick has come, and moves on.
    /// At most one frame per call; `None` once `frame_count` frames were shown.
    pub fn due(&mut self, now: Instant, frame_count: usize) -> Option<usize> {
        if self.is_finished(frame_count) || now < self.due_at(self.next_frame) {
            return None;
        }
        let frame = self.next_frame;
        self.next_frame += 1;
        Some(frame)
    }

    pub fn is_finished(&self, frame_count: usize) -> bool {
        self.next_frame >= frame_count
    }
}
