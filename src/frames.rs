// The frame store: every captured animation cell, in order, plus the cursor.
// Visual expectations:
// - The canvas always shows the frame at the cursor.
// - The strip under the canvas always lists every frame, cursor one framed.
// - Whatever you drew is flushed into the current frame before you leave it.
//
// The store never owns the canvas: each operation borrows the surface it
// should read from and write to.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::playback::{Playback, PlaybackTicket};
use crate::surface::DrawingSurface;
use crate::thumbnail::{Thumbnail, downscale};
use crate::types::{Frame, FrameBuffer};

#[derive(Debug, Default)]
pub struct FrameStore {
    sequence: Vec<Frame>,
    cursor: usize,
    strip: Vec<Thumbnail>,
    strip_sources: Vec<Frame>, // the frame each strip raster was downscaled from
    playback: Option<Playback>,
    tickets_issued: u64,
}

impl FrameStore {
    /// Wipe the canvas and start the sequence with that one blank frame.
    /// Visual: an empty page, and a single blank thumbnail in the strip.
    pub fn initialize(surface: &mut impl DrawingSurface) -> Self {
        surface.clear();
        let mut store = Self { sequence: vec![surface.capture_full_buffer()], ..Self::default() };
        store.refresh_thumbnails();
        tracing::debug!("frame store initialized");
        store
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames(&self) -> &[Frame] {
        &self.sequence
    }

    /// The strip as of the last mutation.
    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.strip
    }

    /// Flush the live canvas into the current slot (if there is one).
    /// An unchanged canvas keeps the stored frame, so its thumbnail stays cached.
    pub fn commit_current(&mut self, surface: &impl DrawingSurface) {
        if let Some(slot) = self.sequence.get_mut(self.cursor) {
            let live = surface.capture_full_buffer();
            if *slot != live {
                *slot = live;
            }
        }
    }

    /// Save what is on the canvas, then start a blank frame at the end.
    /// Visual: canvas goes blank; a new blank thumbnail appears, framed.
    pub fn create_new(&mut self, surface: &mut impl DrawingSurface) {
        self.interrupt_playback();
        self.commit_current(surface);
        surface.clear();
        self.sequence.push(surface.capture_full_buffer());
        self.cursor = self.sequence.len() - 1;
        self.log_mutation("create_new");
        self.refresh_thumbnails();
    }

    /// Append a copy of what the canvas shows right now and make it current.
    /// Reads the live canvas directly; the source slot is not re-committed.
    /// Visual: canvas unchanged; a matching thumbnail appears at the end.
    pub fn duplicate_current(&mut self, surface: &mut impl DrawingSurface) {
        self.interrupt_playback();
        self.sequence.push(surface.capture_full_buffer());
        self.cursor = self.sequence.len() - 1;
        self.log_mutation("duplicate_current");
        self.refresh_thumbnails();
    }

    /// Jump to a frame picked in the strip. Out-of-range picks are ignored.
    pub fn select_frame(&mut self, index: usize, surface: &mut impl DrawingSurface) {
        if index >= self.sequence.len() {
            return;
        }
        self.switch_to(index, surface);
    }

    /// Save the current frame, then show frame `index`.
    pub fn switch_to(&mut self, index: usize, surface: &mut impl DrawingSurface) {
        if index >= self.sequence.len() {
            return;
        }
        self.interrupt_playback();
        self.commit_current(surface);
        self.show(index, surface);
        self.log_mutation("switch_to");
        self.refresh_thumbnails();
    }

    /// Next frame; nothing at all happens on the last one.
    pub fn advance(&mut self, surface: &mut impl DrawingSurface) {
        if self.cursor + 1 < self.sequence.len() {
            self.switch_to(self.cursor + 1, surface);
        }
    }

    /// Previous frame; nothing at all happens on the first one.
    pub fn retreat(&mut self, surface: &mut impl DrawingSurface) {
        if self.cursor > 0 {
            self.switch_to(self.cursor - 1, surface);
        }
    }

    /// Drop the current frame and show the one before it (or the new first).
    /// The last remaining frame is never removed.
    pub fn delete_current(&mut self, surface: &mut impl DrawingSurface) {
        if self.sequence.len() > 1 {
            self.interrupt_playback();
            self.sequence.remove(self.cursor);
            // The removed frame's pixels are gone, so no commit here.
            self.show(self.cursor.saturating_sub(1), surface);
            self.log_mutation("delete_current");
        }
        self.refresh_thumbnails();
    }

    /// Start flipping through every frame from 0, one per `interval`.
    /// Supersedes any playback already running.
    pub fn play(
        &mut self,
        interval: Duration,
        now: Instant,
        surface: &impl DrawingSurface,
    ) -> PlaybackTicket {
        self.stop_playback();
        self.commit_current(surface);
        self.tickets_issued += 1;
        let playback = Playback::new(self.tickets_issued, interval, now);
        let ticket = playback.ticket();
        tracing::info!(frames = self.sequence.len(), interval_ms = interval.as_millis() as u64, "playback started");
        self.playback = Some(playback);
        ticket
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Stop whatever playback is running. The canvas keeps its last frame.
    pub fn stop_playback(&mut self) {
        if let Some(p) = self.playback.take() {
            tracing::info!(ticket = ?p.ticket(), "playback stopped");
        }
    }

    /// Stop the playback `ticket` started, unless a newer one replaced it.
    pub fn cancel(&mut self, ticket: PlaybackTicket) -> bool {
        match &self.playback {
            Some(p) if p.ticket() == ticket => {
                self.stop_playback();
                true
            }
            _ => false,
        }
    }

    /// Drive playback from the event loop. Returns the frame shown, if any.
    /// Visual: when this returns Some(i), the canvas now shows frame i.
    pub fn tick(&mut self, now: Instant, surface: &mut impl DrawingSurface) -> Option<usize> {
        let len = self.sequence.len();
        let playback = self.playback.as_mut()?;
        let shown = playback.due(now, len);
        let finished = playback.is_finished(len);

        if let Some(index) = shown {
            tracing::trace!(index, "playback tick");
            self.show(index, surface);
            self.mark_selected();
        }
        if finished {
            self.playback = None;
            tracing::info!("playback finished");
        }
        shown
    }

    /// 60x40 picture of frame `index`, or of the live canvas if that slot
    /// does not exist.
    pub fn thumbnail_for(&self, index: usize, surface: &impl DrawingSurface) -> FrameBuffer {
        match self.sequence.get(index) {
            Some(frame) => downscale(frame),
            None => downscale(&surface.capture_full_buffer()),
        }
    }

    /// Rebuild the strip, marking the cursor's thumbnail.
    /// Only frames captured since the last refresh are downscaled again; the
    /// rest reuse their raster.
    pub fn refresh_thumbnails(&mut self) {
        let old_sources = std::mem::take(&mut self.strip_sources);
        let old_strip = std::mem::take(&mut self.strip);
        let mut rebuilt = 0usize;

        self.strip = self
            .sequence
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let cached = old_sources
                    .iter()
                    .position(|src| src.shares_pixels_with(frame))
                    .and_then(|j| old_strip.get(j))
                    .map(|thumb| Rc::clone(&thumb.raster));
                let raster = cached.unwrap_or_else(|| {
                    rebuilt += 1;
                    Rc::new(downscale(frame))
                });
                Thumbnail { index, raster, selected: index == self.cursor }
            })
            .collect();
        self.strip_sources = self.sequence.clone();
        tracing::trace!(rebuilt, total = self.strip.len(), "strip refreshed");
    }

    /// Move the highlight to the cursor without touching any raster.
    fn mark_selected(&mut self) {
        for thumb in &mut self.strip {
            thumb.selected = thumb.index == self.cursor;
        }
    }

    /// Clear the canvas, paint frame `index` on it and make it current.
    fn show(&mut self, index: usize, surface: &mut impl DrawingSurface) {
        surface.clear();
        if let Some(frame) = self.sequence.get(index) {
            surface.restore_full_buffer(frame);
        }
        self.cursor = index;
    }

    // User actions always win over a running playback.
    fn interrupt_playback(&mut self) {
        if self.playback.is_some() {
            tracing::debug!("user action interrupts playback");
            self.stop_playback();
        }
    }

    fn log_mutation(&self, op: &'static str) {
        tracing::debug!(op, cursor = self.cursor, len = self.sequence.len(), "frames changed");
    }
}
