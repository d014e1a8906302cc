//! Frame pacing: fixed-interval scheduling with catch-up skipping.

use std::time::{Duration, Instant};

use log::debug;

use crate::terminal;

/// Slice long pacing sleeps so an interrupt is noticed promptly.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Tracks where playback is relative to its fixed frame schedule.
///
/// All timing uses the monotonic clock. The frame counter only ever moves
/// forward; skipped frames advance it just like rendered ones so the
/// schedule stays anchored to the stream position.
pub struct FramePacer {
    interval: Duration,
    start: Instant,
    frame_count: u64,
    skip_enabled: bool,
}

impl FramePacer {
    pub fn new(fps: u32, skip_enabled: bool) -> Self {
        Self {
            interval: Duration::from_nanos(1_000_000_000 / fps as u64),
            start: Instant::now(),
            frame_count: 0,
            skip_enabled,
        }
    }

    /// How many source frames to drop to get back on schedule.
    ///
    /// Zero when on time, ahead of schedule, or when skipping is disabled
    /// (in which case playback lags instead of dropping content).
    pub fn frames_behind(&self) -> u64 {
        if !self.skip_enabled {
            return 0;
        }
        let behind = skip_count(self.start.elapsed(), self.interval, self.frame_count);
        if behind > 0 {
            debug!(
                "behind schedule at frame {}, skipping {} frame(s)",
                self.frame_count, behind
            );
        }
        behind
    }

    /// Account for frames the source actually dropped.
    pub fn record_skipped(&mut self, n: u64) {
        self.frame_count += n;
    }

    /// Account for one rendered frame.
    pub fn advance(&mut self) {
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sleep out the rest of this frame's interval.
    ///
    /// Never blocks when the frame already overran. Sleeps in short slices
    /// and returns early once an interrupt is flagged.
    pub fn sleep_remainder(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        let Some(mut remaining) = self.interval.checked_sub(elapsed) else {
            return;
        };
        while remaining > Duration::ZERO {
            if terminal::interrupted() {
                return;
            }
            let slice = remaining.min(SLEEP_SLICE);
            std::thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}

/// Pure schedule math: frames the counter trails the elapsed wall time by.
///
/// With `target = frame_count * interval`, this is
/// `floor((elapsed - target) / interval)` when elapsed exceeds target, which
/// simplifies to `floor(elapsed / interval) - frame_count`.
fn skip_count(elapsed: Duration, interval: Duration, frame_count: u64) -> u64 {
    let due = (elapsed.as_nanos() / interval.as_nanos()) as u64;
    due.saturating_sub(frame_count)
}
