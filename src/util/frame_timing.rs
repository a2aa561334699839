//! Frame step measurement for animation loops.

use web_time::{Duration, Instant};

/// Longest frame step fed into animations. Keeps the intro tween from
/// jumping to its end after the tab was backgrounded.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Frame timing with delta clamping.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Mark the start of a frame and return the clamped step in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        Self::record(elapsed)
    }

    fn record(elapsed: Duration) -> f32 {
        elapsed.min(MAX_FRAME_STEP).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_frames_are_clamped() {
        let dt = FrameTiming::record(Duration::from_secs(5));
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn short_frames_pass_through() {
        let dt = FrameTiming::record(Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn tick_never_exceeds_the_clamp() {
        let mut timing = FrameTiming::new();
        let dt = timing.tick();
        assert!((0.0..=0.1).contains(&dt));
    }
}
