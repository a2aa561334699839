use std::cell::Cell;
use std::rc::Rc;

/// Shared liveness flag for a self-rescheduling frame loop.
///
/// The loop holds a clone and checks it before drawing and before asking
/// for the next frame; teardown cancels it. Once cancelled, every clone
/// reports dead forever.
#[derive(Debug, Clone)]
pub struct LoopToken {
    live: Rc<Cell<bool>>,
}

impl LoopToken {
    /// A live token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
        }
    }

    /// Whether the loop may keep running.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Stop the loop. Idempotent.
    pub fn cancel(&self) {
        self.live.set(false);
    }

    /// Run one frame if still live. Returns whether the loop should
    /// schedule another frame: false if the token was dead on entry or was
    /// cancelled by `frame` itself.
    pub fn tick(&self, frame: impl FnOnce()) -> bool {
        if !self.is_live() {
            return false;
        }
        frame();
        self.is_live()
    }
}

impl Default for LoopToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives `token` like a frame scheduler: keeps ticking while the token
    /// asks for another frame, up to `max` frames.
    fn run(token: &LoopToken, max: usize, mut frame: impl FnMut(usize)) {
        let mut n = 0;
        while n < max && token.tick(|| frame(n)) {
            n += 1;
        }
    }

    #[test]
    fn cancelled_token_runs_nothing() {
        let token = LoopToken::new();
        token.cancel();
        let mut ran = false;
        assert!(!token.tick(|| ran = true));
        assert!(!ran);
    }

    #[test]
    fn cancel_inside_frame_stops_rescheduling() {
        let token = LoopToken::new();
        let handle = token.clone();
        let mut frames = Vec::new();
        run(&token, 100, |n| {
            frames.push(n);
            if n == 4 {
                handle.cancel();
            }
        });
        assert_eq!(frames, vec![0, 1, 2, 3, 4]);
        assert!(!token.is_live());
    }

    #[test]
    fn clones_share_state() {
        let token = LoopToken::new();
        let other = token.clone();
        assert!(other.is_live());
        token.cancel();
        token.cancel();
        assert!(!other.is_live());
    }
}
