//! Easing curves and a small time-driven tween.
//!
//! Used by the globe's intro animation (scale-in and spin).

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quintic ease-out (very fast start, long settle).
    QuinticOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuinticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt * omt * omt
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::Linear
    }
}

/// Interpolates a scalar from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl Tween {
    /// Create a tween at its starting value.
    #[must_use]
    pub fn new(
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// A tween that has already reached `value`.
    #[must_use]
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0, EasingFunction::Linear)
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Current eased value.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.easing.evaluate(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_input_clamping() {
        assert_eq!(EasingFunction::Linear.evaluate(-0.5), 0.0);
        assert_eq!(EasingFunction::Linear.evaluate(1.5), 1.0);
        assert_eq!(EasingFunction::QuinticOut.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75);
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_quintic_out_front_loaded() {
        let q = EasingFunction::QuinticOut;
        assert_eq!(q.evaluate(0.0), 0.0);
        assert!(q.evaluate(0.25) > EasingFunction::QuadraticOut.evaluate(0.25));
        assert_eq!(q.evaluate(1.0), 1.0);
    }

    #[test]
    fn tween_reaches_target_and_stops() {
        let mut tw = Tween::new(2.0, 0.0, 1.2, EasingFunction::QuinticOut);
        assert_eq!(tw.value(), 2.0);
        tw.advance(0.6);
        assert!(tw.value() < 2.0 && tw.value() > 0.0);
        assert!(!tw.is_finished());
        tw.advance(10.0);
        assert!(tw.is_finished());
        assert_eq!(tw.value(), 0.0);
    }

    #[test]
    fn settled_tween_is_finished() {
        let tw = Tween::settled(1.0);
        assert!(tw.is_finished());
        assert_eq!(tw.value(), 1.0);
    }
}
