//! Shared utilities: sRGB color helpers, easing curves, tweens, and frame
//! timing.

pub mod color;
pub mod easing;
pub mod frame_timing;
