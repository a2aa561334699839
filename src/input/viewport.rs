use glam::Vec2;

/// Size of the drawing surface and the last known pointer position.
///
/// Sizes are logical (CSS) pixels. The pointer offset is measured from the
/// surface center, positive to the right and down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    pointer: Vec2,
}

impl Viewport {
    /// Viewport of the given size with the pointer at the center.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        let mut viewport = Self {
            width: 1.0,
            height: 1.0,
            pointer: Vec2::ZERO,
        };
        viewport.resize(width, height);
        viewport.pointer = viewport.half_size();
        viewport
    }

    /// Record a new surface size. Non-positive sizes clamp to one pixel.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        self.height = if height.is_finite() { height.max(1.0) } else { 1.0 };
    }

    /// Record the pointer position.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Surface width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Surface height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Half the surface size.
    #[must_use]
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Last pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer position relative to the surface center.
    #[must_use]
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer - self.half_size()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Backing-store size for a surface of `css_width` x `css_height` logical
/// pixels at `pixel_ratio`, rounded and at least 1x1.
#[must_use]
pub fn physical_size(
    css_width: f64,
    css_height: f64,
    pixel_ratio: f64,
) -> (u32, u32) {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    let edge = |css: f64| {
        if css.is_finite() {
            (css * ratio).round().clamp(1.0, f64::from(u32::MAX)) as u32
        } else {
            1
        }
    };
    (edge(css_width), edge(css_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_offset_from_center() {
        let mut viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.pointer_offset(), Vec2::ZERO);
        viewport.set_pointer(500.0, 100.0);
        assert_eq!(viewport.pointer_offset(), Vec2::new(100.0, -200.0));
    }

    #[test]
    fn resize_updates_half_size_and_aspect() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.resize(1200.0, 400.0);
        assert_eq!(viewport.half_size(), Vec2::new(600.0, 200.0));
        assert!((viewport.aspect() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_sizes_clamp() {
        let viewport = Viewport::new(0.0, f32::NAN);
        assert_eq!(viewport.width(), 1.0);
        assert_eq!(viewport.height(), 1.0);
    }

    #[test]
    fn physical_size_scales_by_pixel_ratio() {
        assert_eq!(physical_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(physical_size(333.3, 100.0, 1.5), (500, 150));
    }

    #[test]
    fn physical_size_is_never_empty() {
        assert_eq!(physical_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(physical_size(640.0, f64::NAN, 0.0), (640, 1));
    }
}
