use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::input::{InputEvent, MouseButton, Viewport};
use crate::options::ControlsOptions;

/// Smallest polar angle and movement considered a change.
const EPS: f32 = 1e-6;

/// Drag gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    None,
    Rotate,
    Dolly,
    Pan,
}

/// Orbits a [`Camera`] around a target point.
///
/// Rotation is accumulated as a pending spherical delta. With damping on,
/// each [`update`](Self::update) applies a fraction of the pending delta
/// and decays the rest, so the globe keeps turning briefly after release.
#[derive(Debug, Clone)]
pub struct OrbitController {
    options: ControlsOptions,
    target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    drag: Drag,
    last_pointer: Option<Vec2>,
}

impl OrbitController {
    /// Controller orbiting the origin.
    #[must_use]
    pub fn new(options: ControlsOptions) -> Self {
        Self {
            options,
            target: Vec3::ZERO,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: Drag::None,
            last_pointer: None,
        }
    }

    /// Orbit target.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }

    /// Whether a drag gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::None
    }

    /// Feed one input event. Disabled gestures are ignored.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        viewport: &Viewport,
        camera: &Camera,
    ) {
        match *event {
            InputEvent::PointerButton { button, pressed } => {
                if pressed {
                    self.begin_drag(button, viewport.pointer());
                } else {
                    self.end_drag();
                }
            }
            InputEvent::PointerMoved { x, y } => {
                self.drag_to(Vec2::new(x, y), viewport.height(), camera);
            }
            InputEvent::Wheel { delta } => {
                if !self.options.enable_zoom || delta == 0.0 {
                    return;
                }
                if delta > 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else {
                    self.dolly_out(self.zoom_scale());
                }
            }
            InputEvent::PointerLeft => self.end_drag(),
        }
    }

    fn begin_drag(&mut self, button: MouseButton, at: Vec2) {
        let drag = match button {
            MouseButton::Left if self.options.enable_rotate => Drag::Rotate,
            MouseButton::Middle if self.options.enable_zoom => Drag::Dolly,
            MouseButton::Right if self.options.enable_pan => Drag::Pan,
            _ => Drag::None,
        };
        self.drag = drag;
        self.last_pointer = (drag != Drag::None).then_some(at);
    }

    fn end_drag(&mut self) {
        self.drag = Drag::None;
        self.last_pointer = None;
    }

    fn drag_to(&mut self, at: Vec2, height: f32, camera: &Camera) {
        let Some(last) = self.last_pointer else {
            return;
        };
        let delta = at - last;
        self.last_pointer = Some(at);
        let height = height.max(1.0);
        match self.drag {
            Drag::Rotate => {
                let scaled = delta * self.options.rotate_speed;
                self.rotate_left(TAU * scaled.x / height);
                self.rotate_up(TAU * scaled.y / height);
            }
            Drag::Dolly => {
                if delta.y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else if delta.y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                }
            }
            Drag::Pan => {
                self.pan(delta * self.options.pan_speed, height, camera);
            }
            Drag::None => {}
        }
    }

    fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.options.zoom_speed)
    }

    fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    /// Screen-space pan: move the target along the camera's right and up
    /// axes, scaled so the point under the cursor follows it.
    fn pan(&mut self, delta: Vec2, height: f32, camera: &Camera) {
        let offset = camera.eye - self.target;
        let distance =
            offset.length() * (camera.fovy.to_radians() * 0.5).tan();
        let world = camera.world();
        let right = world.x_axis.truncate();
        let up = world.y_axis.truncate();
        self.pan_offset -= right * (2.0 * delta.x * distance / height);
        self.pan_offset += up * (2.0 * delta.y * distance / height);
    }

    /// Apply pending motion to `camera`. Returns whether it moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let opts = &self.options;
        let before = camera.eye;
        let offset = camera.eye - self.target;

        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        if opts.auto_rotate && !self.is_dragging() {
            self.delta_theta -= TAU / 60.0 / 60.0 * opts.auto_rotate_speed;
        }

        if opts.enable_damping {
            theta += self.delta_theta * opts.damping_factor;
            phi += self.delta_phi * opts.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }

        phi = phi
            .clamp(opts.min_polar_angle, opts.max_polar_angle)
            .clamp(EPS, PI - EPS);
        radius = (radius * self.scale)
            .clamp(opts.min_distance, opts.max_distance);

        if opts.enable_damping {
            self.target += self.pan_offset * opts.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.eye = self.target + offset;
        camera.look_at(self.target);

        if opts.enable_damping {
            let keep = 1.0 - opts.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.eye.distance_squared(before) > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn setup(
        options: ControlsOptions,
    ) -> (OrbitController, Camera, Viewport) {
        let camera =
            Camera::from_options(&CameraOptions::default(), 4.0 / 3.0);
        (OrbitController::new(options), camera, Viewport::new(800.0, 600.0))
    }

    fn press(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::PointerButton { button, pressed }
    }

    fn undamped() -> ControlsOptions {
        ControlsOptions {
            enable_damping: false,
            ..Default::default()
        }
    }

    fn drag_x(
        controls: &mut OrbitController,
        camera: &Camera,
        viewport: &mut Viewport,
        from: f32,
        to: f32,
    ) {
        let (a, b) = (Vec2::new(from, 300.0), Vec2::new(to, 300.0));
        drag(controls, camera, viewport, a, b);
    }

    fn drag_y(
        controls: &mut OrbitController,
        camera: &Camera,
        viewport: &mut Viewport,
        from: f32,
        to: f32,
    ) {
        let (a, b) = (Vec2::new(400.0, from), Vec2::new(400.0, to));
        drag(controls, camera, viewport, a, b);
    }

    fn drag(
        controls: &mut OrbitController,
        camera: &Camera,
        viewport: &mut Viewport,
        from: Vec2,
        to: Vec2,
    ) {
        viewport.set_pointer(from.x, from.y);
        let down = press(MouseButton::Left, true);
        controls.handle_input(&down, viewport, camera);
        viewport.set_pointer(to.x, to.y);
        controls.handle_input(
            &InputEvent::PointerMoved { x: to.x, y: to.y },
            viewport,
            camera,
        );
        controls.handle_input(
            &press(MouseButton::Left, false),
            viewport,
            camera,
        );
    }

    fn azimuth(camera: &Camera) -> f32 {
        camera.eye.x.atan2(camera.eye.z)
    }

    #[test]
    fn idle_update_keeps_camera() {
        let (mut controls, mut camera, _) = setup(ControlsOptions::default());
        assert!(!controls.update(&mut camera));
        assert!((camera.eye - Vec3::new(0.0, 0.0, 400.0)).length() < 1e-3);
    }

    #[test]
    fn drag_right_turns_camera_left() {
        let (mut controls, mut camera, mut viewport) = setup(undamped());
        drag_x(&mut controls, &camera, &mut viewport, 400.0, 500.0);
        assert!(controls.update(&mut camera));
        let expected = -TAU * 100.0 * 0.8 / 600.0;
        assert!((azimuth(&camera) - expected).abs() < 1e-4);
        assert!((camera.eye.length() - 400.0).abs() < 1e-2);
    }

    #[test]
    fn damping_keeps_turning_with_decay() {
        let (mut controls, mut camera, mut viewport) =
            setup(ControlsOptions::default());
        drag_x(&mut controls, &camera, &mut viewport, 400.0, 450.0);
        let mut steps = Vec::new();
        let mut prev = azimuth(&camera);
        for _ in 0..5 {
            assert!(controls.update(&mut camera));
            let now = azimuth(&camera);
            steps.push((now - prev).abs());
            prev = now;
        }
        assert!(steps.iter().all(|&s| s > 0.0));
        assert!(steps.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn polar_angle_is_clamped() {
        let options = undamped();
        let (mut controls, mut camera, mut viewport) = setup(options.clone());
        drag_y(&mut controls, &camera, &mut viewport, 300.0, 2000.0);
        let _ = controls.update(&mut camera);
        let phi = (camera.eye.y / camera.eye.length()).acos();
        assert!((phi - options.min_polar_angle).abs() < 1e-4);

        drag_y(&mut controls, &camera, &mut viewport, 2000.0, -4000.0);
        let _ = controls.update(&mut camera);
        let phi = (camera.eye.y / camera.eye.length()).acos();
        assert!((phi - options.max_polar_angle).abs() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let (mut controls, mut camera, _) = setup(ControlsOptions::default());
        camera.eye = Vec3::new(0.0, 0.0, 1000.0);
        let _ = controls.update(&mut camera);
        assert!((camera.eye.length() - 500.0).abs() < 1e-2);
        camera.eye = Vec3::new(0.0, 0.0, 50.0);
        let _ = controls.update(&mut camera);
        assert!((camera.eye.length() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn wheel_ignored_when_zoom_disabled() {
        let (mut controls, mut camera, viewport) =
            setup(ControlsOptions::default());
        let wheel = InputEvent::Wheel { delta: 3.0 };
        controls.handle_input(&wheel, &viewport, &camera);
        assert!(!controls.update(&mut camera));
        assert!((camera.eye.length() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_zooms_when_enabled() {
        let options = ControlsOptions {
            enable_zoom: true,
            ..Default::default()
        };
        let (mut controls, mut camera, viewport) = setup(options);
        let wheel_in = InputEvent::Wheel { delta: 1.0 };
        controls.handle_input(&wheel_in, &viewport, &camera);
        let _ = controls.update(&mut camera);
        assert!((camera.eye.length() - 380.0).abs() < 1e-2);
        let wheel_out = InputEvent::Wheel { delta: -1.0 };
        controls.handle_input(&wheel_out, &viewport, &camera);
        let _ = controls.update(&mut camera);
        assert!((camera.eye.length() - 400.0).abs() < 1e-2);
    }

    #[test]
    fn rotate_disabled_ignores_drag() {
        let options = ControlsOptions {
            enable_rotate: false,
            ..Default::default()
        };
        let (mut controls, mut camera, mut viewport) = setup(options);
        drag_x(&mut controls, &camera, &mut viewport, 400.0, 600.0);
        assert!(!controls.is_dragging());
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn pan_disabled_ignores_secondary_drag() {
        let (mut controls, mut camera, viewport) =
            setup(ControlsOptions::default());
        controls.handle_input(
            &press(MouseButton::Right, true),
            &viewport,
            &camera,
        );
        let moved = InputEvent::PointerMoved { x: 700.0, y: 100.0 };
        controls.handle_input(&moved, &viewport, &camera);
        let _ = controls.update(&mut camera);
        assert_eq!(controls.target(), Vec3::ZERO);
    }

    #[test]
    fn pan_moves_target_when_enabled() {
        let options = ControlsOptions {
            enable_pan: true,
            enable_damping: false,
            ..Default::default()
        };
        let (mut controls, mut camera, mut viewport) = setup(options);
        viewport.set_pointer(400.0, 300.0);
        controls.handle_input(
            &press(MouseButton::Right, true),
            &viewport,
            &camera,
        );
        let moved = InputEvent::PointerMoved { x: 500.0, y: 300.0 };
        controls.handle_input(&moved, &viewport, &camera);
        let _ = controls.update(&mut camera);
        assert!(controls.target().x < 0.0);
        assert!((camera.target - controls.target()).length() < 1e-4);
    }

    #[test]
    fn auto_rotate_advances_without_input() {
        let options = ControlsOptions {
            auto_rotate: true,
            enable_damping: false,
            ..Default::default()
        };
        let (mut controls, mut camera, _) = setup(options);
        assert!(controls.update(&mut camera));
        let expected = -TAU / 60.0 / 60.0 * 2.0;
        assert!((azimuth(&camera) - expected).abs() < 1e-4);
    }

    #[test]
    fn pointer_left_ends_drag() {
        let (mut controls, camera, viewport) =
            setup(ControlsOptions::default());
        controls.handle_input(
            &press(MouseButton::Left, true),
            &viewport,
            &camera,
        );
        assert!(controls.is_dragging());
        controls.handle_input(&InputEvent::PointerLeft, &viewport, &camera);
        assert!(!controls.is_dragging());
    }
}
