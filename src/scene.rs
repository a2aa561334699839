//! CPU-side globe state: camera, controls, intro animation, and the point
//! data behind the hex layer.
//!
//! [`GlobeScene`] owns no GPU resources, so everything a frame depends on
//! can be driven and inspected without a device.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};
use h3o::Resolution;

use crate::camera::{Camera, OrbitController};
use crate::data::{parse_points, AssetLocation, LoadState, PointDatum};
use crate::error::GlobeError;
use crate::hexbin::{self, build_hex_mesh, HexBins, HexLayerMesh, HexStyle};
use crate::input::{InputEvent, Viewport};
use crate::options::Options;
use crate::renderer::frame::FrameUniform;
use crate::util::easing::{EasingFunction, Tween};

/// Starting scale of the intro animation.
const INTRO_SCALE_FROM: f32 = 1e-6;
/// Intro scale-in duration in seconds.
const INTRO_SCALE_SECS: f32 = 0.6;
/// Intro spin duration in seconds.
const INTRO_SPIN_SECS: f32 = 1.2;

/// Everything about the globe that is not a GPU resource.
#[derive(Debug, Clone)]
pub struct GlobeScene {
    options: Options,
    camera: Camera,
    controls: OrbitController,
    viewport: Viewport,
    intro_scale: Tween,
    intro_spin: Tween,
    resolution: Resolution,
    style: HexStyle,
    load_state: LoadState,
    points: Vec<PointDatum>,
    bins: HexBins,
    hex_mesh: HexLayerMesh,
    hex_generation: u64,
}

impl GlobeScene {
    /// Scene for a drawing surface of `size` logical pixels.
    ///
    /// With no point data source configured the load is failed up front,
    /// since nothing will ever be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeError::OptionsParse`] if
    /// [`Options::validate`] rejects `options`.
    pub fn new(options: Options, size: (f32, f32)) -> Result<Self, GlobeError> {
        options.validate()?;
        let resolution = hexbin::resolution(options.hexbin.resolution)?;
        let viewport = Viewport::new(size.0, size.1);
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        let controls = OrbitController::new(options.controls.clone());
        let style =
            HexStyle::from_options(&options.hexbin, options.globe.radius);
        let (intro_scale, intro_spin) = if options.globe.animate_in {
            (
                Tween::new(
                    INTRO_SCALE_FROM,
                    1.0,
                    INTRO_SCALE_SECS,
                    EasingFunction::QuadraticOut,
                ),
                Tween::new(
                    TAU,
                    0.0,
                    INTRO_SPIN_SECS,
                    EasingFunction::QuinticOut,
                ),
            )
        } else {
            (Tween::settled(1.0), Tween::settled(0.0))
        };

        let mut scene = Self {
            options,
            camera,
            controls,
            viewport,
            intro_scale,
            intro_spin,
            resolution,
            style,
            load_state: LoadState::Pending,
            points: Vec::new(),
            bins: HexBins::default(),
            hex_mesh: HexLayerMesh::default(),
            hex_generation: 0,
        };
        if AssetLocation::resolve(&scene.options.data.url).is_none() {
            scene.fail_points(&GlobeError::Data("no data source".into()));
        }
        Ok(scene)
    }

    /// Options the scene was built with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Surface size and pointer.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Outcome of the point data load.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Parsed points (empty until loaded).
    #[must_use]
    pub fn points(&self) -> &[PointDatum] {
        &self.points
    }

    /// Hex bins built from the points.
    #[must_use]
    pub const fn bins(&self) -> &HexBins {
        &self.bins
    }

    /// Prism geometry for the hex layer.
    #[must_use]
    pub const fn hex_mesh(&self) -> &HexLayerMesh {
        &self.hex_mesh
    }

    /// Bumped every time the hex mesh is replaced.
    #[must_use]
    pub const fn hex_generation(&self) -> u64 {
        self.hex_generation
    }

    /// The drawing surface changed size (logical pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.camera
            .set_viewport(self.viewport.width(), self.viewport.height());
    }

    /// Feed one input event to the pointer tracker and the controller.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::PointerMoved { x, y } = *event {
            self.viewport.set_pointer(x, y);
        }
        self.controls
            .handle_input(event, &self.viewport, &self.camera);
    }

    /// Advance by `dt` seconds: intro animation, camera aim, controller.
    /// Returns whether anything visible changed.
    pub fn update(&mut self, dt: f32) -> bool {
        let animating = !self.intro_is_finished();
        self.intro_scale.advance(dt);
        self.intro_spin.advance(dt);
        self.camera.look_at(self.controls.target());
        let moved = self.controls.update(&mut self.camera);
        animating || moved
    }

    /// Whether the intro animation has completed.
    #[must_use]
    pub fn intro_is_finished(&self) -> bool {
        self.intro_scale.is_finished() && self.intro_spin.is_finished()
    }

    /// Globe local-to-world transform: the fixed placement rotation applied
    /// over the intro scale and spin.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        let globe = &self.options.globe;
        let placement = Quat::from_rotation_y(globe.rotation_y)
            * Quat::from_rotation_z(globe.rotation_z);
        let intro = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.intro_scale.value()),
            Quat::from_rotation_y(self.intro_spin.value()),
            Vec3::ZERO,
        );
        Mat4::from_quat(placement) * intro
    }

    /// Per-frame uniform for the current camera and lights.
    #[must_use]
    pub fn frame_uniform(&self, encode_srgb: bool) -> FrameUniform {
        FrameUniform::new(
            &self.camera,
            &self.options.lighting,
            &self.options.fog,
            encode_srgb,
        )
    }

    /// Parse CSV bytes and rebuild the hex layer, or record the failure.
    pub fn load_points_csv(&mut self, bytes: &[u8]) {
        match parse_points(bytes, &self.options.data) {
            Ok(points) => self.set_points(points),
            Err(e) => self.fail_points(&e),
        }
    }

    /// Replace the point data and rebuild bins and geometry.
    pub fn set_points(&mut self, points: Vec<PointDatum>) {
        self.bins = hexbin::bin_points(&points, self.resolution);
        self.hex_mesh = build_hex_mesh(&self.bins, &self.style);
        self.hex_generation += 1;
        self.load_state = LoadState::Loaded {
            points: points.len(),
            bins: self.bins.bins.len(),
            skipped: self.bins.skipped,
        };
        log::info!("point data {}", self.load_state);
        self.points = points;
    }

    /// Record that the point data could not be loaded. The hex layer is
    /// left as it was (empty unless points were supplied earlier).
    pub fn fail_points(&mut self, error: &GlobeError) {
        log::warn!("point data unavailable: {error}");
        self.load_state = LoadState::Failed(error.to_string());
    }
}
