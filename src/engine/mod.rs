//! The mounted globe: GPU resources, the scene they draw, and asset
//! delivery.

mod assets;

pub use assets::{asset_requests, prepare_texture};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::data::LoadState;
use crate::error::GlobeError;
use crate::gpu::pipeline_helpers::{uniform_bind_group, uniform_buffer};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTarget;
use crate::input::InputEvent;
use crate::lifecycle::DisposeOnce;
use crate::options::Options;
use crate::renderer::globe::GlobeRenderer;
use crate::renderer::hexbin::HexBinRenderer;
use crate::scene::GlobeScene;

/// Every GPU resource a mounted globe holds. Dropped as one unit.
struct GpuState {
    context: RenderContext,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    globe: GlobeRenderer,
    hexes: HexBinRenderer,
}

/// The globe component: one scene plus the GPU state that draws it.
///
/// # Construction
///
/// ```ignore
/// let mut engine = GlobeEngine::new(window, (w, h), scale, options).await?;
/// for (kind, location) in asset_requests(engine.options()) {
///     // fetch, then:
///     engine.supply_asset(kind, bytes);
/// }
/// ```
///
/// # Frame loop
///
/// Hosts call [`update`](Self::update) with the frame step and then
/// [`render`](Self::render). Pointer and wheel input goes through
/// [`handle_input`](Self::handle_input) in logical pixels; surface sizes
/// passed to [`resize`](Self::resize) are physical pixels.
///
/// # Teardown
///
/// [`dispose`](Self::dispose) drops the GPU state exactly once. After it,
/// rendering and asset delivery are no-ops.
pub struct GlobeEngine {
    gpu: DisposeOnce<GpuState>,
    scene: GlobeScene,
    scale_factor: f64,
}

impl GlobeEngine {
    /// Acquire a surface on `target` and build the globe.
    ///
    /// `size` is in physical pixels; `scale_factor` converts it to the
    /// logical pixels pointer input arrives in.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeError::Gpu`] if no surface, adapter, or device can be
    /// acquired, [`GlobeError::Shader`] if a shader fails to compose, and
    /// [`GlobeError::OptionsParse`] for an invalid hex bin resolution.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, GlobeError> {
        let context = RenderContext::new(target, size).await?;
        Self::from_context(context, scale_factor, options)
    }

    /// Build the globe on an already-configured [`RenderContext`].
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_context(
        context: RenderContext,
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, GlobeError> {
        let scale_factor = sanitize_scale(scale_factor);
        let (width, height) = context.size();
        let scene = GlobeScene::new(
            options,
            logical_size((width, height), scale_factor),
        )?;

        let mut composer = ShaderComposer::new()?;
        let device = &context.device;
        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Layout"),
                entries: &[uniform_buffer(0)],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Layout"),
                entries: &[uniform_buffer(0)],
            });
        let frame_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform"),
                contents: bytemuck::bytes_of(
                    &scene.frame_uniform(!context.surface_is_srgb()),
                ),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let frame_bind_group =
            uniform_bind_group(device, "Frame", &frame_layout, &frame_buffer);

        let globe = GlobeRenderer::new(
            &context,
            &mut composer,
            &frame_layout,
            &model_layout,
            &scene.options().globe,
        )?;
        let hexes = HexBinRenderer::new(
            &context,
            &mut composer,
            &frame_layout,
            &model_layout,
            scene.options().hexbin.merge,
        )?;
        let depth = DepthTarget::new(device, width, height);

        log::info!("globe mounted at {width}x{height} (scale {scale_factor})");

        Ok(Self {
            gpu: DisposeOnce::new(GpuState {
                context,
                frame_buffer,
                frame_bind_group,
                depth,
                globe,
                hexes,
            }),
            scene,
            scale_factor,
        })
    }

    /// The CPU-side scene.
    #[must_use]
    pub const fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    /// Options the globe was built with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        self.scene.options()
    }

    /// Outcome of the point data load.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        self.scene.load_state()
    }

    /// Physical surface size, or `None` once disposed.
    #[must_use]
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.gpu.get().map(|gpu| gpu.context.size())
    }

    /// Resize the surface, depth target, and camera to `width` x `height`
    /// physical pixels. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (lw, lh) = logical_size((width, height), self.scale_factor);
        self.scene.resize(lw, lh);
        if let Some(gpu) = self.gpu.get_mut() {
            gpu.context.resize(width, height);
            let size = gpu.context.size();
            if gpu.depth.size() != size {
                gpu.depth =
                    DepthTarget::new(&gpu.context.device, size.0, size.1);
            }
        }
    }

    /// Change the physical-to-logical pixel ratio.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize_scale(scale_factor);
        if let Some((width, height)) = self.surface_size() {
            let (lw, lh) = logical_size((width, height), self.scale_factor);
            self.scene.resize(lw, lh);
        }
    }

    /// Feed one input event (logical pixel coordinates) to the scene.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.scene.handle_input(event);
    }

    /// Advance animations and controls by `dt` seconds. Returns whether
    /// anything visible changed.
    pub fn update(&mut self, dt: f32) -> bool {
        self.scene.update(dt)
    }

    /// Upload this frame's uniforms, draw the globe and its hex layer, and
    /// present. Does nothing once disposed.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired. `Lost` and `Outdated` are handled by reconfiguring the
    /// surface before returning the error, so the next frame succeeds.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(gpu) = self.gpu.get_mut() else {
            return Ok(());
        };
        let frame = match gpu.context.get_next_frame() {
            Ok(frame) => frame,
            Err(
                e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated),
            ) => {
                log::debug!("surface {e:?}, reconfiguring");
                gpu.context.reconfigure();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let model = self.scene.model_matrix();
        let uniform = self.scene.frame_uniform(!gpu.context.surface_is_srgb());
        gpu.context
            .queue
            .write_buffer(&gpu.frame_buffer, 0, bytemuck::bytes_of(&uniform));
        gpu.globe.update(&gpu.context.queue, model);
        gpu.hexes.update(&gpu.context.queue, model);
        gpu.hexes.upload(
            &gpu.context,
            self.scene.hex_mesh(),
            self.scene.hex_generation(),
        );

        let mut encoder = gpu.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Globe Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    wgpu::Color::TRANSPARENT,
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &gpu.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, &gpu.frame_bind_group, &[]);
            gpu.globe.draw(&mut pass);
            gpu.hexes.draw(&mut pass, self.scene.camera().eye);
        }
        gpu.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Globe model transform for the current frame.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.scene.model_matrix()
    }

    /// Release all GPU resources. Returns `true` only on the call that
    /// released them.
    pub fn dispose(&mut self) -> bool {
        let released = self.gpu.dispose();
        if released {
            log::info!("globe disposed");
        }
        released
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.gpu.is_disposed()
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

/// Physical pixels to logical pixels.
fn logical_size((width, height): (u32, u32), scale_factor: f64) -> (f32, f32) {
    let scale = sanitize_scale(scale_factor);
    (
        (f64::from(width) / scale) as f32,
        (f64::from(height) / scale) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_divides_by_scale() {
        assert_eq!(logical_size((2560, 1440), 2.0), (1280.0, 720.0));
        assert_eq!(logical_size((800, 600), 1.0), (800.0, 600.0));
    }

    #[test]
    fn bad_scale_factors_fall_back_to_one() {
        assert_eq!(sanitize_scale(0.0), 1.0);
        assert_eq!(sanitize_scale(f64::NAN), 1.0);
        assert_eq!(sanitize_scale(-2.0), 1.0);
        assert_eq!(sanitize_scale(1.5), 1.5);
    }
}
