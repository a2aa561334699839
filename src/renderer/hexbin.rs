//! The extruded hex bin layer.

use std::ops::Range;

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::frame::{Material, ModelUniform};
use super::pipeline_util;
use crate::error::GlobeError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::uniform_bind_group;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, HEXBIN_SHADER};
use crate::hexbin::{BinRange, HexLayerMesh, HexVertex};

impl HexVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Index ranges of bins facing `eye`, with adjacent ranges coalesced.
///
/// A bin is kept when its center direction, carried through `model`, lies
/// in the hemisphere facing the eye.
#[must_use]
pub fn facing_ranges(
    ranges: &[BinRange],
    model: Mat4,
    eye: Vec3,
) -> Vec<Range<u32>> {
    let view = eye.normalize_or_zero();
    let mut out: Vec<Range<u32>> = Vec::new();
    for bin in ranges {
        let dir = model.transform_vector3(bin.direction).normalize_or_zero();
        if dir.dot(view) < 0.0 {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.end == bin.indices.start => {
                last.end = bin.indices.end;
            }
            _ => out.push(bin.indices.clone()),
        }
    }
    out
}

/// Draws all hex prisms.
///
/// Merged layers are one draw call. Unmerged layers keep per-bin ranges
/// and skip bins on the far side of the globe.
pub struct HexBinRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: TypedBuffer<HexVertex>,
    indices: TypedBuffer<u32>,
    ranges: Vec<BinRange>,
    merge: bool,
    generation: u64,
    model: Mat4,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl HexBinRenderer {
    /// Pipeline and empty buffers.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeError::Shader`] if the hex shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        merge: bool,
    ) -> Result<Self, GlobeError> {
        let device = &context.device;
        let uniform = ModelUniform::new(Mat4::IDENTITY, &Material::default());
        let model_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Hex Model"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let model_bind_group = uniform_bind_group(
            device,
            "Hex Model",
            model_layout,
            &model_buffer,
        );

        let shader = composer.compose(
            device,
            "Hex Shader",
            HEXBIN_SHADER,
            "hexbin.wgsl",
        )?;
        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            "Hex Pipeline",
            &shader,
            context.format(),
            None,
            &[frame_layout, model_layout],
            HexVertex::layout(),
        );

        Ok(Self {
            pipeline,
            vertices: TypedBuffer::with_capacity(
                device,
                "Hex Vertices",
                4096,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: TypedBuffer::with_capacity(
                device,
                "Hex Indices",
                8192,
                wgpu::BufferUsages::INDEX,
            ),
            ranges: Vec::new(),
            merge,
            generation: 0,
            model: Mat4::IDENTITY,
            model_buffer,
            model_bind_group,
        })
    }

    /// Upload `mesh` unless it is the generation already on the GPU.
    pub fn upload(
        &mut self,
        context: &RenderContext,
        mesh: &HexLayerMesh,
        generation: u64,
    ) {
        if generation == self.generation {
            return;
        }
        let device = &context.device;
        let queue = &context.queue;
        let _ = self.vertices.write(device, queue, &mesh.vertices);
        let _ = self.indices.write(device, queue, &mesh.indices);
        self.ranges.clone_from(&mesh.ranges);
        self.generation = generation;
        log::debug!("uploaded hex layer generation {generation}");
    }

    /// Upload this frame's model transform.
    pub fn update(&mut self, queue: &wgpu::Queue, model: Mat4) {
        self.model = model;
        let uniform = ModelUniform::new(model, &Material::default());
        queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Record the draws. The frame bind group must already be set at 0.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, eye: Vec3) {
        if self.indices.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        pass.set_index_buffer(
            self.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        if self.merge {
            pass.draw_indexed(0..self.indices.count() as u32, 0, 0..1);
        } else {
            for range in facing_ranges(&self.ranges, self.model, eye) {
                pass.draw_indexed(range, 0, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(indices: Range<u32>, direction: Vec3) -> BinRange {
        BinRange { indices, direction }
    }

    #[test]
    fn far_side_bins_are_skipped() {
        let ranges = [
            bin(0..9, Vec3::Z),
            bin(9..18, -Vec3::Z),
            bin(18..27, Vec3::X),
        ];
        let eye = Vec3::new(0.0, 0.0, 400.0);
        assert_eq!(
            facing_ranges(&ranges, Mat4::IDENTITY, eye),
            vec![0..9, 18..27]
        );
    }

    #[test]
    fn adjacent_visible_bins_coalesce() {
        let ranges = [
            bin(0..9, Vec3::Z),
            bin(9..18, Vec3::Y),
            bin(18..27, Vec3::Z),
        ];
        let eye = Vec3::new(0.0, 100.0, 400.0);
        assert_eq!(facing_ranges(&ranges, Mat4::IDENTITY, eye), vec![0..27]);
    }

    #[test]
    fn model_rotation_is_applied() {
        let ranges = [bin(0..9, Vec3::X)];
        let eye = Vec3::new(0.0, 0.0, 400.0);
        // +90° about Y carries +X to -Z, away from the eye.
        let turn = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(facing_ranges(&ranges, turn, eye).is_empty());
        let turn = Mat4::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        assert_eq!(facing_ranges(&ranges, turn, eye), vec![0..9]);
    }
}
