//! The textured, bump-mapped globe sphere.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use super::frame::{Material, ModelUniform};
use super::pipeline_util;
use crate::error::GlobeError;
use crate::geo::{equirect_uv, polar_to_cartesian};
use crate::gpu::pipeline_helpers::{
    filtering_sampler, globe_sampler, texture_2d, uniform_bind_group,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, GLOBE_SHADER};
use crate::gpu::texture::ImageTexture;
use crate::options::GlobeOptions;

/// Sphere vertex: position, outward normal, equirectangular UV.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobeVertex {
    /// Position in globe-local space.
    pub position: [f32; 3],
    /// Unit outward normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl GlobeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Latitude/longitude sphere with `segments` divisions in each direction.
///
/// Rows run north to south, columns west to east from the antimeridian, so
/// the seam column is duplicated and UVs span the full `[0, 1]` range.
/// Triangles wind counter-clockwise seen from outside; pole rows emit one
/// triangle per quad.
#[must_use]
pub fn sphere_mesh(radius: f32, segments: u32) -> (Vec<GlobeVertex>, Vec<u32>) {
    let segments = segments.max(3);
    let stride = segments + 1;
    let radius = f64::from(radius);

    let mut vertices = Vec::with_capacity((stride * stride) as usize);
    for iy in 0..=segments {
        let lat = 90.0 - 180.0 * f64::from(iy) / f64::from(segments);
        for ix in 0..=segments {
            let lng = -180.0 + 360.0 * f64::from(ix) / f64::from(segments);
            let position = polar_to_cartesian(lat, lng, 0.0, radius);
            vertices.push(GlobeVertex {
                position: position.to_array(),
                normal: position.normalize_or_zero().to_array(),
                uv: equirect_uv(lat, lng).to_array(),
            });
        }
    }

    let mut indices = Vec::with_capacity((6 * segments * segments) as usize);
    for iy in 0..segments {
        for ix in 0..segments {
            let a = iy * stride + ix;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            if iy != segments - 1 {
                indices.extend_from_slice(&[a, b, c]);
            }
            if iy != 0 {
                indices.extend_from_slice(&[a, c, d]);
            }
        }
    }
    (vertices, indices)
}

/// Draws the globe surface.
pub struct GlobeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    color_map: ImageTexture,
    bump_map: ImageTexture,
    material: Material,
}

impl GlobeRenderer {
    /// Build the sphere, pipeline, and placeholder textures.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeError::Shader`] if the globe shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        options: &GlobeOptions,
    ) -> Result<Self, GlobeError> {
        let device = &context.device;
        let (vertices, indices) = sphere_mesh(options.radius, options.segments);
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Globe Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Globe Indices"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let material = Material {
            shininess: options.shininess,
            bump_scale: 0.0,
            texture_weight: 0.0,
            opacity: 1.0,
            specular: options.specular,
            base_color: options.base_color,
        };
        let uniform = ModelUniform::new(Mat4::IDENTITY, &material);
        let model_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Globe Model"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let model_bind_group = uniform_bind_group(
            device,
            "Globe Model",
            model_layout,
            &model_buffer,
        );

        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globe Textures Layout"),
                entries: &[texture_2d(0), texture_2d(1), filtering_sampler(2)],
            });
        let sampler = globe_sampler(device, "Globe Sampler");
        let queue = &context.queue;
        let color_map =
            ImageTexture::solid(device, queue, "Globe Color", [255; 4], true);
        let bump_map = ImageTexture::solid(
            device,
            queue,
            "Globe Bump",
            [0, 0, 0, 255],
            false,
        );
        let texture_bind_group = texture_bind_group(
            device,
            &texture_layout,
            &color_map,
            &bump_map,
            &sampler,
        );

        let shader = composer.compose(
            device,
            "Globe Shader",
            GLOBE_SHADER,
            "globe.wgsl",
        )?;
        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            "Globe Pipeline",
            &shader,
            context.format(),
            Some(wgpu::Face::Back),
            &[frame_layout, model_layout, &texture_layout],
            GlobeVertex::layout(),
        );

        log::debug!(
            "globe mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            model_buffer,
            model_bind_group,
            texture_layout,
            texture_bind_group,
            sampler,
            color_map,
            bump_map,
            material,
        })
    }

    /// Replace the color texture; the base color stops showing.
    pub fn set_color_map(
        &mut self,
        context: &RenderContext,
        image: &RgbaImage,
    ) {
        self.color_map = ImageTexture::from_rgba(
            &context.device,
            &context.queue,
            "Globe Color",
            image,
            true,
        );
        self.material.texture_weight = 1.0;
        self.rebind(context);
    }

    /// Replace the height texture and enable bump mapping.
    pub fn set_bump_map(
        &mut self,
        context: &RenderContext,
        image: &RgbaImage,
        bump_scale: f32,
    ) {
        self.bump_map = ImageTexture::from_rgba(
            &context.device,
            &context.queue,
            "Globe Bump",
            image,
            false,
        );
        self.material.bump_scale = bump_scale;
        self.rebind(context);
    }

    fn rebind(&mut self, context: &RenderContext) {
        self.texture_bind_group = texture_bind_group(
            &context.device,
            &self.texture_layout,
            &self.color_map,
            &self.bump_map,
            &self.sampler,
        );
    }

    /// Upload this frame's model transform.
    pub fn update(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniform = ModelUniform::new(model, &self.material);
        queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Record the draw. The frame bind group must already be set at 0.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        pass.set_bind_group(2, &self.texture_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    color: &ImageTexture,
    bump: &ImageTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Globe Textures"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&color.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&bump.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn sphere_counts() {
        let (vertices, indices) = sphere_mesh(100.0, 8);
        assert_eq!(vertices.len(), 81);
        assert_eq!(indices.len() / 3, 2 * 8 * 8 - 2 * 8);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn vertices_lie_on_sphere_with_outward_normals() {
        let (vertices, _) = sphere_mesh(100.0, 12);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 100.0).abs() < 1e-3);
            let n = Vec3::from_array(v.normal);
            assert!((n - p / 100.0).length() < 1e-4);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let (vertices, indices) = sphere_mesh(100.0, 16);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn uvs_span_texture() {
        let (vertices, _) = sphere_mesh(100.0, 4);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices.last().map(|v| v.uv), Some([1.0, 1.0]));
        // Prime meridian on the equator: middle of the texture, facing +Z.
        let mid = &vertices[2 * 5 + 2];
        assert_eq!(mid.uv, [0.5, 0.5]);
        let facing =
            Vec3::from_array(mid.position) - Vec3::new(0.0, 0.0, 100.0);
        assert!(facing.length() < 1e-3);
    }
}
