//! Per-frame and per-layer uniform blocks.
//!
//! Layouts mirror `Frame` and `Model` in `modules/frame.wgsl`; every member
//! is a `vec4` or `mat4x4` so no implicit padding is needed.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::options::{FogOptions, LightingOptions, MAX_DIRECTIONAL_LIGHTS};
use crate::util::color::linear_from_hex;

/// Camera, lights, and fog for one frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position (w unused).
    pub camera_pos: [f32; 4],
    /// Linear ambient color times intensity.
    pub ambient: [f32; 4],
    /// World-space unit vectors from the surface toward each light.
    pub light_dirs: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// Linear light colors times intensity; unused slots are black.
    pub light_colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// Linear fog color.
    pub fog_color: [f32; 4],
    /// Fog near, fog far, fog enabled (0/1), encode sRGB in shader (0/1).
    pub fog_params: [f32; 4],
}

fn vec4(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

impl FrameUniform {
    /// Build the uniform for the current camera.
    ///
    /// Directional lights are children of the camera: their configured
    /// positions are in camera space and they shine toward the world
    /// origin. Lights past [`MAX_DIRECTIONAL_LIGHTS`] are ignored.
    #[must_use]
    pub fn new(
        camera: &Camera,
        lighting: &LightingOptions,
        fog: &FogOptions,
        encode_srgb: bool,
    ) -> Self {
        let camera_world = camera.world();
        let mut light_dirs = [[0.0, 1.0, 0.0, 0.0]; MAX_DIRECTIONAL_LIGHTS];
        let mut light_colors = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        for (i, light) in lighting
            .directional
            .iter()
            .take(MAX_DIRECTIONAL_LIGHTS)
            .enumerate()
        {
            let world = camera_world
                .transform_point3(Vec3::from_array(light.position));
            let dir = world.normalize_or(Vec3::Y);
            light_dirs[i] = vec4(dir.to_array(), 0.0);
            light_colors[i] =
                vec4(linear_from_hex(light.color, light.intensity), 1.0);
        }

        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            camera_pos: vec4(camera.eye.to_array(), 1.0),
            ambient: vec4(
                linear_from_hex(
                    lighting.ambient_color,
                    lighting.ambient_intensity,
                ),
                1.0,
            ),
            light_dirs,
            light_colors,
            fog_color: vec4(linear_from_hex(fog.color, 1.0), 1.0),
            fog_params: [
                fog.near,
                fog.far.max(fog.near + f32::EPSILON),
                if fog.enabled { 1.0 } else { 0.0 },
                if encode_srgb { 1.0 } else { 0.0 },
            ],
        }
    }
}

/// Transform and material of one layer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    /// Local-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model` for normals.
    pub normal: [[f32; 4]; 4],
    /// Shininess, bump scale, color-map weight (0/1), opacity.
    pub material: [f32; 4],
    /// Linear specular color.
    pub specular: [f32; 4],
    /// Linear base color used where no texture is bound.
    pub base_color: [f32; 4],
}

/// Surface parameters carried by a [`ModelUniform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Phong exponent.
    pub shininess: f32,
    /// Bump-map strength.
    pub bump_scale: f32,
    /// 1 when the color map replaces the base color, 0 otherwise.
    pub texture_weight: f32,
    /// Layer opacity.
    pub opacity: f32,
    /// Specular color `0xRRGGBB`.
    pub specular: u32,
    /// Base color `0xRRGGBB`.
    pub base_color: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shininess: 1.0,
            bump_scale: 0.0,
            texture_weight: 0.0,
            opacity: 1.0,
            specular: 0x000000,
            base_color: 0xffffff,
        }
    }
}

impl ModelUniform {
    /// Uniform for `model` with `material`.
    #[must_use]
    pub fn new(model: Mat4, material: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            material: [
                material.shininess,
                material.bump_scale,
                material.texture_weight,
                material.opacity,
            ],
            specular: vec4(linear_from_hex(material.specular, 1.0), 1.0),
            base_color: vec4(linear_from_hex(material.base_color, 1.0), 1.0),
        }
    }
}
