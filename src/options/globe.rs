use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Globe", inline)]
#[serde(default)]
/// Sphere geometry, surface textures, and placement.
pub struct GlobeOptions {
    /// Sphere radius in world units.
    #[schemars(skip)]
    pub radius: f32,
    /// Longitude/latitude segment count of the sphere mesh.
    #[schemars(skip)]
    pub segments: u32,
    /// Equirectangular color texture URL or path. Empty disables it.
    #[schemars(skip)]
    pub image_url: String,
    /// Equirectangular height texture URL or path. Empty disables it.
    #[schemars(skip)]
    pub bump_image_url: String,
    /// Strength of the bump-map normal perturbation.
    #[schemars(title = "Bump Scale", range(min = 0.0, max = 50.0), extend("step" = 0.5))]
    pub bump_scale: f32,
    /// Surface color used until (or instead of) the color texture.
    #[schemars(skip)]
    pub base_color: u32,
    /// Phong shininess of the globe surface.
    #[schemars(skip)]
    pub shininess: f32,
    /// Specular color as `0xRRGGBB`.
    #[schemars(skip)]
    pub specular: u32,
    /// Rotation about Y applied to the whole globe, in radians.
    #[schemars(skip)]
    pub rotation_y: f32,
    /// Rotation about Z applied after `rotation_y`, in radians.
    #[schemars(skip)]
    pub rotation_z: f32,
    /// Play the scale-in and spin intro when the globe first appears.
    #[schemars(title = "Animate In")]
    pub animate_in: bool,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            radius: 100.0,
            segments: 75,
            image_url: "//unpkg.com/three-globe/example/img/earth-blue-marble.jpg"
                .into(),
            bump_image_url:
                "//unpkg.com/three-globe/example/img/earth-topology.png".into(),
            bump_scale: 20.0,
            base_color: 0x0a1a4a,
            shininess: 30.0,
            specular: 0x111111,
            rotation_y: -PI * (5.0 / 9.0),
            rotation_z: -PI * 6.0,
            animate_in: true,
        }
    }
}
