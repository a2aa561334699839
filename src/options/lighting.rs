use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of directional lights the shaders support.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Directional Light", inline)]
#[serde(default)]
/// A directional light parented to the camera.
pub struct DirectionalLightOptions {
    /// Light color as `0xRRGGBB`.
    #[schemars(skip)]
    pub color: u32,
    /// Light intensity multiplier.
    #[schemars(title = "Intensity", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub intensity: f32,
    /// Light position in camera space. The light shines from this point
    /// toward the scene origin.
    #[schemars(skip)]
    pub position: [f32; 3],
}

impl Default for DirectionalLightOptions {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.0,
            position: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient light plus up to three camera-attached directional lights.
pub struct LightingOptions {
    /// Ambient color as `0xRRGGBB`.
    #[schemars(skip)]
    pub ambient_color: u32,
    /// Ambient intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient_intensity: f32,
    /// Directional lights; entries past the third are ignored.
    pub directional: Vec<DirectionalLightOptions>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: 0xbbbbbb,
            ambient_intensity: 0.3,
            directional: vec![
                DirectionalLightOptions {
                    color: 0xffffff,
                    intensity: 0.8,
                    position: [-800.0, 2000.0, 4000.0],
                },
                DirectionalLightOptions {
                    color: 0x7982f6,
                    intensity: 1.0,
                    position: [-200.0, 500.0, 200.0],
                },
                DirectionalLightOptions {
                    color: 0x8566cc,
                    intensity: 0.5,
                    position: [0.0, 1.0, 0.0],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Fog", inline)]
#[serde(default)]
/// Linear distance fog.
pub struct FogOptions {
    /// Whether fog is applied.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Fog color as `0xRRGGBB`.
    #[schemars(skip)]
    pub color: u32,
    /// Distance where fog starts.
    #[schemars(title = "Near", range(min = 0.0, max = 2000.0), extend("step" = 10.0))]
    pub near: f32,
    /// Distance where fog is fully opaque.
    #[schemars(title = "Far", range(min = 0.0, max = 4000.0), extend("step" = 10.0))]
    pub far: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: 0x053ef3,
            near: 400.0,
            far: 2000.0,
        }
    }
}
