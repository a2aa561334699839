//! Centralized globe options with TOML and JSON support.
//!
//! All tweakable settings (camera, orbit controls, lighting, fog, globe
//! surface, hex bins, data source) are consolidated here. Options
//! serialize to/from TOML for the native viewer and JSON for the browser
//! host.

mod camera;
mod controls;
mod data;
mod globe;
mod hexbin;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use data::DataOptions;
pub use globe::GlobeOptions;
pub use hexbin::HexBinOptions;
pub use lighting::{
    DirectionalLightOptions, FogOptions, LightingOptions,
    MAX_DIRECTIONAL_LIGHTS,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GlobeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial files (e.g. only overriding `[hexbin]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and starting position.
    pub camera: CameraOptions,
    /// Orbit controller behavior.
    pub controls: ControlsOptions,
    /// Ambient and directional lights.
    pub lighting: LightingOptions,
    /// Distance fog.
    pub fog: FogOptions,
    /// Globe geometry, textures, and placement.
    pub globe: GlobeOptions,
    /// Hex bin layer.
    pub hexbin: HexBinOptions,
    /// Point data source.
    #[schemars(skip)]
    pub data: DataOptions,
}

impl Options {
    /// Generate JSON Schema describing the host-tweakable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`GlobeError::Io`] if the file cannot be read,
    /// [`GlobeError::OptionsParse`] if it does not parse or
    /// [`validate`](Self::validate) rejects it.
    pub fn load(path: &Path) -> Result<Self, GlobeError> {
        let content = std::fs::read_to_string(path).map_err(GlobeError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GlobeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlobeError::Io)?;
        }
        std::fs::write(path, content).map_err(GlobeError::Io)
    }

    /// Parse options from a JSON string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`GlobeError::OptionsParse`] if the JSON does not parse or
    /// [`validate`](Self::validate) rejects it.
    pub fn from_json(json: &str) -> Result<Self, GlobeError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| GlobeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check values the scene cannot work with: an H3 resolution outside
    /// `0..=15`, a degenerate projection, and inverted or non-finite orbit
    /// clamps.
    ///
    /// # Errors
    ///
    /// [`GlobeError::OptionsParse`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), GlobeError> {
        let _ = crate::hexbin::resolution(self.hexbin.resolution)?;
        let camera = &self.camera;
        if camera.fovy.is_nan() || camera.fovy <= 0.0 || camera.fovy >= 180.0 {
            return Err(GlobeError::OptionsParse(format!(
                "camera.fovy {} is outside (0, 180)",
                camera.fovy
            )));
        }
        if camera.znear.is_nan()
            || camera.znear <= 0.0
            || !camera.zfar.is_finite()
            || camera.zfar <= camera.znear
        {
            return Err(GlobeError::OptionsParse(format!(
                "camera clip range {}..{} is invalid",
                camera.znear, camera.zfar
            )));
        }
        self.controls
            .validate()
            .map_err(|e| GlobeError::OptionsParse(format!("controls.{e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[hexbin]
resolution = 4

[fog]
color = 0xff0000
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.hexbin.resolution, 4);
        assert_eq!(opts.fog.color, 0xff0000);
        // Everything else should be default
        assert!(opts.hexbin.merge);
        assert_eq!(opts.fog.near, 400.0);
        assert_eq!(opts.camera.position, [0.0, 0.0, 400.0]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts =
            Options::from_json(r#"{ "controls": { "enable_zoom": true } }"#)
                .unwrap();
        assert!(opts.controls.enable_zoom);
        assert!(!opts.controls.enable_pan);
        assert_eq!(opts.controls.rotate_speed, 0.8);
    }

    #[test]
    fn bad_json_is_an_options_error() {
        let err = Options::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GlobeError::OptionsParse(_)));
    }

    #[test]
    fn inverted_polar_range_is_an_options_error() {
        let err = Options::from_json(
            r#"{"controls":{"min_polar_angle":2.0,"max_polar_angle":1.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GlobeError::OptionsParse(ref m)
            if m.contains("min_polar_angle")));
    }

    #[test]
    fn inverted_distance_in_toml_is_rejected() {
        let dir = std::env::temp_dir().join("hexglobe-options-validate");
        let path = dir.join("options.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &path,
            "[controls]\nmin_distance = 500.0\nmax_distance = 200.0\n",
        )
        .unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(GlobeError::OptionsParse(_))
        ));
    }

    #[test]
    fn nan_clamp_and_bad_projection_are_rejected() {
        let mut opts = Options::default();
        opts.controls.max_polar_angle = f32::NAN;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera.znear = 0.0;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.hexbin.resolution = 16;
        assert!(opts.validate().is_err());

        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn defaults_match_scene_setup() {
        let opts = Options::default();
        assert_eq!(opts.controls.min_distance, 200.0);
        assert_eq!(opts.controls.max_distance, 500.0);
        assert!((opts.controls.min_polar_angle - PI / 3.5).abs() < 1e-6);
        assert!((opts.controls.max_polar_angle - 2.0 * PI / 3.0).abs() < 1e-6);
        assert_eq!(opts.lighting.directional.len(), MAX_DIRECTIONAL_LIGHTS);
        assert_eq!(opts.lighting.ambient_color, 0xbbbbbb);
        assert_eq!(opts.hexbin.color_domain_max, 1e7);
        assert_eq!(opts.data.weight_column, "pop");
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("controls"));
        assert!(props.contains_key("hexbin"));
        assert!(props.contains_key("fog"));
        assert!(!props.contains_key("data"));

        let hexbin = &props["hexbin"]["properties"];
        assert!(hexbin.get("resolution").is_some());
        assert!(hexbin.get("altitude_per_weight").is_none());
    }
}
