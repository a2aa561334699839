use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Hex Bins", inline)]
#[serde(default)]
/// Hexagonal binning, coloring, and extrusion of the point layer.
pub struct HexBinOptions {
    /// H3 resolution (0 = coarsest, 15 = finest).
    #[schemars(title = "Resolution", range(min = 0, max = 15))]
    pub resolution: u8,
    /// Upload all hexes into one buffer and draw them in one call.
    #[schemars(title = "Merge Bins")]
    pub merge: bool,
    /// Fraction of each cell shrunk toward its center, leaving gaps.
    #[schemars(title = "Margin", range(min = 0.0, max = 0.9), extend("step" = 0.05))]
    pub margin: f32,
    /// Hex altitude per unit of summed weight, relative to the globe radius.
    #[schemars(skip)]
    pub altitude_per_weight: f64,
    /// Minimum hex altitude so empty-ish bins stay visible above the surface.
    #[schemars(skip)]
    pub min_altitude: f64,
    /// Lower bound of the color scale domain.
    #[schemars(skip)]
    pub color_domain_min: f64,
    /// Upper bound of the color scale domain.
    #[schemars(skip)]
    pub color_domain_max: f64,
    /// Opacity of hex tops and sides.
    #[schemars(title = "Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: f32,
}

impl Default for HexBinOptions {
    fn default() -> Self {
        Self {
            resolution: 3,
            merge: true,
            margin: 0.2,
            altitude_per_weight: 3e-8,
            min_altitude: 0.001,
            color_domain_min: 0.0,
            color_domain_max: 1e7,
            opacity: 1.0,
        }
    }
}
