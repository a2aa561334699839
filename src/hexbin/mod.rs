//! Hexagonal binning of weighted points.
//!
//! Points are grouped by the H3 cell that contains them ([`bin`]), each
//! cell's summed weight picks a color ([`color`]) and an extrusion height,
//! and [`mesh`] turns the cells into prism geometry for the renderer.

pub mod bin;
pub mod color;
pub mod mesh;

pub use bin::{bin_points, resolution, HexBin, HexBins};
pub use color::WeightColorScale;
pub use mesh::{build_hex_mesh, BinRange, HexLayerMesh, HexStyle, HexVertex};
