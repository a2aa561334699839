//! Point data and asset loading.
//!
//! - [`point`]: CSV rows to [`PointDatum`] values
//! - [`source`]: asset locations and the [`LoadState`] of the point layer
//! - [`fetch`]: blocking retrieval and the native background loader

pub mod fetch;
pub mod point;
pub mod source;

pub use point::{coerce_number, parse_points, PointDatum};
pub use source::{AssetKind, AssetLocation, LoadState};
