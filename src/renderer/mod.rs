//! GPU renderers for the globe and its hex bin layer.
//!
//! - [`frame`]: per-frame and per-layer uniform blocks
//! - [`globe`]: the textured, bump-mapped sphere
//! - [`hexbin`]: extruded hex prisms
//! - [`pipeline_util`]: shared pipeline construction

pub mod frame;
pub mod globe;
pub mod hexbin;
pub(crate) mod pipeline_util;
