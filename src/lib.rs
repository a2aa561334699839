// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D globe with a hexbin population layer, built on wgpu.
//!
//! The globe is a textured, bump-mapped sphere seen through an orbiting
//! camera. Point data (latitude, longitude, weight) arrives as CSV, is
//! aggregated into H3 cells, and drawn as extruded hexagonal prisms whose
//! height and color follow each cell's summed weight.
//!
//! # Key entry points
//!
//! - [`engine::GlobeEngine`] - GPU state plus scene; the interface hosts
//!   drive (`resize`, `handle_input`, `update`, `render`, `supply_asset`,
//!   `dispose`)
//! - [`scene::GlobeScene`] - camera, controls, intro animation, and point
//!   data, with no GPU dependency
//! - [`options::Options`] - runtime configuration (TOML or JSON)
//! - [`hexbin`] - binning, color scale, and prism geometry
//!
//! # Hosts
//!
//! With the `viewer` feature, [`Viewer`] opens a winit window and fetches
//! assets on a background thread. With the `web` feature on `wasm32`,
//! `web::mount` attaches the globe to a DOM element and drives it with
//! `requestAnimationFrame`. Both hosts register their listeners in a
//! [`lifecycle::Subscriptions`] and tear everything down exactly once.

pub mod camera;
pub mod data;
pub mod engine;
pub mod error;
pub mod geo;
pub mod gpu;
pub mod hexbin;
pub mod input;
pub mod lifecycle;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::GlobeEngine;
pub use error::GlobeError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
