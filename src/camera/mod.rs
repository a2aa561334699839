//! Camera and orbit controls.
//!
//! [`core::Camera`] is a plain perspective camera; [`orbit::OrbitController`]
//! moves it around a target from pointer and wheel input, with damping and
//! angle and distance clamps.

/// Core camera struct.
pub mod core;
/// Pointer-driven orbit controller.
pub mod orbit;

pub use self::core::Camera;
pub use orbit::OrbitController;
