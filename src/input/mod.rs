//! Input handling: platform-agnostic event types and the viewport that
//! tracks surface size and pointer position.

/// Platform-agnostic input events.
pub mod event;
/// Surface size and pointer tracking.
pub mod viewport;

pub use event::{InputEvent, MouseButton};
pub use viewport::{physical_size, Viewport};
