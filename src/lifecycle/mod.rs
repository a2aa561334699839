//! Ownership of everything a mounted globe must give back on teardown.
//!
//! - [`Subscriptions`]: event listener registrations, released in reverse
//!   order exactly once
//! - [`LoopToken`]: liveness flag checked by the frame loop before every
//!   frame and before rescheduling itself
//! - [`DisposeOnce`]: a resource dropped on the first dispose call only

mod dispose;
mod loop_token;
mod subscriptions;

pub use dispose::DisposeOnce;
pub use loop_token::LoopToken;
pub use subscriptions::Subscriptions;
