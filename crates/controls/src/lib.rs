//! Control state: the values UI controls edit and the animation loop reads.
//!
//! # Invariants
//! - Each mesh speed has exactly one representation, read by both UI and loop.
//! - A stored speed is always a finite number within `[Speed::MIN, Speed::MAX]`.
//! - Rejected input leaves the previous value untouched.

pub mod action;
pub mod speed;
pub mod state;

pub use action::Action;
pub use speed::{Speed, SpeedError};
pub use state::ControlState;
