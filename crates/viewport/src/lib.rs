//! Viewport component: ties scene, controls, camera and render backend to a
//! host surface for the duration of a mount.
//!
//! # Invariants
//! - One scene, one camera and one backend per mount.
//! - A control change applied between ticks is visible to the very next tick.
//! - After unmount no tick runs and the drawable is detached from the host.
//! - Everything runs on one thread; nothing here is `Send`.

mod animation;
mod host;
mod viewport;

pub use animation::{AnimationLoop, LoopHandle};
pub use host::{HeadlessHost, Host};
pub use viewport::{Viewport, ViewportError};

pub fn crate_info() -> &'static str {
    "meshspin-viewport v0.1.0"
}
