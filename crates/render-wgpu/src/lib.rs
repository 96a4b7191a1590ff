//! wgpu render backend for meshspin.
//!
//! Draws the visible scene meshes with a single directional light, a depth
//! buffer and optional multisampling. [`SurfaceBackend`] owns the surface,
//! device and queue and implements [`meshspin_render::Renderer`].
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Frames are handed back un-presented so an overlay can be drawn on top.

mod gpu;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use surface::{BackendError, PendingFrame, SurfaceBackend};
