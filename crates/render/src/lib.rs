//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Hidden meshes are skipped from drawing, never removed from the scene.
//!
//! The GPU backend lives in `meshspin-render-wgpu`; [`DebugTextRenderer`]
//! is a headless implementation of the same trait used by the CLI and tests.

mod camera;
pub mod geometry;
mod renderer;

pub use camera::PerspectiveCamera;
pub use geometry::{GeometryVertex, MeshGeometry};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "meshspin-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
