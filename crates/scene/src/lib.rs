//! Scene graph holder: the meshes, material and light a viewport renders.
//!
//! # Invariants
//! - A scene always holds exactly one mesh per `MeshKind`, in `MeshKind::ALL` order.
//! - Hidden meshes stay in the scene and keep rotating; only drawing skips them.
//! - All state mutations flow through explicit operations.

pub mod scene;

pub use scene::{DirectionalLight, Material, Mesh, Scene, SceneError};
