//! Shared types used by every meshspin crate.

mod types;

pub use types::{Color, MeshKind, SurfaceSize, Transform};
