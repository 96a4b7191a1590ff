//! CPU-side triangle meshes for the three primitives.
//!
//! Triangles wind counter-clockwise when viewed from outside. Indices are
//! `u16`; every primitive here stays well below that limit.

use meshspin_common::MeshKind;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub vertices: Vec<GeometryVertex>,
    pub indices: Vec<u16>,
}

impl MeshGeometry {
    /// Default geometry for a mesh kind.
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Cube => Self::cube(1.0),
            MeshKind::Torus => Self::torus(1.0, 0.4, 12, 48),
            MeshKind::Cone => Self::cone(1.0, 1.0, 32),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: [f32; 3], normal: [f32; 3]) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(GeometryVertex { position, normal });
        index
    }

    /// Axis-aligned cube with edge length `size`, four vertices per face.
    pub fn cube(size: f32) -> Self {
        let p = size / 2.0;
        // (normal, u axis, v axis); u x v == normal keeps faces CCW.
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];

        let mut mesh = Self::default();
        for (n, u, v) in faces {
            let corner = |su: f32, sv: f32| {
                [
                    (n[0] + su * u[0] + sv * v[0]) * p,
                    (n[1] + su * u[1] + sv * v[1]) * p,
                    (n[2] + su * u[2] + sv * v[2]) * p,
                ]
            };
            let a = mesh.push(corner(-1.0, -1.0), n);
            let b = mesh.push(corner(1.0, -1.0), n);
            let c = mesh.push(corner(1.0, 1.0), n);
            let d = mesh.push(corner(-1.0, 1.0), n);
            mesh.indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
        mesh
    }

    /// Ring torus in the XY plane, facing the camera.
    ///
    /// `radius` is from the centre to the middle of the tube; `tube` is the
    /// tube radius.
    pub fn torus(radius: f32, tube: f32, radial_segments: u16, tubular_segments: u16) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);
        let mut mesh = Self::default();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let ring = radius + tube * v.cos();
                let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
                let centre = [radius * u.cos(), radius * u.sin(), 0.0];
                let normal = normalize([
                    position[0] - centre[0],
                    position[1] - centre[1],
                    position[2] - centre[2],
                ]);
                mesh.push(position, normal);
            }
        }

        let stride = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    /// Cone with its apex on +Y and a closed base, centred on the origin.
    pub fn cone(radius: f32, height: f32, radial_segments: u16) -> Self {
        let segments = radial_segments.max(3);
        let half = height / 2.0;
        let slope = radius / height;
        let mut mesh = Self::default();

        // Side: an apex row and a base row, one vertex per angle so each apex
        // vertex carries the normal of its own slice.
        for row in 0..2u16 {
            let r = if row == 0 { 0.0 } else { radius };
            let y = if row == 0 { half } else { -half };
            for x in 0..=segments {
                let theta = x as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.push([r * sin, y, r * cos], normalize([sin, slope, cos]));
            }
        }
        let stride = segments + 1;
        for x in 0..segments {
            let b = stride + x;
            let c = stride + x + 1;
            let d = x + 1;
            mesh.indices.extend_from_slice(&[b, c, d]);
        }

        // Base cap.
        let centres = mesh.vertices.len() as u16;
        for _ in 0..segments {
            mesh.push([0.0, -half, 0.0], [0.0, -1.0, 0.0]);
        }
        let rim = mesh.vertices.len() as u16;
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            mesh.push(
                [radius * theta.sin(), -half, radius * theta.cos()],
                [0.0, -1.0, 0.0],
            );
        }
        for x in 0..segments {
            let c = centres + x;
            let i = rim + x;
            mesh.indices.extend_from_slice(&[i + 1, i, c]);
        }
        mesh
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f32::EPSILON {
        return [0.0, 1.0, 0.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}
