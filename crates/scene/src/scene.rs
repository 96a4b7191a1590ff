use glam::Vec3;
use meshspin_common::{Color, MeshKind, Transform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Horizontal offset of the torus and cone from the cube at the origin.
pub const MESH_SPACING: f32 = 4.0;

/// Standard surface material. One instance is shared by every mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Color::from_hex(0x00ff00),
        }
    }
}

/// Directional light shining from `position` towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 4.0, 0.0),
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

/// A renderable primitive placed in the scene.
///
/// Meshes carry no material of their own; every mesh is drawn with the
/// scene's single [`Material`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub kind: MeshKind,
    pub transform: Transform,
    pub visible: bool,
}

impl Mesh {
    fn new(kind: MeshKind) -> Self {
        let x = match kind {
            MeshKind::Cube => 0.0,
            MeshKind::Torus => -MESH_SPACING,
            MeshKind::Cone => MESH_SPACING,
        };
        Self {
            kind,
            transform: Transform::at(Vec3::new(x, 0.0, 0.0)),
            visible: true,
        }
    }

    /// Advance rotation about X and Y by `amount` radians.
    pub fn spin(&mut self, amount: f32) {
        self.transform.rotation.x += amount;
        self.transform.rotation.y += amount;
    }
}

/// The scene graph: three meshes sharing one material, lit by one light.
///
/// Built once per mount by [`Scene::setup`]. Renderers read it; only the
/// animation loop and the visibility controls mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SceneData")]
pub struct Scene {
    meshes: [Mesh; 3],
    material: Material,
    light: DirectionalLight,
    background: Color,
    tick: u64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("mesh slot {slot} holds {found}, expected {expected}")]
    MeshOrder {
        slot: usize,
        expected: MeshKind,
        found: MeshKind,
    },
}

/// Unchecked wire form of [`Scene`].
#[derive(Deserialize)]
struct SceneData {
    meshes: [Mesh; 3],
    material: Material,
    light: DirectionalLight,
    background: Color,
    tick: u64,
}

impl TryFrom<SceneData> for Scene {
    type Error = SceneError;

    fn try_from(data: SceneData) -> Result<Self, SceneError> {
        for (slot, (mesh, expected)) in data.meshes.iter().zip(MeshKind::ALL).enumerate() {
            if mesh.kind != expected {
                return Err(SceneError::MeshOrder {
                    slot,
                    expected,
                    found: mesh.kind,
                });
            }
        }
        Ok(Self {
            meshes: data.meshes,
            material: data.material,
            light: data.light,
            background: data.background,
            tick: data.tick,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::setup()
    }
}

impl Scene {
    /// Build the initial scene: cube at the origin, torus at x = -4, cone at x = +4.
    pub fn setup() -> Self {
        Self {
            meshes: MeshKind::ALL.map(Mesh::new),
            material: Material::default(),
            light: DirectionalLight::default(),
            background: Color::from_hex(0xccd9ff),
            tick: 0,
        }
    }

    /// Number of animation ticks applied so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Meshes that should be drawn this frame.
    pub fn visible_meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.iter().filter(|m| m.visible)
    }

    pub fn mesh(&self, kind: MeshKind) -> &Mesh {
        &self.meshes[kind.index()]
    }

    pub fn mesh_mut(&mut self, kind: MeshKind) -> &mut Mesh {
        &mut self.meshes[kind.index()]
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Flip a mesh's visibility. Returns the new state.
    pub fn toggle_visibility(&mut self, kind: MeshKind) -> bool {
        let mesh = self.mesh_mut(kind);
        mesh.visible = !mesh.visible;
        tracing::debug!("{kind} visible={}", mesh.visible);
        mesh.visible
    }

    /// Apply one animation tick: every mesh, hidden or not, spins by its own speed.
    pub fn advance(&mut self, speed_of: impl Fn(MeshKind) -> f32) {
        for mesh in &mut self.meshes {
            mesh.spin(speed_of(mesh.kind));
        }
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_places_meshes() {
        let scene = Scene::setup();
        assert_eq!(scene.meshes().len(), 3);
        assert_eq!(scene.mesh(MeshKind::Cube).transform.position.x, 0.0);
        assert_eq!(scene.mesh(MeshKind::Torus).transform.position.x, -4.0);
        assert_eq!(scene.mesh(MeshKind::Cone).transform.position.x, 4.0);
        assert_eq!(scene.tick(), 0);
    }

    #[test]
    fn setup_meshes_visible_and_unrotated() {
        let scene = Scene::setup();
        for mesh in scene.meshes() {
            assert!(mesh.visible);
            assert_eq!(mesh.transform.rotation, Vec3::ZERO);
        }
    }

    #[test]
    fn meshes_are_in_kind_order() {
        let scene = Scene::setup();
        let kinds: Vec<MeshKind> = scene.meshes().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, MeshKind::ALL.to_vec());
    }

    #[test]
    fn toggle_twice_restores_visibility() {
        let mut scene = Scene::setup();
        assert!(!scene.toggle_visibility(MeshKind::Cone));
        assert!(!scene.mesh(MeshKind::Cone).visible);
        assert!(scene.toggle_visibility(MeshKind::Cone));
        assert_eq!(scene, Scene::setup());
    }

    #[test]
    fn visible_meshes_skips_hidden() {
        let mut scene = Scene::setup();
        scene.toggle_visibility(MeshKind::Torus);
        let kinds: Vec<MeshKind> = scene.visible_meshes().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MeshKind::Cube, MeshKind::Cone]);
    }

    #[test]
    fn advance_uses_each_mesh_speed() {
        let mut scene = Scene::setup();
        scene.advance(|kind| match kind {
            MeshKind::Cube => 0.05,
            MeshKind::Torus => 0.01,
            MeshKind::Cone => 0.0,
        });
        let cube = scene.mesh(MeshKind::Cube).transform.rotation;
        assert!((cube.x - 0.05).abs() < 1e-6);
        assert!((cube.y - 0.05).abs() < 1e-6);
        assert_eq!(cube.z, 0.0);
        assert!((scene.mesh(MeshKind::Torus).transform.rotation.x - 0.01).abs() < 1e-6);
        assert_eq!(scene.mesh(MeshKind::Cone).transform.rotation, Vec3::ZERO);
        assert_eq!(scene.tick(), 1);
    }

    #[test]
    fn hidden_meshes_keep_spinning() {
        let mut scene = Scene::setup();
        scene.toggle_visibility(MeshKind::Cube);
        scene.advance(|_| 0.02);
        scene.advance(|_| 0.02);
        let rot = scene.mesh(MeshKind::Cube).transform.rotation;
        assert!((rot.x - 0.04).abs() < 1e-6);
        assert!((rot.y - 0.04).abs() < 1e-6);
    }

    #[test]
    fn light_points_from_its_position() {
        let light = DirectionalLight::default();
        let dir = light.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
        assert_eq!(dir.z, 0.0);
    }

    #[test]
    fn scene_roundtrips_through_json() {
        let mut scene = Scene::setup();
        scene.advance(|_| 0.01);
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn out_of_order_meshes_are_rejected() {
        let mut value = serde_json::to_value(Scene::setup()).unwrap();
        value["meshes"].as_array_mut().unwrap().swap(0, 1);

        let err = serde_json::from_value::<Scene>(value).unwrap_err();
        assert!(err.to_string().contains("mesh slot 0 holds Torus, expected Cube"));
    }
}
