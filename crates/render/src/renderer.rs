use crate::camera::PerspectiveCamera;
use meshspin_common::SurfaceSize;
use meshspin_scene::Scene;

/// Renderer-agnostic interface. All render backends implement this trait.
///
/// The renderer reads the scene and a camera, then produces one frame per
/// call. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;

    /// Adapt to a new output size.
    fn resize(&mut self, _size: SurfaceSize) {}
}

/// Headless renderer producing a human-readable description of each frame.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug)]
pub struct DebugTextRenderer {
    size: SurfaceSize,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new(size: SurfaceSize) -> Self {
        Self { size, frames: 0 }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (tick={}, {}x{}) ===\n",
            self.frames,
            scene.tick(),
            self.size.width,
            self.size.height
        ));
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}\n",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.fov.to_degrees(),
            camera.aspect
        ));
        let hidden = scene.meshes().len() - scene.visible_meshes().count();
        out.push_str(&format!(
            "Drawn: {} (hidden: {hidden})\n",
            scene.meshes().len() - hidden
        ));

        for mesh in scene.visible_meshes() {
            let p = mesh.transform.position;
            let r = mesh.transform.rotation;
            out.push_str(&format!(
                "  {:<5} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})\n",
                mesh.kind.label(),
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            ));
        }

        out
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshspin_common::MeshKind;

    #[test]
    fn renders_all_meshes_initially() {
        let scene = Scene::setup();
        let mut renderer = DebugTextRenderer::new(SurfaceSize::new(800, 600));
        let output = renderer.render(&scene, &PerspectiveCamera::default());

        assert!(output.contains("Frame 1"));
        assert!(output.contains("tick=0"));
        assert!(output.contains("Drawn: 3 (hidden: 0)"));
        assert!(output.contains("Cube"));
        assert!(output.contains("Torus pos=(-4.00"));
        assert!(output.contains("Cone  pos=(4.00"));
    }

    #[test]
    fn hidden_mesh_is_skipped_but_frame_still_rendered() {
        let mut scene = Scene::setup();
        scene.toggle_visibility(MeshKind::Cone);
        let mut renderer = DebugTextRenderer::new(SurfaceSize::new(800, 600));
        let output = renderer.render(&scene, &PerspectiveCamera::default());

        assert_eq!(renderer.frames(), 1);
        assert!(output.contains("Drawn: 2 (hidden: 1)"));
        assert!(!output.contains("Cone"));
    }

    #[test]
    fn resize_updates_reported_size() {
        let mut renderer = DebugTextRenderer::new(SurfaceSize::new(800, 600));
        renderer.resize(SurfaceSize::new(1024, 768));
        assert_eq!(renderer.size(), SurfaceSize::new(1024, 768));
        let output = renderer.render(&Scene::setup(), &PerspectiveCamera::default());
        assert!(output.contains("1024x768"));
    }

    #[test]
    fn frame_has_one_line_per_visible_mesh() {
        let mut scene = Scene::setup();
        scene.toggle_visibility(MeshKind::Torus);
        let mut renderer = DebugTextRenderer::new(SurfaceSize::new(800, 600));
        let output = renderer.render(&scene, &PerspectiveCamera::default());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("=== Frame 1"));
        assert!(lines[1].starts_with("Camera:"));
        assert!(lines[3].trim_start().starts_with("Cube"));
        assert!(lines[4].trim_start().starts_with("Cone"));
        assert!(output.ends_with('\n'));
    }
}
