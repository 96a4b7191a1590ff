use glam::{Mat4, Vec3};
use meshspin_common::SurfaceSize;

/// Fixed perspective camera looking down -Z.
///
/// Recreated only when the viewport mounts or the host surface resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov: 75.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    /// Camera sized to a host surface.
    pub fn for_surface(size: SurfaceSize) -> Self {
        Self {
            aspect: size.aspect(),
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
        assert!((cam.fov.to_degrees() - 75.0).abs() < 1e-4);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn for_surface_uses_aspect() {
        let cam = PerspectiveCamera::for_surface(SurfaceSize::new(1600, 800));
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = PerspectiveCamera::for_surface(SurfaceSize::new(1280, 720));
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn side_meshes_are_in_view() {
        let cam = PerspectiveCamera::for_surface(SurfaceSize::new(1280, 720));
        for x in [-4.0, 4.0] {
            let clip = cam.view_projection() * glam::Vec4::new(x, 0.0, 0.0, 1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() < 1.0, "x={x} projects outside: {ndc:?}");
        }
    }
}
