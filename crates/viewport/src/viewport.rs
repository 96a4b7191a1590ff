use crate::animation::{AnimationLoop, LoopHandle};
use crate::host::Host;
use meshspin_common::{MeshKind, SurfaceSize};
use meshspin_controls::{Action, ControlState, Speed, SpeedError};
use meshspin_render::{PerspectiveCamera, Renderer};
use meshspin_scene::Scene;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("render backend setup failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
    #[error("host already has a drawable attached")]
    AlreadyAttached,
}

impl ViewportError {
    pub fn backend(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// A mounted viewport: scene, controls, camera and backend, plus the
/// animation loop that drives them.
///
/// Created by [`Viewport::mount`] and destroyed by [`Viewport::unmount`].
/// The host calls [`Viewport::frame`] once per display refresh; UI handlers
/// call [`Viewport::apply`] in between.
pub struct Viewport<B: Renderer> {
    scene: Scene,
    controls: ControlState,
    camera: PerspectiveCamera,
    backend: B,
    frames: AnimationLoop,
    stop: LoopHandle,
}

impl<B: Renderer> Viewport<B> {
    /// Build the scene and camera, attach a backend to `host`, and start the loop.
    pub fn mount<H>(host: &mut H) -> Result<Self, ViewportError>
    where
        H: Host<Backend = B>,
    {
        let size = host.size();
        let backend = host.attach(size)?;
        let (frames, stop) = AnimationLoop::start();

        tracing::info!("viewport mounted at {}x{}", size.width, size.height);

        Ok(Self {
            scene: Scene::setup(),
            controls: ControlState::new(),
            camera: PerspectiveCamera::for_surface(size),
            backend,
            frames,
            stop,
        })
    }

    /// One animation tick: spin every mesh by its current speed, then render.
    ///
    /// Returns `None` once the loop has been stopped.
    pub fn frame(&mut self) -> Option<B::Output> {
        let Self {
            scene,
            controls,
            camera,
            backend,
            frames,
            ..
        } = self;
        frames.tick(|| {
            scene.advance(|kind| controls.speed(kind).get());
            backend.render(scene, camera)
        })
    }

    /// Apply a UI action. Returns whether it was accepted.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetSpeed(kind, value) => self.set_speed(kind, value).is_ok(),
            Action::SetSpeedText(kind, text) => self.set_speed_text(kind, &text).is_ok(),
            Action::ToggleVisibility(kind) => {
                self.toggle_visibility(kind);
                true
            }
        }
    }

    /// Set a speed from a slider. Invalid values leave the speed unchanged.
    pub fn set_speed(&mut self, kind: MeshKind, value: f32) -> Result<Speed, SpeedError> {
        let result = self.controls.set_speed(kind, value);
        log_speed_change(kind, &result);
        result
    }

    /// Set a speed from numeric field text. Invalid text leaves the speed unchanged.
    pub fn set_speed_text(&mut self, kind: MeshKind, text: &str) -> Result<Speed, SpeedError> {
        let result = self.controls.set_speed_text(kind, text);
        log_speed_change(kind, &result);
        result
    }

    pub fn toggle_visibility(&mut self, kind: MeshKind) -> bool {
        self.scene.toggle_visibility(kind)
    }

    /// Recreate the camera for a new host size and resize the backend.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.camera = PerspectiveCamera::for_surface(size);
        self.backend.resize(size);
        tracing::debug!("viewport resized to {}x{}", size.width, size.height);
    }

    /// Stop the loop and detach the drawable from `host`. Returns the number
    /// of ticks that ran during the mount.
    pub fn unmount<H>(self, host: &mut H) -> u64
    where
        H: Host<Backend = B>,
    {
        let Self {
            backend,
            frames,
            stop,
            ..
        } = self;
        stop.stop();
        host.detach(backend);
        tracing::info!("viewport unmounted after {} ticks", frames.ticks());
        frames.ticks()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn ticks(&self) -> u64 {
        self.frames.ticks()
    }
}

fn log_speed_change(kind: MeshKind, result: &Result<Speed, SpeedError>) {
    match result {
        Ok(speed) => tracing::debug!("{kind} speed set to {speed}"),
        Err(e) => tracing::debug!("ignoring {kind} speed change: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use glam::Vec3;

    /// Backend double that records which meshes each frame drew.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<MeshKind>>,
        sizes: Vec<SurfaceSize>,
    }

    impl Renderer for Recorder {
        type Output = usize;

        fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> usize {
            let drawn: Vec<MeshKind> = scene.visible_meshes().map(|m| m.kind).collect();
            let count = drawn.len();
            self.frames.push(drawn);
            count
        }

        fn resize(&mut self, size: SurfaceSize) {
            self.sizes.push(size);
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        size: Option<SurfaceSize>,
        attached: usize,
        detached: usize,
    }

    impl Host for RecordingHost {
        type Backend = Recorder;

        fn size(&self) -> SurfaceSize {
            self.size.unwrap_or(SurfaceSize::new(1280, 720))
        }

        fn attach(&mut self, _size: SurfaceSize) -> Result<Recorder, ViewportError> {
            self.attached += 1;
            Ok(Recorder::default())
        }

        fn detach(&mut self, _backend: Recorder) {
            self.detached += 1;
        }
    }

    struct BrokenHost;

    impl Host for BrokenHost {
        type Backend = Recorder;

        fn size(&self) -> SurfaceSize {
            SurfaceSize::new(800, 600)
        }

        fn attach(&mut self, _size: SurfaceSize) -> Result<Recorder, ViewportError> {
            Err(ViewportError::backend("unsupported host environment"))
        }

        fn detach(&mut self, _backend: Recorder) {}
    }

    fn rotation(viewport: &Viewport<impl Renderer>, kind: MeshKind) -> Vec3 {
        viewport.scene().mesh(kind).transform.rotation
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn mount_builds_initial_state() {
        let mut host = RecordingHost::default();
        let viewport = Viewport::mount(&mut host).unwrap();

        assert_eq!(host.attached, 1);
        assert!(viewport.is_running());
        assert_eq!(viewport.camera().aspect, 1280.0 / 720.0);
        for kind in MeshKind::ALL {
            assert_eq!(viewport.controls().speed(kind).get(), 0.01);
            assert!(viewport.scene().mesh(kind).visible);
        }
        assert_eq!(viewport.scene().mesh(MeshKind::Torus).transform.position.x, -4.0);
        assert_eq!(viewport.scene().mesh(MeshKind::Cone).transform.position.x, 4.0);
        assert_eq!(viewport.scene().mesh(MeshKind::Cube).transform.position.x, 0.0);
    }

    #[test]
    fn mount_on_zero_area_host_is_not_an_error() {
        let mut host = RecordingHost {
            size: Some(SurfaceSize::new(0, 0)),
            ..Default::default()
        };
        let viewport = Viewport::mount(&mut host).unwrap();
        assert_eq!(viewport.camera().aspect, 0.0);
    }

    #[test]
    fn mount_propagates_backend_failure() {
        let err = Viewport::mount(&mut BrokenHost).err().unwrap();
        assert!(matches!(err, ViewportError::Backend(_)));
        assert!(err.to_string().contains("unsupported host environment"));
    }

    #[test]
    fn frame_spins_each_mesh_by_its_speed() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();

        viewport.frame();
        for kind in MeshKind::ALL {
            let rot = rotation(&viewport, kind);
            assert_close(rot.x, 0.01);
            assert_close(rot.y, 0.01);
            assert_eq!(rot.z, 0.0);
        }
    }

    #[test]
    fn cube_speed_change_applies_on_next_tick_only_to_cube() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();
        viewport.frame();
        let before: Vec<Vec3> = MeshKind::ALL.iter().map(|k| rotation(&viewport, *k)).collect();

        assert!(viewport.apply(Action::SetSpeed(MeshKind::Cube, 0.05)));
        viewport.frame();

        let cube = rotation(&viewport, MeshKind::Cube);
        assert_close(cube.x - before[0].x, 0.05);
        assert_close(cube.y - before[0].y, 0.05);
        assert_close(rotation(&viewport, MeshKind::Torus).x - before[1].x, 0.01);
        assert_close(rotation(&viewport, MeshKind::Cone).x - before[2].x, 0.01);
    }

    #[test]
    fn out_of_range_speed_is_ignored() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();

        assert!(!viewport.apply(Action::SetSpeed(MeshKind::Torus, 0.2)));
        assert_eq!(viewport.controls().speed(MeshKind::Torus).get(), 0.01);

        viewport.frame();
        assert_close(rotation(&viewport, MeshKind::Torus).x, 0.01);
    }

    #[test]
    fn speed_text_is_validated() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();

        assert!(viewport.apply(Action::SetSpeedText(MeshKind::Cone, "0.1".into())));
        assert!(!viewport.apply(Action::SetSpeedText(MeshKind::Cone, "abc".into())));
        assert!(!viewport.apply(Action::SetSpeedText(MeshKind::Cone, "NaN".into())));
        assert_eq!(viewport.controls().speed(MeshKind::Cone).get(), 0.1);
    }

    #[test]
    fn zero_speed_freezes_a_mesh() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();
        viewport.set_speed(MeshKind::Torus, 0.0).unwrap();
        for _ in 0..5 {
            viewport.frame();
        }
        assert_eq!(rotation(&viewport, MeshKind::Torus), Vec3::ZERO);
        assert_close(rotation(&viewport, MeshKind::Cube).x, 0.05);
    }

    #[test]
    fn hidden_mesh_still_spins_and_backend_still_runs() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();

        assert!(viewport.apply(Action::ToggleVisibility(MeshKind::Cone)));
        assert!(!viewport.scene().mesh(MeshKind::Cone).visible);

        assert_eq!(viewport.frame(), Some(2));
        assert_eq!(
            viewport.backend().frames,
            vec![vec![MeshKind::Cube, MeshKind::Torus]]
        );
        assert_close(rotation(&viewport, MeshKind::Cone).x, 0.01);
    }

    #[test]
    fn toggling_twice_restores_visibility() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();
        assert!(!viewport.toggle_visibility(MeshKind::Cube));
        assert!(viewport.toggle_visibility(MeshKind::Cube));
        assert_eq!(viewport.frame(), Some(3));
    }

    #[test]
    fn resize_recreates_camera_and_resizes_backend() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();
        viewport.resize(SurfaceSize::new(1000, 500));
        assert_eq!(viewport.camera().aspect, 2.0);
        assert_eq!(viewport.backend().sizes, vec![SurfaceSize::new(1000, 500)]);
    }

    #[test]
    fn unmount_stops_loop_and_detaches() {
        let mut host = RecordingHost::default();
        let mut viewport = Viewport::mount(&mut host).unwrap();
        viewport.frame();
        viewport.frame();

        let ticks = viewport.unmount(&mut host);
        assert_eq!(ticks, 2);
        assert_eq!(host.detached, 1);
    }

    #[test]
    fn headless_host_is_detached_after_unmount() {
        let mut host = HeadlessHost::new(SurfaceSize::new(320, 240));
        let mut viewport = Viewport::mount(&mut host).unwrap();
        assert!(host.is_attached());

        let text = viewport.frame().unwrap();
        assert!(text.contains("Frame 1"));
        assert_eq!(viewport.ticks(), 1);

        viewport.unmount(&mut host);
        assert!(!host.is_attached());

        // A fresh mount on the same host works once the old drawable is gone.
        let viewport = Viewport::mount(&mut host).unwrap();
        assert_eq!(viewport.scene().tick(), 0);
    }
}
