use meshspin_common::SurfaceSize;
use meshspin_render_wgpu::SurfaceBackend;
use meshspin_viewport::{Host, ViewportError};
use std::sync::Arc;
use winit::window::Window;

/// A winit window acting as the viewport host. Its drawable is a wgpu surface.
pub struct WindowHost {
    instance: wgpu::Instance,
    window: Arc<Window>,
    sample_count: u32,
}

impl WindowHost {
    pub fn new(window: Arc<Window>, sample_count: u32) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self {
            instance,
            window,
            sample_count,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl Host for WindowHost {
    type Backend = SurfaceBackend;

    fn size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn attach(&mut self, size: SurfaceSize) -> Result<SurfaceBackend, ViewportError> {
        SurfaceBackend::new(&self.instance, self.window.clone(), size, self.sample_count)
            .map_err(|e| ViewportError::backend(e.to_string()))
    }

    fn detach(&mut self, backend: SurfaceBackend) {
        drop(backend);
        tracing::info!("surface detached from window");
    }
}
