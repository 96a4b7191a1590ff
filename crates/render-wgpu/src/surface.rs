use crate::gpu::WgpuRenderer;
use meshspin_common::SurfaceSize;
use meshspin_render::{PerspectiveCamera, Renderer};
use meshspin_scene::Scene;
use thiserror::Error;

/// Failures while binding a GPU backend to a host surface.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// A rendered frame that has not been presented yet.
///
/// Overlays draw into `view` before calling [`PendingFrame::present`].
pub struct PendingFrame {
    pub texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl PendingFrame {
    pub fn present(self) {
        self.texture.present();
    }
}

/// GPU render backend bound to one drawable surface.
pub struct SurfaceBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    adapter_info: wgpu::AdapterInfo,
}

impl SurfaceBackend {
    /// Create a surface for `target`, pick an adapter and device, and build
    /// the renderer. `sample_count` falls back to 1 when the surface format
    /// does not support it.
    pub fn new(
        instance: &wgpu::Instance,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
        sample_count: u32,
    ) -> Result<Self, BackendError> {
        let surface = instance.create_surface(target)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(BackendError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("meshspin_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(BackendError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let supported = adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(sample_count);
        let sample_count = if supported {
            sample_count
        } else {
            tracing::warn!("{sample_count}x MSAA unsupported for {surface_format:?}, disabling");
            1
        };

        let renderer = WgpuRenderer::new(&device, surface_format, size, sample_count);
        let adapter_info = adapter.get_info();

        tracing::info!(
            "GPU initialized with {} backend ({}), {}x MSAA",
            adapter_info.backend.to_str(),
            adapter_info.name,
            sample_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            adapter_info,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    pub fn sample_count(&self) -> u32 {
        self.renderer.sample_count()
    }
}

impl Renderer for SurfaceBackend {
    type Output = Option<PendingFrame>;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Option<PendingFrame> {
        let texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return None;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return None;
            }
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, scene, camera);

        Some(PendingFrame { texture, view })
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, size);
    }
}
