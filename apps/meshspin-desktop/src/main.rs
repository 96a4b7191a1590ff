mod host;
mod panel;

use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use host::WindowHost;
use meshspin_common::SurfaceSize;
use meshspin_controls::Action;
use meshspin_render_wgpu::SurfaceBackend;
use meshspin_viewport::Viewport;
use panel::ControlPanel;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "meshspin-desktop", about = "Rotating cube, torus and cone viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,

    /// Render without multisampling
    #[arg(long)]
    no_antialias: bool,
}

/// Everything that exists only while the viewport is mounted on a window.
struct Mounted {
    host: WindowHost,
    viewport: Viewport<SurfaceBackend>,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct App {
    size: PhysicalSize<u32>,
    sample_count: u32,
    mounted: Option<Mounted>,
    egui_ctx: EguiContext,
    panel: Option<ControlPanel>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli) -> Self {
        Self {
            size: PhysicalSize::new(cli.width, cli.height),
            sample_count: if cli.no_antialias { 1 } else { 4 },
            mounted: None,
            egui_ctx: EguiContext::default(),
            panel: None,
            failure: None,
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("meshspin")
            .with_inner_size(self.size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let mut host = WindowHost::new(window.clone(), self.sample_count);
        let viewport = Viewport::mount(&mut host)?;

        let backend = viewport.backend();
        window.set_title(&format!(
            "meshspin ({}, {}x MSAA)",
            backend.adapter_info().name,
            backend.sample_count()
        ));
        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(backend.device(), backend.format(), None, 1, false);

        if self.panel.is_none() {
            self.panel = Some(ControlPanel::new(viewport.controls()));
        }

        self.mounted = Some(Mounted {
            host,
            viewport,
            egui_winit,
            egui_renderer,
        });
        window.request_redraw();
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(Mounted {
            mut host, viewport, ..
        }) = self.mounted.take()
        {
            viewport.unmount(&mut host);
        }
    }

    fn redraw(&mut self) {
        let (Some(mounted), Some(panel)) = (&mut self.mounted, &mut self.panel) else {
            return;
        };
        let Mounted {
            host,
            viewport,
            egui_winit,
            egui_renderer,
        } = mounted;
        let window = host.window();

        let Some(frame) = viewport.frame().flatten() else {
            if viewport.is_running() {
                window.request_redraw();
            }
            return;
        };

        let mut actions: Vec<Action> = Vec::new();
        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            panel.show(ctx, viewport.controls(), viewport.scene(), &mut actions);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let backend = viewport.backend();
        let (device, queue) = (backend.device(), backend.queue());
        let size = backend.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width.max(1), size.height.max(1)],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        frame.present();

        for action in actions {
            viewport.apply(action);
        }

        if viewport.is_running() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.mounted.is_some() {
            return;
        }
        if let Err(e) = self.mount(event_loop) {
            tracing::error!("failed to mount viewport: {e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(mounted) = &mut self.mounted else {
            return;
        };

        let response = mounted
            .egui_winit
            .on_window_event(mounted.host.window(), &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                mounted
                    .viewport
                    .resize(SurfaceSize::new(new_size.width, new_size.height));
                mounted.host.window().request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(panel) = &mut self.panel {
                    panel.visible = !panel.visible;
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("meshspin-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
