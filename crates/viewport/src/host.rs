use crate::viewport::ViewportError;
use meshspin_common::SurfaceSize;
use meshspin_render::{DebugTextRenderer, Renderer};

/// The surface a viewport mounts on.
///
/// `attach` creates the backend's drawable element and inserts it into the
/// host; `detach` removes it again. A host is measured once at mount and
/// again on every resize.
pub trait Host {
    type Backend: Renderer;

    /// Current drawable area in pixels.
    fn size(&self) -> SurfaceSize;

    /// Bind a render backend of the given output size to this host.
    fn attach(&mut self, size: SurfaceSize) -> Result<Self::Backend, ViewportError>;

    /// Remove the drawable created by [`Host::attach`].
    fn detach(&mut self, backend: Self::Backend);
}

/// Host without a window. Its drawable is a [`DebugTextRenderer`].
#[derive(Debug)]
pub struct HeadlessHost {
    size: SurfaceSize,
    attached: bool,
}

impl HeadlessHost {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            attached: false,
        }
    }

    /// Whether a drawable is currently attached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Host for HeadlessHost {
    type Backend = DebugTextRenderer;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn attach(&mut self, size: SurfaceSize) -> Result<DebugTextRenderer, ViewportError> {
        if self.attached {
            return Err(ViewportError::AlreadyAttached);
        }
        self.attached = true;
        Ok(DebugTextRenderer::new(size))
    }

    fn detach(&mut self, backend: DebugTextRenderer) {
        tracing::debug!("detaching headless drawable after {} frames", backend.frames());
        self.attached = false;
    }
}
