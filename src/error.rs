use std::path::PathBuf;

use crate::block::Face;

/// Errors produced while bringing a viewer up.
///
/// Once the window is open and the batch is uploaded, nothing in the frame
/// loop can fail; surface hiccups are logged and the frame is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to load texture '{}'", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("block '{block}' has no texture for the {face:?} face and no side fallback")]
    MissingFaceTexture { block: &'static str, face: Face },

    #[error("failed to create window")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("event loop error")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
