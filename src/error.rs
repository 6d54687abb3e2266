/// Failures while bringing up the window and GPU presentation.
///
/// The animation engine itself never fails; these only come from the host.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface error: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("device error: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface not supported by adapter")]
    UnsupportedSurface,

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
}
