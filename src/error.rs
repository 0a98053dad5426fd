use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("a {border}px border leaves no plot area in a {width}x{height} viewport")]
    BorderTooLarge { border: u32, width: u32, height: u32 },

    #[error("xs and ys must have the same length, got {xs} and {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Render(#[from] vello::Error),

    #[error(transparent)]
    Surface(#[from] vello::wgpu::SurfaceError),
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;
