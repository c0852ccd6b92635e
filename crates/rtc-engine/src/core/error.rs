use std::fmt;

/// Errors surfaced by [`SurfaceHost`](super::SurfaceHost) operations.
#[derive(Debug)]
pub enum HostError {
    /// A resize carried a non-positive dimension.
    InvalidSize { width: i32, height: i32 },
    /// The surface was already torn down.
    Destroyed,
    /// The renderer failed.
    Renderer(anyhow::Error),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "invalid viewport size {width}x{height}")
            }
            Self::Destroyed => f.write_str("surface already destroyed"),
            Self::Renderer(e) => write!(f, "renderer error: {e:#}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Renderer(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
