// ---------------------------------------------------------------------------
// FluidError: typed errors for the fluid engine's fallible entry points
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors returned by the checked (`try_*`) side of the fluid API.
///
/// The unchecked accessors panic on the same conditions; this enum exists for
/// callers holding untrusted coordinates or configuration (UI clicks, JSON).
#[derive(Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Cell coordinate outside `[0, width) x [0, height)`.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Edge coordinate outside the `(width - 1) x (height - 1)` flow domain.
    EdgeOutOfBounds {
        x: usize,
        y: usize,
        edges_x: usize,
        edges_y: usize,
    },
    /// Grid constructed with a zero dimension.
    InvalidDimensions { width: usize, height: usize },
    /// A `FlowParams` field is outside its accepted range.
    InvalidParams(String),
    /// Settings could not be parsed or read.
    Config(String),
}

impl fmt::Display for FluidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluidError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "Cell ({x}, {y}) is outside the {width}x{height} grid"),
            FluidError::EdgeOutOfBounds {
                x,
                y,
                edges_x,
                edges_y,
            } => write!(
                f,
                "Edge ({x}, {y}) is outside the {edges_x}x{edges_y} flow field"
            ),
            FluidError::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {width}x{height}: both must be positive")
            }
            FluidError::InvalidParams(msg) => write!(f, "Invalid flow parameters: {msg}"),
            FluidError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for FluidError {}

impl From<serde_json::Error> for FluidError {
    fn from(e: serde_json::Error) -> Self {
        FluidError::Config(e.to_string())
    }
}

impl From<std::io::Error> for FluidError {
    fn from(e: std::io::Error) -> Self {
        FluidError::Config(e.to_string())
    }
}
