use fluxshear_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while configuring or running a shear pass.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ShearError {
    /// The trapezoid knots are not finite or not in ascending order.
    #[error("trapezoid knots must be finite and ordered, got {0:?}")]
    InvalidKnots([f32; 4]),

    /// The shear matrix row has a zero or non-finite diagonal entry.
    #[error("shear matrix row (diagonal {0}, off-diagonal {1}) is degenerate")]
    DegenerateShear(f32, f32),

    /// The work group has no lanes along one of its axes.
    #[error("work group shape must be non-empty, got {0}x{1}")]
    InvalidGroupShape(usize, usize),

    /// The source or destination image has the wrong size.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The parallel executor failed.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
