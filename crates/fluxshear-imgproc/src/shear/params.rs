use fluxshear_image::ImageSize;

use crate::error::ShearError;
use crate::parallel::ExecutionStrategy;
use crate::trapezoid::Trapezoid;
use crate::workgroup::GroupShape;

/// Parameters of one shear pass.
///
/// The footprint of the output pixel `(ix, iy)` is the trapezoid translated
/// to `(ix - wx) * cx + (iy - wy) * cy`, and its value is `h` times the
/// integral of that footprint against the input.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShearParams {
    /// Direction cosine along x.
    pub cx: f32,
    /// Direction cosine along y.
    pub cy: f32,
    /// Area normalization factor.
    pub h: f32,
    /// The response of a single output sample.
    pub knots: Trapezoid,
}

impl ShearParams {
    /// Create a new set of shear parameters.
    pub fn new(cx: f32, cy: f32, h: f32, knots: Trapezoid) -> Self {
        Self { cx, cy, h, knots }
    }

    /// Parameters for the x pass of the shear matrix row `[xx, xy]`.
    ///
    /// The shear maps `x' = xx * x + xy * y`. The pass samples it with
    /// `cx = 1 / xx`, `cy = -xy / xx`, `h = min(1, 1 / |xy|)` and the
    /// footprint of a unit pixel pushed through the inverse shear.
    ///
    /// # Errors
    ///
    /// Returns [`ShearError::DegenerateShear`] if `xx` is zero or an entry is
    /// not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use fluxshear_imgproc::shear::ShearParams;
    /// use fluxshear_imgproc::trapezoid::Trapezoid;
    ///
    /// let identity = ShearParams::for_x_shear(1.0, 0.0).unwrap();
    /// assert_eq!((identity.cx, identity.cy, identity.h), (1.0, 0.0, 1.0));
    /// assert_eq!(identity.knots, Trapezoid::unit_box());
    /// ```
    pub fn for_x_shear(xx: f32, xy: f32) -> Result<Self, ShearError> {
        let (c_along, c_across, h, knots) = sample_matrix_row(xx, xy)?;
        Ok(Self::new(c_along, c_across, h, knots))
    }

    /// Parameters for the y pass of the shear matrix row `[yx, yy]`.
    ///
    /// Mirrors [`ShearParams::for_x_shear`] with `cy = 1 / yy` and
    /// `cx = -yx / yy`.
    ///
    /// # Errors
    ///
    /// Returns [`ShearError::DegenerateShear`] if `yy` is zero or an entry is
    /// not finite.
    pub fn for_y_shear(yx: f32, yy: f32) -> Result<Self, ShearError> {
        let (c_along, c_across, h, knots) = sample_matrix_row(yy, yx)?;
        Ok(Self::new(c_across, c_along, h, knots))
    }

    /// The value a constant unit input produces away from the image border.
    pub fn gain(&self) -> f32 {
        self.h * self.knots.area()
    }
}

fn sample_matrix_row(diag: f32, off: f32) -> Result<(f32, f32, f32, Trapezoid), ShearError> {
    if diag == 0.0 || !diag.is_finite() || !off.is_finite() {
        return Err(ShearError::DegenerateShear(diag, off));
    }

    let half = 0.5 / diag;
    let skew = 0.5 * off / diag;
    let knots = Trapezoid::from_unsorted([half + skew, half - skew, -half + skew, -half - skew])?;
    let h = (1.0 / off.abs()).min(1.0);

    Ok((1.0 / diag, -off / diag, h, knots))
}

/// Origin of the sampling coordinates relative to the pixel grid.
///
/// Pixel `(ix, iy)` sits at `(ix - wx, iy - wy)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// Offset along x.
    pub wx: f32,
    /// Offset along y.
    pub wy: f32,
}

impl Window {
    /// Create a new window.
    pub fn new(wx: f32, wy: f32) -> Self {
        Self { wx, wy }
    }

    /// The window centered on an image of the given size.
    ///
    /// # Example
    ///
    /// ```
    /// use fluxshear_image::ImageSize;
    /// use fluxshear_imgproc::shear::Window;
    ///
    /// let window = Window::centered(ImageSize { width: 512, height: 256 });
    /// assert_eq!(window, Window::new(255.5, 127.5));
    /// ```
    pub fn centered(size: ImageSize) -> Self {
        Self {
            wx: (size.width as f32 - 1.0) / 2.0,
            wy: (size.height as f32 - 1.0) / 2.0,
        }
    }
}

/// How a pass is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassOptions {
    /// The local work group shape.
    pub group: GroupShape,
    /// The execution strategy for the groups.
    pub strategy: ExecutionStrategy,
}

impl PassOptions {
    /// Set the work group shape.
    pub fn with_group(mut self, group: GroupShape) -> Self {
        self.group = group;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
