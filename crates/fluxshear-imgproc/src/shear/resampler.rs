use fluxshear_image::{Image, ImageSize};

use super::params::{PassOptions, ShearParams, Window};
use super::pass::{shear_x, shear_y};
use crate::error::ShearError;

/// Runs the x pass and the y pass of a shear over images of a fixed size.
///
/// The resampler owns the intermediate image, which is allocated once with
/// the transposed size and fully overwritten by every x pass.
pub struct ShearResampler {
    size: ImageSize,
    window: Window,
    options: PassOptions,
    tmp: Image<f32>,
}

impl ShearResampler {
    /// Create a resampler for images of the given size.
    ///
    /// The window is centered on the image.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the input and output images.
    /// * `options` - The work group shape and execution strategy of both passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the work group shape is empty.
    pub fn new(size: ImageSize, options: PassOptions) -> Result<Self, ShearError> {
        options.group.validate()?;

        let window = Window::centered(size);
        let tmp = Image::from_size_val(size.transposed(), 0.0)?;

        log::trace!(
            "shear resampler for {size}: window ({}, {}), {:?}",
            window.wx,
            window.wy,
            options
        );

        Ok(Self {
            size,
            window,
            options,
            tmp,
        })
    }

    /// Replace the centered window.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// The size of the images this resampler accepts.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The sampling window of both passes.
    pub fn window(&self) -> Window {
        self.window
    }

    /// The intermediate image left by the last x pass.
    pub fn intermediate(&self) -> &Image<f32> {
        &self.tmp
    }

    /// Shear `src` along x with `x_params`, then along y with `y_params`.
    ///
    /// The y pass starts only once the x pass has written the whole
    /// intermediate image.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` or `dst` does not have the configured size,
    /// or if a pass fails to execute.
    pub fn apply(
        &mut self,
        src: &Image<f32>,
        dst: &mut Image<f32>,
        x_params: &ShearParams,
        y_params: &ShearParams,
    ) -> Result<(), ShearError> {
        src.ensure_size(self.size)?;
        dst.ensure_size(self.size)?;

        shear_x(src, &mut self.tmp, x_params, self.window, self.options)?;
        shear_y(&self.tmp, dst, y_params, self.window, self.options)?;

        Ok(())
    }
}
