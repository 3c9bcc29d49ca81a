//! Flux-conserving shear resampling.
//!
//! A shear is resampled in two separable passes. [`shear_x`] integrates a
//! trapezoidal footprint against every input row and writes its result
//! transposed, so that [`shear_y`] can integrate along the columns of the
//! original image while still scanning contiguous memory. Because every
//! output value is the exact integral of the footprint over the pixel
//! quantized input, the total flux of the image is preserved.
//!
//! # Examples
//!
//! Shearing an image along x and then along y:
//!
//! ```
//! use fluxshear_image::{Image, ImageSize};
//! use fluxshear_imgproc::shear::{PassOptions, ShearParams, ShearResampler};
//!
//! let size = ImageSize { width: 64, height: 48 };
//! let src = Image::from_size_val(size, 1.0f32).unwrap();
//! let mut dst = Image::from_size_val(size, 0.0f32).unwrap();
//!
//! let mut resampler = ShearResampler::new(size, PassOptions::default()).unwrap();
//! let shear_x = ShearParams::for_x_shear(1.0, 0.2).unwrap();
//! let shear_y = ShearParams::for_y_shear(-0.1, 1.0).unwrap();
//! resampler.apply(&src, &mut dst, &shear_x, &shear_y).unwrap();
//!
//! assert!((dst.get_pixel(32, 24).unwrap() - 1.0).abs() < 1e-5);
//! ```

mod params;
mod pass;
mod resampler;

pub use params::{PassOptions, ShearParams, Window};
pub use pass::{shear_x, shear_y};
pub use resampler::ShearResampler;
