//! Flux-conserving resampling of images under 2D shears.
//!
//! Every output pixel is the exact integral of a trapezoidal footprint
//! against the pixel quantized input, computed in two separable passes.
//!
//! ```
//! use fluxshear::image::{Image, ImageSize};
//! use fluxshear::imgproc::shear::{PassOptions, ShearParams, ShearResampler};
//!
//! let size = ImageSize { width: 16, height: 16 };
//! let src = Image::from_fn(size, |x, y| (x + y) as f32);
//! let mut dst = Image::from_size_val(size, 0.0f32).unwrap();
//!
//! let mut resampler = ShearResampler::new(size, PassOptions::default()).unwrap();
//! resampler
//!     .apply(
//!         &src,
//!         &mut dst,
//!         &ShearParams::for_x_shear(1.0, 0.0).unwrap(),
//!         &ShearParams::for_y_shear(0.0, 1.0).unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(dst, src);
//! ```

#[doc(inline)]
pub use fluxshear_image as image;

#[doc(inline)]
pub use fluxshear_imgproc as imgproc;
