#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the resampling operations.
pub mod error;

/// module containing parallization utilities.
pub mod parallel;

/// exact integration of trapezoidal response functions.
pub mod trapezoid;

/// local work groups staging results before a transposed commit.
pub mod workgroup;

/// separable shear passes and the two-pass resampler.
pub mod shear;

pub use crate::error::ShearError;
