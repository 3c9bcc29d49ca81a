use fluxshear_image::Image;

use super::params::{PassOptions, ShearParams, Window};
use crate::error::ShearError;
use crate::trapezoid::Trapezoid;
use crate::workgroup::{dispatch_transposed, DispatchStats};

/// Geometry of a pass expressed relative to its scanned axis.
#[derive(Debug, Clone, Copy)]
struct ScanGeometry {
    c_along: f32,
    c_across: f32,
    w_along: f32,
    w_across: f32,
}

/// Resample along the x axis, writing the result transposed.
///
/// For every pixel `(ix, iy)` of `src` the footprint
/// `t = (ix - wx) * cx + (iy - wy) * cy + knots` is integrated against row `iy`
/// of `src`, where sample `ix_in` covers `[ix_in - wx - 0.5, ix_in - wx + 0.5)`.
/// The result, scaled by `h`, is stored at `dst[iy + ix * ny]`, so `dst` is an
/// image of the transposed size.
///
/// # Arguments
///
/// * `src` - The input image of size `nx` by `ny`.
/// * `dst` - The intermediate image of size `ny` by `nx`.
/// * `params` - The shear parameters.
/// * `window` - The sampling origin.
/// * `options` - The work group shape and execution strategy.
///
/// # Errors
///
/// Returns an error if `dst` does not have the transposed size of `src` or
/// the options are invalid.
///
/// # Example
///
/// ```
/// use fluxshear_image::{Image, ImageSize};
/// use fluxshear_imgproc::shear::{shear_x, PassOptions, ShearParams, Window};
///
/// let size = ImageSize { width: 3, height: 2 };
/// let src = Image::new(size, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let mut tmp = Image::from_size_val(size.transposed(), 0.0).unwrap();
///
/// let params = ShearParams::for_x_shear(1.0, 0.0).unwrap();
/// shear_x(&src, &mut tmp, &params, Window::centered(size), PassOptions::default()).unwrap();
///
/// assert_eq!(tmp.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn shear_x(
    src: &Image<f32>,
    dst: &mut Image<f32>,
    params: &ShearParams,
    window: Window,
    options: PassOptions,
) -> Result<DispatchStats, ShearError> {
    let geometry = ScanGeometry {
        c_along: params.cx,
        c_across: params.cy,
        w_along: window.wx,
        w_across: window.wy,
    };
    let stats = scan_pass(src, dst, params.h, &params.knots, geometry, options)?;

    log::debug!(
        "shear_x {}: {} groups, {} lanes committed ({:?})",
        src.size(),
        stats.groups,
        stats.committed,
        options.strategy
    );

    Ok(stats)
}

/// Resample along the y axis of a transposed intermediate image.
///
/// `src` is the output of [`shear_x`]: pixel `(ix, iy)` of the logical grid
/// is stored at `src[iy + ix * ny]`. For every `(ix, iy)` the footprint
/// `t = (iy - wy) * cy + (ix - wx) * cx + knots` is integrated against column
/// `ix` of the grid, which is contiguous in `src`. The result, scaled by `h`,
/// is stored at `dst[ix + iy * nx]` in the original orientation.
///
/// # Arguments
///
/// * `src` - The intermediate image of size `ny` by `nx`.
/// * `dst` - The output image of size `nx` by `ny`.
/// * `params` - The shear parameters.
/// * `window` - The sampling origin, in the orientation of `dst`.
/// * `options` - The work group shape and execution strategy.
///
/// # Errors
///
/// Returns an error if `dst` does not have the transposed size of `src` or
/// the options are invalid.
pub fn shear_y(
    src: &Image<f32>,
    dst: &mut Image<f32>,
    params: &ShearParams,
    window: Window,
    options: PassOptions,
) -> Result<DispatchStats, ShearError> {
    let geometry = ScanGeometry {
        c_along: params.cy,
        c_across: params.cx,
        w_along: window.wy,
        w_across: window.wx,
    };
    let stats = scan_pass(src, dst, params.h, &params.knots, geometry, options)?;

    log::debug!(
        "shear_y {}: {} groups, {} lanes committed ({:?})",
        dst.size(),
        stats.groups,
        stats.committed,
        options.strategy
    );

    Ok(stats)
}

// Rows of `src` are scanned; row `across`, sample `along` lands at dst[across + along * rows].
fn scan_pass(
    src: &Image<f32>,
    dst: &mut Image<f32>,
    h: f32,
    knots: &Trapezoid,
    geometry: ScanGeometry,
    options: PassOptions,
) -> Result<DispatchStats, ShearError> {
    dst.ensure_size(src.size().transposed())?;

    let (n_along, n_across) = (src.cols(), src.rows());
    let src_data = src.as_slice();

    dispatch_transposed(
        dst.as_slice_mut(),
        (n_along, n_across),
        options.group,
        options.strategy,
        |along, across| {
            let row = &src_data[across * n_along..(across + 1) * n_along];
            let shift = (along as f32 - geometry.w_along) * geometry.c_along
                + (across as f32 - geometry.w_across) * geometry.c_across;
            h * integrate_row(row, &knots.shifted(shift), geometry.w_along)
        },
    )
}

/// Integrate a footprint against a row of unit samples centered at `i - offset`.
fn integrate_row(row: &[f32], footprint: &Trapezoid, offset: f32) -> f32 {
    let span = footprint.support_span(offset, row.len());
    let mut acc = 0.0f32;
    for (i, &value) in row[span.clone()].iter().enumerate() {
        let center = (span.start + i) as f32 - offset;
        acc += footprint.integrate(center - 0.5, center + 0.5) * value;
    }
    acc
}
