use std::ops::Range;

use crate::error::ShearError;

/// A trapezoidal response function described by four ordered knots.
///
/// The response is 0 below `tau0`, rises linearly to 1 over `[tau0, tau1]`,
/// stays at 1 over `[tau1, tau2]`, falls linearly to 0 over `[tau2, tau3]`
/// and is 0 above `tau3`.
///
/// Equal adjacent knots are allowed. A zero-width ramp is a step: the response
/// jumps from 0 to 1 at `tau0 == tau1` and back to 0 at `tau2 == tau3`, so the
/// unit box `[-0.5, -0.5, 0.5, 0.5]` and the triangle `[0, 1, 1, 2]` are both
/// valid trapezoids.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f32; 4]", into = "[f32; 4]")
)]
pub struct Trapezoid {
    knots: [f32; 4],
}

impl Trapezoid {
    /// Create a new trapezoid from its knots.
    ///
    /// # Arguments
    ///
    /// * `tau0` - Start of the rising ramp.
    /// * `tau1` - End of the rising ramp.
    /// * `tau2` - Start of the falling ramp.
    /// * `tau3` - End of the falling ramp.
    ///
    /// # Errors
    ///
    /// Returns [`ShearError::InvalidKnots`] if a knot is not finite or the
    /// knots are not in ascending order.
    ///
    /// # Example
    ///
    /// ```
    /// use fluxshear_imgproc::trapezoid::Trapezoid;
    ///
    /// let trapezoid = Trapezoid::new(-1.0, 0.0, 1.0, 2.0).unwrap();
    /// assert_eq!(trapezoid.area(), 2.0);
    ///
    /// assert!(Trapezoid::new(0.0, 1.0, 0.5, 2.0).is_err());
    /// ```
    pub fn new(tau0: f32, tau1: f32, tau2: f32, tau3: f32) -> Result<Self, ShearError> {
        let knots = [tau0, tau1, tau2, tau3];
        let finite = knots.iter().all(|k| k.is_finite());
        let ordered = knots.windows(2).all(|w| w[0] <= w[1]);
        if !finite || !ordered {
            return Err(ShearError::InvalidKnots(knots));
        }

        Ok(Self { knots })
    }

    /// Create a trapezoid from knots given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ShearError::InvalidKnots`] if a knot is not finite.
    pub fn from_unsorted(mut knots: [f32; 4]) -> Result<Self, ShearError> {
        if !knots.iter().all(|k| k.is_finite()) {
            return Err(ShearError::InvalidKnots(knots));
        }
        knots.sort_by(f32::total_cmp);
        Self::new(knots[0], knots[1], knots[2], knots[3])
    }

    /// The unit box covering exactly one pixel, `[-0.5, -0.5, 0.5, 0.5]`.
    pub fn unit_box() -> Self {
        Self {
            knots: [-0.5, -0.5, 0.5, 0.5],
        }
    }

    /// The knots `[tau0, tau1, tau2, tau3]`.
    pub fn knots(&self) -> [f32; 4] {
        self.knots
    }

    /// The total area under the response.
    pub fn area(&self) -> f32 {
        let [t0, t1, t2, t3] = self.knots;
        0.5 * (t1 - t0) + (t2 - t1) + 0.5 * (t3 - t2)
    }

    /// The same response translated by `offset`.
    pub fn shifted(&self, offset: f32) -> Self {
        Self {
            knots: self.knots.map(|k| k + offset),
        }
    }

    /// The exact area of the response restricted to `[li, ri]`.
    ///
    /// See [`trapezoid_integrate`].
    pub fn integrate(&self, li: f32, ri: f32) -> f32 {
        let [t0, t1, t2, t3] = self.knots;
        trapezoid_integrate(t0, t1, t2, t3, li, ri)
    }

    /// The range of unit samples that can overlap the support `[tau0, tau3]`.
    ///
    /// Sample `i` covers `[i - offset - 0.5, i - offset + 0.5)`. The returned
    /// range is `[floor(tau0 + offset + 0.5), ceil(tau3 + offset + 0.5))`
    /// clamped to `[0, len]`.
    ///
    /// # Example
    ///
    /// ```
    /// use fluxshear_imgproc::trapezoid::Trapezoid;
    ///
    /// let trapezoid = Trapezoid::new(-1.0, -0.5, 0.5, 1.0).unwrap();
    /// assert_eq!(trapezoid.support_span(2.0, 10), 1..4);
    /// assert_eq!(trapezoid.support_span(0.0, 10), 0..2);
    /// ```
    pub fn support_span(&self, offset: f32, len: usize) -> Range<usize> {
        let start = clamp_index((self.knots[0] + offset + 0.5).floor(), len);
        let end = clamp_index((self.knots[3] + offset + 0.5).ceil(), len);
        start..end.max(start)
    }
}

impl TryFrom<[f32; 4]> for Trapezoid {
    type Error = ShearError;

    fn try_from(knots: [f32; 4]) -> Result<Self, Self::Error> {
        Self::new(knots[0], knots[1], knots[2], knots[3])
    }
}

impl From<Trapezoid> for [f32; 4] {
    fn from(trapezoid: Trapezoid) -> Self {
        trapezoid.knots
    }
}

// NaN maps to 0, which leaves an empty span.
fn clamp_index(value: f32, len: usize) -> usize {
    if value <= 0.0 {
        0
    } else if value >= len as f32 {
        len
    } else {
        value as usize
    }
}

// Unlike f32::clamp this never panics and lets a NaN value through.
fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Compute the exact signed area of a trapezoid response over `[li, ri]`.
///
/// The area is the sum of three terms, one per segment of the trapezoid. The
/// query bounds are clamped into each segment, so a segment that does not
/// intersect the query contributes zero:
///
/// * rising `[tau0, tau1]`: `((r - tau0)² - (l - tau0)²) / (2 (tau1 - tau0))`
/// * flat `[tau1, tau2]`: `r - l`
/// * falling `[tau2, tau3]`: `((l - tau3)² - (r - tau3)²) / (2 (tau3 - tau2))`
///
/// A zero-width ramp contributes nothing, which makes it a step edge.
/// The knots are not validated here; NaN inputs propagate into the result.
///
/// # Arguments
///
/// * `tau0`, `tau1`, `tau2`, `tau3` - The ordered knots of the trapezoid.
/// * `li` - The lower bound of the query interval.
/// * `ri` - The upper bound of the query interval.
///
/// # Example
///
/// ```
/// use fluxshear_imgproc::trapezoid::trapezoid_integrate;
///
/// // triangle of height 1 over [0, 2]
/// assert_eq!(trapezoid_integrate(0.0, 1.0, 1.0, 2.0, -5.0, 5.0), 1.0);
/// assert_eq!(trapezoid_integrate(0.0, 1.0, 1.0, 2.0, 0.0, 1.0), 0.5);
/// ```
pub fn trapezoid_integrate(tau0: f32, tau1: f32, tau2: f32, tau3: f32, li: f32, ri: f32) -> f32 {
    let rising = if tau1 > tau0 {
        let l = clamp(li, tau0, tau1) - tau0;
        let r = clamp(ri, tau0, tau1) - tau0;
        (r * r - l * l) / (2.0 * (tau1 - tau0))
    } else {
        0.0
    };

    let flat = clamp(ri, tau1, tau2) - clamp(li, tau1, tau2);

    let falling = if tau3 > tau2 {
        let l = clamp(li, tau2, tau3) - tau3;
        let r = clamp(ri, tau2, tau3) - tau3;
        (l * l - r * r) / (2.0 * (tau3 - tau2))
    } else {
        0.0
    };

    rising + flat + falling
}
