//! Cooperative local work groups.
//!
//! A pass computes one value per position `(along, across)` of a grid and
//! stores it in a destination laid out with `along` as the row index, i.e.
//! transposed with respect to the grid. Positions are processed in tiles of
//! [`GroupShape::along`] × [`GroupShape::across`] lanes. Each group:
//!
//! 1. stages the value of every lane into a scratch buffer in grid order,
//!    marking lanes that fall outside the grid as [`Lane::Inert`];
//! 2. synchronizes: [`LocalGroup::stage`] returns a [`Staged`] view, and the
//!    scratch can only be read back through it once every lane is written;
//! 3. commits: lane `k` reads the slot of the lane that owns destination
//!    offset `k` of the tile, so consecutive lanes write consecutive memory.
//!
//! The destination is split into disjoint row blocks, one per column of
//! groups, which is what lets the blocks run in parallel without locking.

use crate::error::ShearError;
use crate::parallel::{ChunkExecuteExt, ExecutionStrategy};

/// Shape of a local work group, in lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupShape {
    /// Lanes along the scanned axis.
    pub along: usize,
    /// Lanes across the scanned axis.
    pub across: usize,
}

impl Default for GroupShape {
    fn default() -> Self {
        Self {
            along: 32,
            across: 8,
        }
    }
}

impl GroupShape {
    /// Create a new group shape.
    pub fn new(along: usize, across: usize) -> Self {
        Self { along, across }
    }

    /// Number of lanes in the group.
    pub fn lanes(&self) -> usize {
        self.along * self.across
    }

    /// Check that the group has at least one lane along both axes.
    ///
    /// # Errors
    ///
    /// Returns [`ShearError::InvalidGroupShape`] for an empty shape.
    pub fn validate(&self) -> Result<(), ShearError> {
        if self.along == 0 || self.across == 0 {
            return Err(ShearError::InvalidGroupShape(self.along, self.across));
        }
        Ok(())
    }

    /// Number of groups needed to cover a grid of `extent = (along, across)`.
    pub fn groups_for(&self, extent: (usize, usize)) -> usize {
        extent.0.div_ceil(self.along) * extent.1.div_ceil(self.across)
    }
}

/// The staged result of one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lane<T> {
    /// The lane maps to a grid position and holds its value.
    Active(T),
    /// The lane lies in the padding beyond the grid and must not write.
    Inert,
}

/// A work group with its scratch buffer.
///
/// The scratch is reused by every group a worker processes.
pub struct LocalGroup<T> {
    shape: GroupShape,
    scratch: Vec<Lane<T>>,
}

impl<T: Copy> LocalGroup<T> {
    /// Create a group with a scratch buffer sized for `shape`.
    pub fn new(shape: GroupShape) -> Self {
        Self {
            shape,
            scratch: vec![Lane::Inert; shape.lanes()],
        }
    }

    /// Stage the lanes of the tile starting at `origin`.
    ///
    /// Lane `(a, c)` of the tile is written to slot `a + c * along` with
    /// `f(origin.0 + a, origin.1 + c)`, or [`Lane::Inert`] when that position
    /// is outside `extent`.
    pub fn stage<F>(
        &mut self,
        origin: (usize, usize),
        extent: (usize, usize),
        f: F,
    ) -> Staged<'_, T>
    where
        F: Fn(usize, usize) -> T,
    {
        let along = self.shape.along;
        for (slot, lane) in self.scratch.iter_mut().enumerate() {
            let pos_along = origin.0 + slot % along;
            let pos_across = origin.1 + slot / along;
            *lane = if pos_along < extent.0 && pos_across < extent.1 {
                Lane::Active(f(pos_along, pos_across))
            } else {
                Lane::Inert
            };
        }

        Staged {
            shape: self.shape,
            origin_across: origin.1,
            scratch: &self.scratch,
        }
    }
}

/// A fully staged group, ready to be committed.
pub struct Staged<'a, T> {
    shape: GroupShape,
    origin_across: usize,
    scratch: &'a [Lane<T>],
}

impl<T: Copy> Staged<'_, T> {
    /// The staged lane at tile position `(a, c)`.
    pub fn lane(&self, a: usize, c: usize) -> Lane<T> {
        self.scratch[a + c * self.shape.along]
    }

    /// Commit the staged lanes into `block`.
    ///
    /// `block` holds the destination rows of this tile's `along` positions,
    /// each `stride` elements wide. Lane `k` commits tile position
    /// `(k / across, k % across)`, reading it from the transposed slot.
    /// Inert lanes are skipped.
    ///
    /// # Returns
    ///
    /// The number of values written.
    pub fn commit(self, block: &mut [T], stride: usize) -> usize {
        let Staged {
            shape,
            origin_across,
            scratch,
        } = self;

        let mut written = 0;
        for k in 0..shape.lanes() {
            let (a, c) = (k / shape.across, k % shape.across);
            if let Lane::Active(value) = scratch[a + c * shape.along] {
                block[a * stride + origin_across + c] = value;
                written += 1;
            }
        }
        written
    }
}

/// Counters reported by a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStats {
    /// Number of groups dispatched.
    pub groups: usize,
    /// Number of lanes across all groups, including inert padding.
    pub lanes: usize,
    /// Number of lanes that wrote to the destination.
    pub committed: usize,
}

/// Evaluate `f` over a grid and store the results transposed.
///
/// The grid spans `extent = (along, across)`. The value for `(a, c)` is
/// written to `dst[c + a * extent.1]`.
///
/// # Arguments
///
/// * `dst` - The destination, `extent.0 * extent.1` elements long.
/// * `extent` - The grid size along and across the scanned axis.
/// * `shape` - The work group shape.
/// * `strategy` - How to schedule the column blocks of groups.
/// * `f` - The per-lane computation.
///
/// # Errors
///
/// Returns an error if the group shape is empty, if `dst` has the wrong
/// length, or if the executor fails.
///
/// # Example
///
/// ```
/// use fluxshear_imgproc::parallel::ExecutionStrategy;
/// use fluxshear_imgproc::workgroup::{dispatch_transposed, GroupShape};
///
/// let mut dst = vec![0usize; 6];
/// let stats = dispatch_transposed(
///     &mut dst,
///     (3, 2),
///     GroupShape::default(),
///     ExecutionStrategy::Serial,
///     |a, c| 10 * a + c,
/// )
/// .unwrap();
///
/// assert_eq!(dst, vec![0, 1, 10, 11, 20, 21]);
/// assert_eq!(stats.committed, 6);
/// ```
pub fn dispatch_transposed<T, F>(
    dst: &mut [T],
    extent: (usize, usize),
    shape: GroupShape,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<DispatchStats, ShearError>
where
    T: Copy + Send,
    F: Fn(usize, usize) -> T + Send + Sync,
{
    shape.validate()?;

    let (n_along, n_across) = extent;
    if dst.len() != n_along * n_across {
        return Err(ShearError::Image(
            fluxshear_image::ImageError::InvalidDataLength(dst.len(), n_along * n_across),
        ));
    }
    if dst.is_empty() {
        return Ok(DispatchStats::default());
    }

    let committed = dst.execute_chunks_with(strategy, shape.along * n_across, |block_idx, block| {
        let mut group = LocalGroup::new(shape);
        let origin_along = block_idx * shape.along;
        let mut written = 0;
        for origin_across in (0..n_across).step_by(shape.across) {
            written += group
                .stage((origin_along, origin_across), extent, &f)
                .commit(block, n_across);
        }
        written
    })?;

    let groups = shape.groups_for(extent);
    Ok(DispatchStats {
        groups,
        lanes: groups * shape.lanes(),
        committed,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn group_shape() {
        let shape = GroupShape::default();
        assert_eq!((shape.along, shape.across), (32, 8));
        assert_eq!(shape.lanes(), 256);
        assert_eq!(shape.groups_for((10, 10)), 2);
        assert_eq!(shape.groups_for((64, 8)), 2);
        assert_eq!(
            GroupShape::new(0, 8).validate(),
            Err(ShearError::InvalidGroupShape(0, 8))
        );
    }

    #[test]
    fn stage_marks_padding_inert() {
        let mut group = LocalGroup::new(GroupShape::new(4, 2));
        let staged = group.stage((2, 1), (5, 2), |a, c| (a, c));
        assert_eq!(staged.lane(0, 0), Lane::Active((2, 1)));
        assert_eq!(staged.lane(2, 0), Lane::Active((4, 1)));
        assert_eq!(staged.lane(3, 0), Lane::Inert);
        assert_eq!(staged.lane(0, 1), Lane::Inert);
    }

    #[test]
    fn commit_transposes_tile() {
        let mut group = LocalGroup::new(GroupShape::new(3, 2));
        let mut block = vec![0usize; 3 * 2];
        let written = group
            .stage((0, 0), (3, 2), |a, c| 10 * a + c)
            .commit(&mut block, 2);
        assert_eq!(written, 6);
        assert_eq!(block, vec![0, 1, 10, 11, 20, 21]);
    }

    #[test]
    fn boundary_write_safety() -> Result<(), ShearError> {
        // a 10x10 grid on 32x8 groups pads to 32x16 lanes
        let calls = AtomicUsize::new(0);
        let mut dst = vec![usize::MAX; 100];
        let stats = dispatch_transposed(
            &mut dst,
            (10, 10),
            GroupShape::default(),
            ExecutionStrategy::Parallel,
            |a, c| {
                calls.fetch_add(1, Ordering::Relaxed);
                1000 * a + c
            },
        )?;

        assert_eq!(stats.groups, 2);
        assert_eq!(stats.lanes, 512);
        assert_eq!(stats.committed, 100);
        assert_eq!(calls.load(Ordering::Relaxed), 100);
        for a in 0..10 {
            for c in 0..10 {
                assert_eq!(dst[c + a * 10], 1000 * a + c);
            }
        }

        Ok(())
    }

    #[test]
    fn strategies_and_shapes_agree() -> Result<(), ShearError> {
        let extent = (37, 13);
        let run = |shape, strategy| -> Result<Vec<usize>, ShearError> {
            let mut dst = vec![0; extent.0 * extent.1];
            dispatch_transposed(&mut dst, extent, shape, strategy, |a, c| a * 100 + c)?;
            Ok(dst)
        };

        let expected = run(GroupShape::default(), ExecutionStrategy::Serial)?;
        for shape in [
            GroupShape::new(1, 1),
            GroupShape::new(5, 3),
            GroupShape::new(64, 16),
        ] {
            for strategy in [
                ExecutionStrategy::Serial,
                ExecutionStrategy::Parallel,
                ExecutionStrategy::Fixed(3),
            ] {
                assert_eq!(run(shape, strategy)?, expected);
            }
        }

        Ok(())
    }

    #[test]
    fn dispatch_rejects_bad_destination() {
        let mut dst = vec![0.0f32; 5];
        let res = dispatch_transposed(
            &mut dst,
            (2, 3),
            GroupShape::default(),
            ExecutionStrategy::Serial,
            |_, _| 1.0,
        );
        assert!(matches!(res, Err(ShearError::Image(_))));

        let mut empty: Vec<f32> = vec![];
        let stats = dispatch_transposed(
            &mut empty,
            (0, 4),
            GroupShape::default(),
            ExecutionStrategy::Serial,
            |_, _| 1.0,
        );
        assert_eq!(stats, Ok(DispatchStats::default()));
    }
}
