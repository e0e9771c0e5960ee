//! Dispatch geometry: workgroup sizing, group-count math and tile-fit
//! analysis.
//!
//! All functions here are pure shape arithmetic; nothing touches a device.

use lumen_core::Shape;
use smallvec::SmallVec;

/// Threads per workgroup along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkgroupSize {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl WorkgroupSize {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total threads in one group.
    pub fn total(&self) -> u32 {
        self.x * self.y * self.z
    }
}

/// Number of workgroups launched along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Which output-shape axes each dispatch axis covers.
///
/// Matmul maps columns to x, rows to y and batch to z; elementwise kernels
/// flatten every axis onto x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchLayout {
    pub x: SmallVec<[usize; 4]>,
    pub y: SmallVec<[usize; 4]>,
    pub z: SmallVec<[usize; 4]>,
}

impl DispatchLayout {
    /// All `rank` output axes flattened onto dispatch axis x.
    pub fn flatten(rank: usize) -> Self {
        Self {
            x: (0..rank).collect(),
            y: SmallVec::new(),
            z: SmallVec::new(),
        }
    }

    /// Layout for a batched `[batch, rows, cols]` matmul output.
    pub fn matmul() -> Self {
        Self {
            x: SmallVec::from_slice(&[2]),
            y: SmallVec::from_slice(&[1]),
            z: SmallVec::from_slice(&[0]),
        }
    }
}

fn div_ceil(n: usize, d: usize) -> u32 {
    ((n + d - 1) / d) as u32
}

fn axis_elems(axes: &[usize], shape: &Shape) -> usize {
    axes.iter().map(|&a| shape.dim(a).unwrap_or(1)).product()
}

/// Workgroup counts for `out_shape` under `layout`.
///
/// Per dispatch axis: `ceil(prod(mapped dims) / (group extent *
/// work_per_thread))`. Axes with no mapped dims dispatch one group.
/// Zero-sized shapes are a caller contract violation.
pub fn compute_dispatch(
    layout: &DispatchLayout,
    out_shape: &Shape,
    wg: WorkgroupSize,
    work_per_thread: [usize; 3],
) -> Dispatch {
    debug_assert!(out_shape.numel() > 0, "cannot dispatch a zero-sized shape");
    Dispatch {
        x: div_ceil(
            axis_elems(&layout.x, out_shape),
            wg.x as usize * work_per_thread[0],
        ),
        y: div_ceil(
            axis_elems(&layout.y, out_shape),
            wg.y as usize * work_per_thread[1],
        ),
        z: div_ceil(
            axis_elems(&layout.z, out_shape),
            wg.z as usize * work_per_thread[2],
        ),
    }
}

/// Pick a matmul workgroup size from the output extents.
///
/// Degenerate outputs collapse the group onto the surviving axis; otherwise
/// a square 8x8 group balances row and column reuse of the shared tiles.
/// Never exceeds 256 threads, the portable device floor.
pub fn workgroup_size_for_matmul(outer: usize, _inner: usize, other_outer: usize) -> WorkgroupSize {
    if outer == 1 {
        WorkgroupSize::new(32, 1, 1)
    } else if other_outer == 1 {
        WorkgroupSize::new(1, 32, 1)
    } else {
        WorkgroupSize::new(8, 8, 1)
    }
}

/// Whether every tile dim divides the matching shape dim.
///
/// An even fit lets the generated reader skip its bounds branch; tiles
/// never step past the operand.
pub fn tiles_fit_evenly(tile: &[usize], dims: &[usize]) -> bool {
    debug_assert_eq!(tile.len(), dims.len());
    tile.iter().zip(dims).all(|(t, d)| d % t == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_layout() {
        let l = DispatchLayout::flatten(3);
        assert_eq!(l.x.as_slice(), &[0, 1, 2]);
        assert!(l.y.is_empty());
        assert!(l.z.is_empty());
    }

    #[test]
    fn test_dispatch_matmul_layout() {
        // 17 rows over 16-thread y groups, 33 cols over 16*4 elems per group.
        let out = Shape::new(&[1, 17, 33]);
        let d = compute_dispatch(
            &DispatchLayout::matmul(),
            &out,
            WorkgroupSize::new(16, 16, 1),
            [4, 1, 1],
        );
        assert_eq!(d.x, 1);
        assert_eq!(d.y, 2);
        assert_eq!(d.z, 1);
    }

    #[test]
    fn test_dispatch_flattened() {
        let out = Shape::new(&[2, 3, 100]);
        let d = compute_dispatch(
            &DispatchLayout::flatten(3),
            &out,
            WorkgroupSize::new(256, 1, 1),
            [1, 1, 1],
        );
        assert_eq!(d.x, 3); // ceil(600 / 256)
        assert_eq!(d.y, 1);
        assert_eq!(d.z, 1);
    }

    #[test]
    fn test_workgroup_size_for_matmul() {
        assert_eq!(
            workgroup_size_for_matmul(128, 64, 128),
            WorkgroupSize::new(8, 8, 1)
        );
        assert_eq!(
            workgroup_size_for_matmul(1, 64, 128),
            WorkgroupSize::new(32, 1, 1)
        );
        assert_eq!(
            workgroup_size_for_matmul(128, 64, 1),
            WorkgroupSize::new(1, 32, 1)
        );
        assert!(workgroup_size_for_matmul(7, 3, 9).total() <= 256);
    }

    #[test]
    fn test_tiles_fit_evenly() {
        assert!(tiles_fit_evenly(&[32, 32], &[64, 128]));
        assert!(!tiles_fit_evenly(&[32, 32], &[64, 100]));
        assert!(tiles_fit_evenly(&[], &[]));
    }
}
