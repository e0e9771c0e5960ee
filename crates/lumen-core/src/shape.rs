use smallvec::SmallVec;
use std::fmt;

/// Tensor shape with stack-allocated storage for ≤4 dimensions.
///
/// The kernel generators only ever see rank 0-4, so dims live inline and
/// cloning a shape never touches the heap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: SmallVec<[usize; 4]>,
}

impl Shape {
    /// Create a new shape from dimensions.
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: SmallVec::from_slice(dims),
        }
    }

    /// Scalar shape (0 dimensions).
    pub fn scalar() -> Self {
        Self {
            dims: SmallVec::new(),
        }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        if self.dims.is_empty() {
            1 // scalar
        } else {
            self.dims.iter().product()
        }
    }

    /// Get dimension sizes as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Get size of a specific dimension.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Whether this is a scalar (0-dimensional).
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Left-pad with size-1 dimensions up to `rank`.
    ///
    /// Returns `self` unchanged when the rank already matches; panics if the
    /// shape is wider than the requested rank.
    pub fn padded_to(&self, rank: usize) -> Shape {
        assert!(
            self.ndim() <= rank,
            "cannot pad rank-{} shape to rank {rank}",
            self.ndim()
        );
        let mut dims = SmallVec::from_elem(1usize, rank - self.ndim());
        dims.extend_from_slice(&self.dims);
        Shape { dims }
    }

    /// Compute default strides for a contiguous row-major layout.
    pub fn contiguous_strides(&self) -> SmallVec<[usize; 4]> {
        let ndim = self.dims.len();
        if ndim == 0 {
            return SmallVec::new();
        }
        let mut strides = SmallVec::from_elem(0usize, ndim);
        strides[ndim - 1] = 1;
        for i in (0..ndim - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Attempt to broadcast this shape with another.
    /// Returns the broadcasted shape or None if incompatible.
    pub fn broadcast_with(&self, other: &Shape) -> Option<Shape> {
        let max_ndim = self.ndim().max(other.ndim());
        let mut result = SmallVec::with_capacity(max_ndim);

        for i in 0..max_ndim {
            let a = if i < self.ndim() {
                self.dims[self.ndim() - 1 - i]
            } else {
                1
            };
            let b = if i < other.ndim() {
                other.dims[other.ndim() - 1 - i]
            } else {
                1
            };

            if a == b {
                result.push(a);
            } else if a == 1 {
                result.push(b);
            } else if b == 1 {
                result.push(a);
            } else {
                return None;
            }
        }

        result.reverse();
        Some(Shape { dims: result })
    }

    /// Read strides for this operand when broadcast against `out`.
    ///
    /// Dimensions are aligned to the right of `out`; axes this shape does
    /// not have, or has with extent 1 where `out` is wider, get stride 0 so
    /// a flat-index walk re-reads the same element. Returns `None` when the
    /// shapes are not broadcast-compatible.
    pub fn broadcast_strides(&self, out: &Shape) -> Option<SmallVec<[usize; 4]>> {
        if self.ndim() > out.ndim() {
            return None;
        }
        let own = self.contiguous_strides();
        let offset = out.ndim() - self.ndim();
        let mut strides = SmallVec::from_elem(0usize, out.ndim());
        for i in 0..self.ndim() {
            let d = self.dims[i];
            let out_d = out.dims[offset + i];
            if d == out_d {
                strides[offset + i] = own[i];
            } else if d != 1 {
                return None;
            }
        }
        Some(strides)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.dims.as_slice())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape {
            dims: SmallVec::from_vec(dims),
        }
    }
}

macro_rules! impl_shape_from_array {
    ($($n:expr),*) => {
        $(
            impl From<[usize; $n]> for Shape {
                fn from(dims: [usize; $n]) -> Self {
                    Shape::new(&dims)
                }
            }
        )*
    };
}

impl_shape_from_array!(0, 1, 2, 3, 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.numel(), 1);
        assert!(s.is_scalar());
    }

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(&[2, 3, 4]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 24);
        assert_eq!(s.dim(0), Some(2));
        assert_eq!(s.dim(2), Some(4));
        assert_eq!(s.dim(3), None);
    }

    #[test]
    fn test_padded_to() {
        let s = Shape::new(&[10, 10]);
        assert_eq!(s.padded_to(4).dims(), &[1, 1, 10, 10]);
        assert_eq!(s.padded_to(2).dims(), &[10, 10]);
    }

    #[test]
    fn test_contiguous_strides() {
        let s = Shape::new(&[2, 3, 4]);
        assert_eq!(s.contiguous_strides().as_slice(), &[12, 4, 1]);
        assert!(Shape::scalar().contiguous_strides().is_empty());
    }

    #[test]
    fn test_broadcast() {
        let a = Shape::new(&[3, 1]);
        let b = Shape::new(&[1, 4]);
        let c = a.broadcast_with(&b).unwrap();
        assert_eq!(c.dims(), &[3, 4]);

        let a = Shape::new(&[2, 3]);
        let b = Shape::new(&[3]);
        let c = a.broadcast_with(&b).unwrap();
        assert_eq!(c.dims(), &[2, 3]);

        let a = Shape::new(&[2, 3]);
        let b = Shape::new(&[4, 3]);
        assert!(a.broadcast_with(&b).is_none());
    }

    #[test]
    fn test_broadcast_strides() {
        let out = Shape::new(&[2, 3, 4]);

        // Full-width operand keeps its contiguous strides.
        let a = Shape::new(&[2, 3, 4]);
        assert_eq!(a.broadcast_strides(&out).unwrap().as_slice(), &[12, 4, 1]);

        // Missing leading axes and size-1 axes read with stride 0.
        let b = Shape::new(&[4]);
        assert_eq!(b.broadcast_strides(&out).unwrap().as_slice(), &[0, 0, 1]);

        let c = Shape::new(&[3, 1]);
        assert_eq!(c.broadcast_strides(&out).unwrap().as_slice(), &[0, 1, 0]);

        let bad = Shape::new(&[5]);
        assert!(bad.broadcast_strides(&out).is_none());
    }

    #[test]
    fn test_from_array() {
        let s: Shape = [2, 3].into();
        assert_eq!(s.dims(), &[2, 3]);

        let s: Shape = [1, 2, 3, 4].into();
        assert_eq!(s.numel(), 24);
    }
}
