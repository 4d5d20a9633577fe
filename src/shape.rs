//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

//! Array shapes and the `(H, M, L)` triple every non-scalar primitive
//! loops over.

use crate::error::{ErrorCode, Result};

/// Maximum array rank.
pub const MAX_RANK: usize = 8;

/// An ordered sequence of up to [`MAX_RANK`] non-negative axis lengths.
///
/// Stored as a fixed-size array rather than a `Vec` — at `MAX_RANK == 8`
/// a heap allocation per array would dwarf the cost of the shape itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    axes: [i64; MAX_RANK],
    rank: u8,
}

impl Shape {
    /// The rank-0 (scalar) shape.
    pub const SCALAR: Shape = Shape {
        axes: [0; MAX_RANK],
        rank: 0,
    };

    /// Build a shape from a slice of axis lengths.
    ///
    /// # Errors
    /// `RankError` if `axes.len() > MAX_RANK`. `DomainError` if any axis
    /// is negative.
    pub fn new(axes: &[i64]) -> Result<Self> {
        if axes.len() > MAX_RANK {
            return Err(ErrorCode::RankError);
        }
        if axes.iter().any(|&a| a < 0) {
            return Err(ErrorCode::DomainError);
        }
        let mut a = [0i64; MAX_RANK];
        a[..axes.len()].copy_from_slice(axes);
        Ok(Shape {
            axes: a,
            rank: axes.len() as u8,
        })
    }

    /// A vector shape of the given length.
    pub fn vector(len: i64) -> Self {
        Shape {
            axes: {
                let mut a = [0i64; MAX_RANK];
                a[0] = len;
                a
            },
            rank: 1,
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    /// The axis lengths.
    pub fn axes(&self) -> &[i64] {
        &self.axes[..self.rank as usize]
    }

    /// Product of all axes; `1` for a rank-0 (scalar) shape.
    ///
    /// # Errors
    /// `DomainError` if the product overflows `i64`, per the invariant
    /// that the volume fits in a signed 64-bit integer.
    pub fn volume(&self) -> Result<i64> {
        self.axes()
            .iter()
            .try_fold(1i64, |acc, &a| acc.checked_mul(a))
            .ok_or(ErrorCode::DomainError)
    }

    /// Volume as `usize`, for indexing the ravel. Panics only if `volume()`
    /// would itself error (callers are expected to have validated the
    /// shape already); used pervasively where a `Result` would be noise.
    pub fn volume_usize(&self) -> usize {
        self.volume().unwrap_or(0).max(0) as usize
    }

    /// The last axis length, or `1` for a scalar (an empty product).
    pub fn last_axis(&self) -> i64 {
        if self.rank == 0 {
            1
        } else {
            self.axes[self.rank as usize - 1]
        }
    }

    /// The first axis length, or `1` for a scalar.
    pub fn first_axis(&self) -> i64 {
        if self.rank == 0 {
            1
        } else {
            self.axes[0]
        }
    }

    /// Axis length at `idx`.
    ///
    /// # Errors
    /// `AxisError` if `idx >= rank()`.
    pub fn axis(&self, idx: usize) -> Result<i64> {
        self.axes().get(idx).copied().ok_or(ErrorCode::AxisError)
    }

    /// Shape with `idx` removed, shifting later axes down.
    ///
    /// # Errors
    /// `AxisError` if `idx >= rank()`.
    pub fn drop_axis(&self, idx: usize) -> Result<Shape> {
        let axes = self.axes();
        if idx >= axes.len() {
            return Err(ErrorCode::AxisError);
        }
        let mut v: Vec<i64> = axes.to_vec();
        v.remove(idx);
        Shape::new(&v)
    }

    /// Shape with a new axis of length `len` inserted before `idx`.
    ///
    /// # Errors
    /// `AxisError` if `idx > rank()`. `RankError` if the result would
    /// exceed [`MAX_RANK`].
    pub fn add_axis(&self, idx: usize, len: i64) -> Result<Shape> {
        let axes = self.axes();
        if idx > axes.len() {
            return Err(ErrorCode::AxisError);
        }
        let mut v: Vec<i64> = axes.to_vec();
        v.insert(idx, len);
        Shape::new(&v)
    }

    /// Split the shape into `Shape3(H, M, L)` centred on `axis`: `H` is the
    /// product of axes before `axis`, `M` is the length of `axis` itself,
    /// `L` is the product of axes after `axis`. Every non-scalar primitive
    /// expresses its loop as this triple.
    ///
    /// # Errors
    /// `AxisError` if `axis >= rank()` for a non-scalar shape.
    pub fn split3(&self, axis: usize) -> Result<Shape3> {
        if self.rank == 0 {
            return Ok(Shape3 { h: 1, m: 1, l: 1 });
        }
        let a = self.axes();
        if axis >= a.len() {
            return Err(ErrorCode::AxisError);
        }
        let h: i64 = a[..axis].iter().product();
        let m = a[axis];
        let l: i64 = a[axis + 1..].iter().product();
        Ok(Shape3 { h, m, l })
    }

    /// Permute axes according to `perm` (a permutation of `0..rank()`,
    /// possibly with repeats when the primitive requests a diagonal).
    ///
    /// # Errors
    /// `LengthError` if `perm.len() != rank()`. `AxisError` if any index
    /// is out of range.
    pub fn permute(&self, perm: &[usize]) -> Result<Shape> {
        if perm.len() != self.rank() {
            return Err(ErrorCode::LengthError);
        }
        let axes = self.axes();
        let mut out = vec![i64::MAX; *perm.iter().max().unwrap_or(&0) + 1];
        for (from, &to) in perm.iter().enumerate() {
            if to >= out.len() {
                return Err(ErrorCode::AxisError);
            }
            let len = axes.get(from).copied().ok_or(ErrorCode::AxisError)?;
            // Repeated target axes (diagonals) must agree in length.
            if out[to] != i64::MAX && out[to] != len {
                return Err(ErrorCode::LengthError);
            }
            out[to] = len;
        }
        if out.iter().any(|&v| v == i64::MAX) {
            return Err(ErrorCode::AxisError);
        }
        Shape::new(&out)
    }

    /// The inverse permutation of `perm`, i.e. `inv[perm[i]] == i`.
    ///
    /// # Errors
    /// `DomainError` if `perm` is not a bijection on `0..perm.len()`.
    pub fn inverse_permutation(perm: &[usize]) -> Result<Vec<usize>> {
        let n = perm.len();
        let mut inv = vec![usize::MAX; n];
        for (i, &p) in perm.iter().enumerate() {
            if p >= n || inv[p] != usize::MAX {
                return Err(ErrorCode::DomainError);
            }
            inv[p] = i;
        }
        Ok(inv)
    }

    /// Equality is element-wise; an empty shape means scalar.
    pub fn is_scalar(&self) -> bool {
        self.rank == 0
    }
}

/// The `(H, M, L)` triple a non-scalar primitive loops over, centred on one
/// axis. `h` ranges over axes before the chosen axis, `m` over the chosen
/// axis itself, `l` over axes after it. Unifies first-axis (`⌿`, `⍪`,
/// `⊖`) and last-axis (`/`, `,`, `⌽`) primitive variants: both loop over
/// the same `Shape3`, differing only in which axis produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape3 {
    pub h: i64,
    pub m: i64,
    pub l: i64,
}

impl Shape3 {
    /// Flat index of ravel cell `(h, m, l)` in a `Shape3`-described array.
    pub fn index(&self, h: i64, m: i64, l: i64) -> i64 {
        (h * self.m + m) * self.l + l
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_of_scalar_is_one() {
        assert_eq!(Shape::SCALAR.volume().unwrap(), 1);
    }

    #[test]
    fn split3_matches_shape() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        let t = s.split3(1).unwrap();
        assert_eq!(t, Shape3 { h: 2, m: 3, l: 4 });
    }

    #[test]
    fn drop_then_add_axis_round_trips_lengths() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        let d = s.drop_axis(1).unwrap();
        assert_eq!(d.axes(), &[2, 4]);
        let a = d.add_axis(1, 3).unwrap();
        assert_eq!(a.axes(), s.axes());
    }

    #[test]
    fn rank_error_above_max_rank() {
        let axes = [1i64; MAX_RANK + 1];
        assert_eq!(Shape::new(&axes), Err(ErrorCode::RankError));
    }

    #[test]
    fn permute_then_inverse_is_identity_shape() {
        let s = Shape::new(&[2, 3, 5]).unwrap();
        let perm = [2usize, 0, 1];
        let permuted = s.permute(&perm).unwrap();
        let inv = Shape::inverse_permutation(&perm).unwrap();
        let restored = permuted.permute(&inv).unwrap();
        assert_eq!(restored.axes(), s.axes());
    }
}
