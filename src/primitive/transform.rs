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

//! `⌽`/`⊖` (reverse/rotate, last and first axis) and `⍉` (transpose).
//!
//! Reverse and rotate are both expressed as a permutation of the `M`
//! (middle) index within each `(h, l)` slab of the `(H, M, L)` triple,
//! which is exactly [`Shape3::index`].

use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// `⌽B` — reverse along the last axis. `⊖B` — reverse along the first
/// axis. Both call this with the relevant axis index.
pub fn reverse(b: &Value, axis: usize) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    let mut builder = ValueBuilder::new(*b.shape());
    for h in 0..shape3.h {
        for m in 0..shape3.m {
            for l in 0..shape3.l {
                let src = shape3.index(h, shape3.m - 1 - m, l);
                builder.push(b.ravel_at(src as usize)?);
            }
        }
    }
    builder.finish()
}

/// `A⌽B` — rotate along the last axis. `A⊖B` — rotate along the first
/// axis. `A` is either a scalar rotation count or a vector of per-`(h,l)`
/// counts.
pub fn rotate(a: &Value, b: &Value, axis: usize) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    let counts = rotation_counts(a, shape3.h, shape3.l)?;
    let mut builder = ValueBuilder::new(*b.shape());
    for h in 0..shape3.h {
        for l in 0..shape3.l {
            let n = counts[(h * shape3.l + l) as usize];
            for m in 0..shape3.m {
                let src_m = (m + n).rem_euclid(shape3.m.max(1));
                let src = shape3.index(h, src_m, l);
                builder.push(b.ravel_at(src as usize)?);
            }
        }
    }
    builder.finish()
}

fn rotation_counts(a: &Value, h: i64, l: i64) -> Result<Vec<i64>> {
    let n = (h * l) as usize;
    if a.shape().is_scalar() {
        let c = a.ravel_at(0)?.to_int_tolerant(0.0)?;
        Ok(vec![c; n])
    } else if a.len() == n {
        (0..n)
            .map(|i| a.ravel_at(i).and_then(|c| c.to_int_tolerant(0.0)))
            .collect()
    } else {
        Err(ErrorCode::LengthError)
    }
}

/// `⍉B` — monadic transpose: reverse the axis order.
pub fn transpose_monadic(b: &Value) -> Result<Value> {
    let rank = b.rank();
    if rank <= 1 {
        return Ok(b.clone());
    }
    let perm: Vec<usize> = (0..rank).rev().collect();
    transpose_dyadic_perm(b, &perm)
}

/// `A⍉B` — dyadic transpose: `A` gives, for each axis of `B`, the target
/// axis in the result. Repeated target axes select a diagonal.
pub fn transpose_dyadic(a: &Value, b: &Value, io: i64) -> Result<Value> {
    if a.len() != b.rank() {
        return Err(ErrorCode::LengthError);
    }
    let perm: Result<Vec<usize>> = (0..a.len())
        .map(|i| {
            let n = a.ravel_at(i)?.to_int_tolerant(0.0)? - io;
            usize::try_from(n).map_err(|_| ErrorCode::AxisError)
        })
        .collect();
    transpose_dyadic_perm(b, &perm?)
}

fn transpose_dyadic_perm(b: &Value, perm: &[usize]) -> Result<Value> {
    let out_shape = b.shape().permute(perm)?;
    let in_axes = b.shape().axes();
    let out_axes = out_shape.axes();
    let out_rank = out_shape.rank();

    let mut builder = ValueBuilder::new(out_shape);
    for flat in 0..out_shape.volume_usize() {
        let out_coord = unravel(flat, out_axes);
        // Every source axis maps to perm[source_axis] in the output;
        // invert that to read off the output coordinate for each source
        // axis (repeated targets share the same output coordinate, which
        // is exactly the diagonal selection).
        let mut in_coord = vec![0i64; perm.len()];
        for (src_axis, &tgt_axis) in perm.iter().enumerate() {
            in_coord[src_axis] = out_coord[tgt_axis.min(out_rank.saturating_sub(1))];
        }
        let idx = ravel_index(&in_coord, in_axes);
        builder.push(b.ravel_at(idx)?);
    }
    builder.finish()
}

fn unravel(mut flat: usize, axes: &[i64]) -> Vec<i64> {
    let mut coord = vec![0i64; axes.len()];
    for i in (0..axes.len()).rev() {
        let len = axes[i].max(1) as usize;
        coord[i] = (flat % len) as i64;
        flat /= len;
    }
    coord
}

fn ravel_index(coord: &[i64], axes: &[i64]) -> usize {
    let mut idx = 0i64;
    for (c, len) in coord.iter().zip(axes.iter()) {
        idx = idx * len + c;
    }
    idx as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn reverse_vector() {
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let r = reverse(&v, 0).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(3)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(1)));
    }

    #[test]
    fn rotate_by_one() {
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let a = Value::scalar(Cell::Int(1));
        let r = rotate(&a, &v, 0).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(1)));
    }

    #[test]
    fn transpose_of_matrix_swaps_axes() {
        let shape = Shape::new(&[2, 3]).unwrap();
        let v = Value::from_ravel(
            shape,
            (1..=6).map(|n| Cell::Int(n)).collect(),
        )
        .unwrap();
        let t = transpose_monadic(&v).unwrap();
        assert_eq!(t.shape().axes(), &[3, 2]);
        assert!(matches!(t.ravel_at(0).unwrap(), Cell::Int(1)));
        assert!(matches!(t.ravel_at(1).unwrap(), Cell::Int(4)));
    }

    #[test]
    fn double_transpose_is_identity() {
        let shape = Shape::new(&[2, 3]).unwrap();
        let v = Value::from_ravel(shape, (1..=6).map(Cell::Int).collect()).unwrap();
        let t = transpose_monadic(&transpose_monadic(&v).unwrap()).unwrap();
        assert!(v.equal(&t, 0.0));
    }
}
