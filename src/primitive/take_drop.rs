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

//! `↑` (take) and `↓` (drop).
//!
//! Both primitives walk the same per-axis `(count, from_start)` pairs
//! derived from the left argument, take filling with the right
//! argument's prototype past its bounds, drop never filling.

use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// Decode the left-argument vector into one signed count per axis of `b`,
/// scalar-extending a single count across every axis.
fn per_axis_counts(a: &Value, rank: usize) -> Result<Vec<i64>> {
    if a.shape().is_scalar() {
        let n = a.ravel_at(0)?.to_int_tolerant(0.0)?;
        return Ok(vec![n; rank.max(1)]);
    }
    if a.len() != rank {
        return Err(ErrorCode::LengthError);
    }
    (0..a.len())
        .map(|i| a.ravel_at(i).and_then(|c| c.to_int_tolerant(0.0)))
        .collect()
}

/// `A↑B` — take. Negative counts take from the end of the axis.
pub fn take(a: &Value, b: &Value) -> Result<Value> {
    let rank = b.rank().max(1);
    let counts = per_axis_counts(a, rank)?;
    let in_axes: Vec<i64> = if b.shape().is_scalar() {
        vec![1; rank]
    } else {
        b.shape().axes().to_vec()
    };
    let out_axes: Vec<i64> = counts.iter().map(|c| c.abs()).collect();
    let out_shape = Shape::new(&out_axes)?;
    let fill = b.prototype();

    let mut builder = ValueBuilder::new(out_shape);
    for flat in 0..out_shape.volume_usize() {
        let coord = unravel(flat, &out_axes);
        let mut in_bounds = true;
        let mut src_coord = Vec::with_capacity(rank);
        for (axis, &c) in coord.iter().enumerate() {
            let n = counts[axis];
            let len = in_axes[axis];
            let src = if n >= 0 { c } else { len - n.abs() + c };
            if src < 0 || src >= len {
                in_bounds = false;
                src_coord.push(0);
            } else {
                src_coord.push(src);
            }
        }
        if in_bounds {
            let idx = ravel_index(&src_coord, &in_axes);
            builder.push(if b.shape().is_scalar() {
                b.ravel_at(0)?
            } else {
                b.ravel_at(idx)?
            });
        } else {
            builder.push(fill.clone());
        }
    }
    builder.finish()
}

/// `A↓B` — drop. Negative counts drop from the end of the axis.
pub fn drop(a: &Value, b: &Value) -> Result<Value> {
    let rank = b.rank().max(1);
    let counts = per_axis_counts(a, rank)?;
    let in_axes: Vec<i64> = if b.shape().is_scalar() {
        vec![1; rank]
    } else {
        b.shape().axes().to_vec()
    };
    let out_axes: Vec<i64> = in_axes
        .iter()
        .zip(counts.iter())
        .map(|(&len, &n)| (len - n.abs()).max(0))
        .collect();
    let out_shape = Shape::new(&out_axes)?;

    let mut builder = ValueBuilder::new(out_shape);
    for flat in 0..out_shape.volume_usize() {
        let coord = unravel(flat, &out_axes);
        let mut src_coord = Vec::with_capacity(rank);
        for (axis, &c) in coord.iter().enumerate() {
            let n = counts[axis];
            let offset = if n >= 0 { n } else { 0 };
            src_coord.push(c + offset);
        }
        let idx = ravel_index(&src_coord, &in_axes);
        builder.push(if b.shape().is_scalar() {
            b.ravel_at(0)?
        } else {
            b.ravel_at(idx)?
        });
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
    fn take_fills_past_bounds() {
        let b = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let a = Value::scalar(Cell::Int(4));
        let r = take(&a, &b).unwrap();
        assert_eq!(r.len(), 4);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(1)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(0)));
    }

    #[test]
    fn negative_take_reads_from_the_end() {
        let b = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let a = Value::scalar(Cell::Int(-2));
        let r = take(&a, &b).unwrap();
        assert_eq!(r.len(), 2);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
        assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(3)));
    }

    #[test]
    fn drop_shortens_from_the_front() {
        let b = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let a = Value::scalar(Cell::Int(1));
        let r = drop(&a, &b).unwrap();
        assert_eq!(r.len(), 2);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
    }
}
