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

//! `,` (catenate/ravel), `⍪` (laminate/first-axis catenate), and `⍴`
//! (reshape).
//!
//! Plain catenate, laminate, and ravel are one family distinguished
//! only by axis and valence. Reshape builds the result shape before
//! touching any cell data.

use crate::error::{ErrorCode, Result};
use crate::primitive::EvalCtx;
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// `,B` — ravel: flatten to a vector in row-major order.
pub fn ravel(b: &Value) -> Result<Value> {
    Value::from_ravel(Shape::vector(b.len() as i64), b.ravel_to_vec())
}

/// `A,B` — catenate along the last axis (no explicit axis operand).
/// Vector arguments catenate end to end; higher-rank arguments must agree
/// on every axis but the last.
pub fn catenate(a: &Value, b: &Value) -> Result<Value> {
    let axis = a.rank().max(b.rank()).max(1) - 1;
    catenate_axis(a, b, axis)
}

/// `A⍪B` — catenate along the first axis.
pub fn laminate_first(a: &Value, b: &Value) -> Result<Value> {
    catenate_axis(a, b, 0)
}

/// `A,[X]B` / `A⍪[X]B` — catenate along an explicit axis. A scalar
/// operand broadcasts: its one cell repeats across every position the
/// other operand occupies off the catenation axis, contributing a
/// length of `1` on the axis itself.
pub fn catenate_axis(a: &Value, b: &Value, axis: usize) -> Result<Value> {
    if a.shape().is_scalar() && b.shape().is_scalar() {
        return Value::vector([a.ravel_at(0)?, b.ravel_at(0)?]);
    }
    let rank = if a.shape().is_scalar() {
        b.rank()
    } else if b.shape().is_scalar() {
        a.rank()
    } else {
        if a.rank() != b.rank() {
            return Err(ErrorCode::RankError);
        }
        a.rank()
    };
    if axis >= rank {
        return Err(ErrorCode::AxisError);
    }
    let other_axes = |v: &Value| -> Vec<i64> {
        if v.shape().is_scalar() {
            vec![1; rank]
        } else {
            v.shape().axes().to_vec()
        }
    };
    let axes_a = other_axes(a);
    let axes_b = other_axes(b);
    for i in 0..rank {
        if i != axis && axes_a[i] != axes_b[i] {
            return Err(ErrorCode::LengthError);
        }
    }
    let new_len = axes_a[axis] + axes_b[axis];
    let mut out_axes = axes_a.clone();
    out_axes[axis] = new_len;
    let out_shape = Shape::new(&out_axes)?;

    let h: i64 = out_axes[..axis].iter().product();
    let l: i64 = out_axes[axis + 1..].iter().product();
    let ma = axes_a[axis];
    let mb = axes_b[axis];

    let mut builder = ValueBuilder::new(out_shape);
    for hi in 0..h {
        for mi in 0..ma {
            for li in 0..l {
                let idx = if a.shape().is_scalar() {
                    0
                } else {
                    ((hi * ma + mi) * l + li) as usize
                };
                builder.push(a.ravel_at(idx)?);
            }
        }
        for mi in 0..mb {
            for li in 0..l {
                let idx = if b.shape().is_scalar() {
                    0
                } else {
                    ((hi * mb + mi) * l + li) as usize
                };
                builder.push(b.ravel_at(idx)?);
            }
        }
    }
    builder.finish()
}

/// `⍴B` — the shape of `B`, as a vector value.
pub fn shape_of(b: &Value) -> Value {
    Value::vector(b.shape().axes().iter().map(|&n| crate::cell::Cell::Int(n)))
}

/// `A⍴B` — reshape: lay `B`'s ravel out into the shape described by `A`,
/// cycling `B` (or its prototype, if `B` is empty) to fill.
pub fn reshape(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
    let axes: Result<Vec<i64>> = (0..a.len())
        .map(|i| a.ravel_at(i).and_then(|c| c.to_int_tolerant(ctx.config.ct)))
        .collect();
    let shape = Shape::new(&axes?)?;
    let volume = shape.volume_usize();
    if b.is_empty() && volume > 0 {
        let proto = b.prototype();
        return Value::from_ravel(shape, vec![proto; volume]);
    }
    if b.is_empty() {
        return Value::from_ravel(shape, vec![]);
    }
    let mut ravel = Vec::with_capacity(volume);
    for i in 0..volume {
        ctx.check_interrupt()?;
        ravel.push(b.ravel_at(i % b.len())?);
    }
    Value::from_ravel(shape, ravel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::cell::Cell;
    use crate::config::Config;

    #[test]
    fn ravel_flattens_matrix() {
        let shape = Shape::new(&[2, 2]).unwrap();
        let v = Value::from_ravel(
            shape,
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)],
        )
        .unwrap();
        let r = ravel(&v).unwrap();
        assert_eq!(r.shape().axes(), &[4]);
    }

    #[test]
    fn catenate_vectors_sums_lengths() {
        let a = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let b = Value::vector([Cell::Int(3)]);
        let r = catenate(&a, &b).unwrap();
        assert_eq!(r.shape().axes(), &[3]);
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(3)));
    }

    #[test]
    fn reshape_cycles_short_ravel() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::vector([Cell::Int(2), Cell::Int(3)]);
        let b = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let r = reshape(&mut ctx, &a, &b).unwrap();
        assert_eq!(r.shape().axes(), &[2, 3]);
        assert!(matches!(r.ravel_at(5).unwrap(), Cell::Int(2)));
    }

    #[test]
    fn reshape_fills_with_prototype_when_b_empty() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::vector([Cell::Int(3)]);
        let b = Value::from_ravel(Shape::vector(0), vec![]).unwrap();
        let r = reshape(&mut ctx, &a, &b).unwrap();
        assert_eq!(r.len(), 3);
    }
}
