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

//! `⍤` (rank operator).
//!
//! The operand function is applied to sub-arrays of a requested rank,
//! looping over the remaining "frame" axes; a requested rank greater
//! than the argument's own rank clamps down to the argument's rank
//! rather than erroring.

use crate::error::{ErrorCode, Result};
use crate::operator::ValueFn1;
use crate::primitive::EvalCtx;
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// Clamp a requested sub-array rank to `[0, value_rank]`.
fn clamp_rank(requested: i64, value_rank: usize) -> usize {
    if requested < 0 {
        (value_rank as i64 + requested).max(0) as usize
    } else {
        (requested as usize).min(value_rank)
    }
}

/// `(f⍤k)B` — apply `f` to each rank-`k` cell of `B`, looping over the
/// leading "frame" axes. The frame shape becomes an outer enclosing
/// shape around whatever shape `f` returns for one cell; since cell
/// results may differ from the argument's own cell shape, results are
/// collected as enclosed (pointer) cells over the frame in the general
/// case.
#[tracing::instrument(level = "debug", skip_all)]
pub fn rank_monadic(ctx: &mut EvalCtx, f: &ValueFn1, k: i64, b: &Value) -> Result<Value> {
    let rank = clamp_rank(k, b.rank());
    let frame_rank = b.rank() - rank;
    let frame_axes = &b.shape().axes()[..frame_rank];
    let cell_axes = &b.shape().axes()[frame_rank..];
    let cell_shape = Shape::new(cell_axes)?;
    let cell_volume = cell_shape.volume_usize();
    let frame_shape = Shape::new(frame_axes)?;
    let frame_volume = frame_shape.volume_usize().max(1);

    let mut results = Vec::with_capacity(frame_volume);
    for i in 0..frame_volume {
        ctx.check_interrupt()?;
        let start = i * cell_volume;
        let ravel: Result<Vec<_>> = (0..cell_volume).map(|j| b.ravel_at(start + j)).collect();
        let sub = Value::from_ravel(cell_shape, ravel?)?;
        results.push(crate::cell::Cell::Pointer(f(ctx, &sub)?));
    }
    Value::from_ravel(frame_shape, results)
}

/// `A(f⍤k)B` (or `A(f⍤kA kB)B` with distinct ranks, collapsed here to one
/// `k` applied to both) — dyadic rank operator: apply `f` to
/// correspondingly-framed rank-`k` cells of `A` and `B`. Requires equal
/// frame shapes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn rank_dyadic(
    ctx: &mut EvalCtx,
    f: &crate::operator::ValueFn2,
    k: i64,
    a: &Value,
    b: &Value,
) -> Result<Value> {
    let ra = clamp_rank(k, a.rank());
    let rb = clamp_rank(k, b.rank());
    let fa = a.rank() - ra;
    let fb = b.rank() - rb;
    if a.shape().axes()[..fa] != b.shape().axes()[..fb] {
        return Err(ErrorCode::LengthError);
    }
    let frame_shape = Shape::new(&a.shape().axes()[..fa])?;
    let frame_volume = frame_shape.volume_usize().max(1);
    let cell_shape_a = Shape::new(&a.shape().axes()[fa..])?;
    let cell_shape_b = Shape::new(&b.shape().axes()[fb..])?;
    let va = cell_shape_a.volume_usize();
    let vb = cell_shape_b.volume_usize();

    let mut results = Vec::with_capacity(frame_volume);
    for i in 0..frame_volume {
        ctx.check_interrupt()?;
        let sa = (0..va).map(|j| a.ravel_at(i * va + j)).collect::<Result<Vec<_>>>()?;
        let sb = (0..vb).map(|j| b.ravel_at(i * vb + j)).collect::<Result<Vec<_>>>()?;
        let cell_a = Value::from_ravel(cell_shape_a, sa)?;
        let cell_b = Value::from_ravel(cell_shape_b, sb)?;
        results.push(crate::cell::Cell::Pointer(f(ctx, &cell_a, &cell_b)?));
    }
    let mut builder = ValueBuilder::new(frame_shape);
    for r in results {
        builder.push(r);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::cell::Cell;
    use crate::config::Config;
    use crate::primitive::catenate::ravel;

    #[test]
    fn rank_zero_applies_to_every_scalar() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let id = |_ctx: &mut EvalCtx, b: &Value| ravel(b);
        let r = rank_monadic(&mut ctx, &id, 0, &v).unwrap();
        assert_eq!(r.len(), 3);
        if let Cell::Pointer(inner) = r.ravel_at(0).unwrap() {
            assert!(matches!(inner.ravel_at(0).unwrap(), Cell::Int(1)));
        } else {
            panic!("expected pointer");
        }
    }

    #[test]
    fn requested_rank_above_argument_rank_clamps() {
        assert_eq!(clamp_rank(5, 2), 2);
    }
}
