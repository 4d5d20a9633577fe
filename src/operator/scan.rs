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

//! `\` (scan) and `⍀` (scan-first).
//!
//! Two implementations are kept side by side: an `O(n)` running-fold
//! fast path used only when the operand is a known-associative scalar
//! function, and an `O(n²)` direct recomputation that re-derives each
//! prefix from the plain definition and is always correct regardless of
//! associativity. [`scan`] picks between them; [`scan_direct`] is also
//! exposed directly so the two can be cross-checked against each other
//! for operands where both are valid.

use crate::error::Result;
use crate::operator::ValueFn2;
use crate::primitive::EvalCtx;
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// `f\B` (or `f⍀B` via `axis`) — prefix-fold `f` across `axis`, right to
/// left within each prefix, one output cell per input cell.
///
/// The running-accumulator recurrence below is only valid when `f` is
/// associative: regrouping a right fold of a growing prefix into
/// `acc[i] = acc[i-1] f B[i]` relies on `(x f y) f z == x f (y f z)`.
/// For a non-associative `f` (`-`, `÷`, ...) this recurrence produces the
/// wrong answer, so callers must pass `associative = true` only for
/// operands known to satisfy it; everything else falls back to
/// [`scan_direct`], which recomputes each prefix from its own definition.
#[tracing::instrument(level = "debug", skip_all)]
pub fn scan(ctx: &mut EvalCtx, f: &ValueFn2, associative: bool, axis: usize, b: &Value) -> Result<Value> {
    if !associative {
        return scan_direct(ctx, f, axis, b);
    }
    let shape3 = b.shape().split3(axis)?;
    let mut grid = vec![crate::cell::Cell::Int(0); (shape3.h * shape3.m * shape3.l) as usize];
    for h in 0..shape3.h {
        for l in 0..shape3.l {
            ctx.check_interrupt()?;
            let mut acc = b.ravel_at(shape3.index(h, 0, l) as usize)?;
            grid[shape3.index(h, 0, l) as usize] = acc.clone();
            for m in 1..shape3.m {
                let cell = b.ravel_at(shape3.index(h, m, l) as usize)?;
                let r = f(ctx, &Value::scalar(cell), &Value::scalar(acc))?;
                acc = r.ravel_at(0)?;
                grid[shape3.index(h, m, l) as usize] = acc.clone();
            }
        }
    }
    let mut builder = ValueBuilder::new(*b.shape());
    for cell in grid {
        builder.push(cell);
    }
    builder.finish()
}

/// `A f\B` (n-wise scan variant used as the reference implementation):
/// recompute every prefix independently from scratch, `O(n²)` total.
/// Used only to cross-check [`scan`] for associative operands.
pub fn scan_direct(ctx: &mut EvalCtx, f: &ValueFn2, axis: usize, b: &Value) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    let mut builder = ValueBuilder::new(*b.shape());
    let mut grid = vec![crate::cell::Cell::Int(0); (shape3.h * shape3.m * shape3.l) as usize];
    for h in 0..shape3.h {
        for l in 0..shape3.l {
            for m in 0..shape3.m {
                ctx.check_interrupt()?;
                let mut acc = b.ravel_at(shape3.index(h, m, l) as usize)?;
                for k in (0..m).rev() {
                    let cell = b.ravel_at(shape3.index(h, k, l) as usize)?;
                    let r = f(ctx, &Value::scalar(cell), &Value::scalar(acc))?;
                    acc = r.ravel_at(0)?;
                }
                grid[shape3.index(h, m, l) as usize] = acc;
            }
        }
    }
    for cell in grid {
        builder.push(cell);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::cell::Cell;
    use crate::config::Config;
    use crate::primitive::scalar::add;

    fn add_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
        crate::primitive::scalar::pervade_dyadic(ctx, a, b, add)
    }

    #[test]
    fn scan_plus_is_prefix_sum() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let r = scan(&mut ctx, &add_fn, true, 0, &v).unwrap();
        let expect = [1, 3, 6, 10];
        for (i, &e) in expect.iter().enumerate() {
            assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(n) if n == e));
        }
    }

    #[test]
    fn fast_and_direct_scan_agree_for_associative_plus() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(5), Cell::Int(1), Cell::Int(9), Cell::Int(2), Cell::Int(7)]);
        let fast = scan(&mut ctx, &add_fn, true, 0, &v).unwrap();
        let direct = scan_direct(&mut ctx, &add_fn, 0, &v).unwrap();
        assert!(fast.equal(&direct, 0.0));
    }

    #[test]
    fn scan_minus_uses_direct_definition_when_marked_non_associative() {
        fn sub_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
            crate::primitive::scalar::pervade_dyadic(ctx, a, b, crate::primitive::scalar::sub)
        }
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let r = scan(&mut ctx, &sub_fn, false, 0, &v).unwrap();
        let expect = [1, -1, 2, -2];
        for (i, &e) in expect.iter().enumerate() {
            assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(n) if n == e));
        }
    }
}
