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

//! `/` (reduce, replicate) and `⌿` (reduce-first, replicate-first).
//!
//! Reduce along the last axis and reduce along axis `0` share one loop
//! parameterized only by which axis produced the `(H, M, L)` triple.
//! N-wise reduce and replicate/expand are the dyadic forms of the same
//! operator family (`A f/B`, `A/B`).

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::operator::ValueFn2;
use crate::primitive::EvalCtx;
use crate::shape::{Shape, Shape3};
use crate::value::{Value, ValueBuilder};

fn apply2(ctx: &mut EvalCtx, f: &ValueFn2, a: Cell, b: Cell) -> Result<Cell> {
    let r = f(ctx, &Value::scalar(a), &Value::scalar(b))?;
    if r.len() != 1 {
        return Err(ErrorCode::RankError);
    }
    r.ravel_at(0)
}

/// `f/B` (or `f⌿B` via `axis`) — fold `f` right-to-left across `axis`,
/// so non-commutative operands (`-/`, `÷/`) give the usual
/// alternating-sum reading.
///
/// # Errors
/// `DomainError` if the folded axis has length zero (no generic identity
/// element is known to a user-supplied operand).
#[tracing::instrument(level = "debug", skip_all)]
pub fn reduce(ctx: &mut EvalCtx, f: &ValueFn2, axis: usize, b: &Value) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    if shape3.m == 0 {
        return Err(ErrorCode::DomainError);
    }
    let mut out_axes: Vec<i64> = b.shape().axes().to_vec();
    if axis < out_axes.len() {
        out_axes.remove(axis);
    }
    let out_shape = Shape::new(&out_axes)?;
    let mut builder = ValueBuilder::new(out_shape);
    for h in 0..shape3.h {
        for l in 0..shape3.l {
            ctx.check_interrupt()?;
            let mut acc = b.ravel_at(shape3.index(h, shape3.m - 1, l) as usize)?;
            for m in (0..shape3.m - 1).rev() {
                let cell = b.ravel_at(shape3.index(h, m, l) as usize)?;
                acc = apply2(ctx, f, cell, acc)?;
            }
            builder.push(acc);
        }
    }
    builder.finish()
}

/// `A f/B` (n-wise reduce) — fold `f` across sliding windows of size `n`
/// along `axis`. `n < 0` windows back to front.
///
/// `|n| == 0` repeats `f`'s identity once per position rather than
/// erroring: since no generic identity is known for a user-supplied `f`,
/// that's the fill cell of `B`. `|n| == ⍴B[axis] + 1` is a valid window
/// one wider than the axis and yields an empty result along `axis`
/// (`out_m` falls out to `0`); only `|n| > ⍴B[axis] + 1` is out of range.
#[tracing::instrument(level = "debug", skip_all)]
pub fn n_wise_reduce(ctx: &mut EvalCtx, f: &ValueFn2, n: i64, axis: usize, b: &Value) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    let window = n.unsigned_abs() as i64;
    if window > shape3.m + 1 {
        return Err(ErrorCode::DomainError);
    }
    if window == 0 {
        return n_wise_identity(b, axis, &shape3);
    }
    let out_m = shape3.m - window + 1;
    let mut out_axes: Vec<i64> = b.shape().axes().to_vec();
    if axis < out_axes.len() {
        out_axes[axis] = out_m;
    }
    let out_shape = Shape::new(&out_axes)?;
    let mut builder = ValueBuilder::new(out_shape);
    for h in 0..shape3.h {
        for start in 0..out_m {
            for l in 0..shape3.l {
                ctx.check_interrupt()?;
                let ms: Vec<i64> = if n >= 0 {
                    (start..start + window).collect()
                } else {
                    (start..start + window).rev().collect()
                };
                let mut acc = b.ravel_at(shape3.index(h, ms[ms.len() - 1], l) as usize)?;
                for &m in ms[..ms.len() - 1].iter().rev() {
                    let cell = b.ravel_at(shape3.index(h, m, l) as usize)?;
                    acc = apply2(ctx, f, cell, acc)?;
                }
                builder.push(acc);
            }
        }
    }
    builder.finish()
}

/// The `|n| == 0` case of [`n_wise_reduce`]: one identity cell per
/// window position, `⍴B[axis] + 1` of them, since a zero-wide window
/// slides into `m + 1` positions along an axis of length `m`.
fn n_wise_identity(b: &Value, axis: usize, shape3: &Shape3) -> Result<Value> {
    let out_m = shape3.m + 1;
    let mut out_axes: Vec<i64> = b.shape().axes().to_vec();
    if axis < out_axes.len() {
        out_axes[axis] = out_m;
    }
    let out_shape = Shape::new(&out_axes)?;
    let fill = b.prototype();
    let mut builder = ValueBuilder::new(out_shape);
    for _ in 0..shape3.h {
        for _ in 0..out_m {
            for _ in 0..shape3.l {
                builder.push(fill.clone());
            }
        }
    }
    builder.finish()
}

/// `A/B` (replicate) — repeat major cell `m` of `B` along `axis`,
/// `A[m]` times. Negative counts insert `A[m]` fill cells instead.
#[tracing::instrument(level = "debug", skip_all)]
pub fn replicate(a: &Value, b: &Value, axis: usize) -> Result<Value> {
    let shape3 = b.shape().split3(axis)?;
    let counts = scalar_extend_counts(a, shape3.m)?;
    let out_m: i64 = counts.iter().map(|c| c.unsigned_abs() as i64).sum();
    let mut out_axes: Vec<i64> = b.shape().axes().to_vec();
    if axis < out_axes.len() {
        out_axes[axis] = out_m;
    }
    let out_shape = Shape::new(&out_axes)?;
    let fill = b.prototype();

    let mut builder = ValueBuilder::new(out_shape);
    for h in 0..shape3.h {
        for l in 0..shape3.l {
            for (m, &count) in counts.iter().enumerate() {
                let cell = if count >= 0 {
                    b.ravel_at(shape3.index(h, m as i64, l) as usize)?
                } else {
                    fill.clone()
                };
                for _ in 0..count.unsigned_abs() {
                    builder.push(cell.clone());
                }
            }
        }
    }
    builder.finish()
}

fn scalar_extend_counts(a: &Value, m: i64) -> Result<Vec<i64>> {
    if a.shape().is_scalar() {
        let c = a.ravel_at(0)?.to_int_tolerant(0.0)?;
        Ok(vec![c; m as usize])
    } else if a.len() as i64 == m {
        (0..a.len()).map(|i| a.ravel_at(i)?.to_int_tolerant(0.0)).collect()
    } else {
        Err(ErrorCode::LengthError)
    }
}

/// `A\B` (expand) — the inverse layout operation: `A` is a vector of
/// counts, one output position per entry. A positive entry consumes the
/// next major cell of `B`; a zero entry inserts a single fill cell (the
/// ordinary boolean `0 1`-mask usage); a negative entry inserts `|A[i]|`
/// fill cells without consuming `B` (the extended multi-fill form).
#[tracing::instrument(level = "debug", skip_all)]
pub fn expand(a: &Value, b: &Value, axis: usize) -> Result<Value> {
    let counts: Vec<i64> = (0..a.len())
        .map(|i| a.ravel_at(i)?.to_int_tolerant(0.0))
        .collect::<Result<_>>()?;
    let consumed: i64 = counts.iter().filter(|&&c| c > 0).count() as i64;
    let b_m = if b.rank() == 0 { 1 } else { b.shape().axis(axis)? };
    if consumed != b_m {
        return Err(ErrorCode::LengthError);
    }
    let l: i64 = if b.rank() == 0 {
        1
    } else {
        b.shape().split3(axis)?.l
    };
    let h: i64 = if b.rank() == 0 {
        1
    } else {
        b.shape().split3(axis)?.h
    };
    // A zero entry occupies one output slot (a single fill); only a
    // negative entry's magnitude expands to more than one.
    let out_m: i64 = counts.iter().map(|&c| if c < 0 { c.unsigned_abs() as i64 } else { 1 }).sum();
    let mut out_axes: Vec<i64> = if b.rank() == 0 { vec![1] } else { b.shape().axes().to_vec() };
    if axis < out_axes.len() {
        out_axes[axis] = out_m;
    }
    let out_shape = Shape::new(&out_axes)?;
    let fill = b.prototype();

    let shape3_b = if b.rank() == 0 {
        crate::shape::Shape3 { h: 1, m: 1, l: 1 }
    } else {
        b.shape().split3(axis)?
    };
    let mut builder = ValueBuilder::new(out_shape);
    for hh in 0..h {
        let mut src_m = 0i64;
        for &c in counts.iter() {
            let fills = if c < 0 { c.unsigned_abs() as i64 } else { 1 };
            for _ in 0..fills {
                for lv in 0..l {
                    if c > 0 {
                        let idx = if b.rank() == 0 {
                            0
                        } else {
                            shape3_b.index(hh, src_m, lv) as usize
                        };
                        builder.push(b.ravel_at(idx)?);
                    } else {
                        builder.push(fill.clone());
                    }
                }
            }
            if c > 0 {
                src_m += 1;
            }
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::config::Config;
    use crate::primitive::scalar::add;

    fn add_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
        crate::primitive::scalar::pervade_dyadic(ctx, a, b, add)
    }

    #[test]
    fn reduce_plus_of_iota_matches_gauss_sum() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector((1..=10).map(Cell::Int));
        let r = reduce(&mut ctx, &add_fn, 0, &v).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(55)));
    }

    #[test]
    fn replicate_repeats_by_count() {
        let a = Value::vector([Cell::Int(2), Cell::Int(0), Cell::Int(1)]);
        let b = Value::vector([Cell::Int(10), Cell::Int(20), Cell::Int(30)]);
        let r = replicate(&a, &b, 0).unwrap();
        assert_eq!(r.len(), 3);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(10)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(30)));
    }

    #[test]
    fn n_wise_reduce_sums_adjacent_pairs() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let r = n_wise_reduce(&mut ctx, &add_fn, 2, 0, &v).unwrap();
        assert_eq!(r.len(), 3);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(3)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(7)));
    }

    #[test]
    fn n_wise_reduce_zero_window_repeats_identity() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let r = n_wise_reduce(&mut ctx, &add_fn, 0, 0, &v).unwrap();
        assert_eq!(r.len(), 4);
        for i in 0..4 {
            assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(0)));
        }
    }

    #[test]
    fn n_wise_reduce_window_one_past_axis_length_is_empty() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let r = n_wise_reduce(&mut ctx, &add_fn, 4, 0, &v).unwrap();
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn n_wise_reduce_window_past_axis_length_plus_one_errors() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        assert_eq!(
            n_wise_reduce(&mut ctx, &add_fn, 5, 0, &v).unwrap_err(),
            ErrorCode::DomainError
        );
    }

    #[test]
    fn expand_inserts_one_fill_per_zero_entry() {
        // 1 1 0 1 \ 'ABC' -> 'AB C' (a zero entry is a single-slot fill,
        // not a zero-width gap).
        let a = Value::vector([Cell::Int(1), Cell::Int(1), Cell::Int(0), Cell::Int(1)]);
        let b = Value::from_str("ABC");
        let r = expand(&a, &b, 0).unwrap();
        assert_eq!(r.len(), 4);
        assert_eq!(r.to_rust_string().unwrap(), "AB C");
    }

    #[test]
    fn expand_negative_entry_inserts_multiple_fills() {
        // 1 ¯2 1 \ 'AB' -> 'A  B' (three total fills from the one negative
        // entry, not one).
        let a = Value::vector([Cell::Int(1), Cell::Int(-2), Cell::Int(1)]);
        let b = Value::from_str("AB");
        let r = expand(&a, &b, 0).unwrap();
        assert_eq!(r.len(), 4);
        assert_eq!(r.to_rust_string().unwrap(), "A  B");
    }
}
