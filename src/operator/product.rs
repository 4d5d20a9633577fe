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

//! `∘.f` (outer product) and `f.g` (inner product).
//!
//! Outer product's result shape is simply `(⍴A),(⍴B)`; inner product
//! contracts `A`'s last axis against `B`'s first axis the way ordinary
//! matrix product contracts rows against columns, using `g` in place of
//! scalar multiply and `f`'s reduce in place of scalar sum.

use crate::error::{ErrorCode, Result};
use crate::operator::ValueFn2;
use crate::primitive::EvalCtx;
use crate::shape::Shape;
use crate::value::{Value, ValueBuilder};

/// `A∘.f B` — outer product: apply `f` to every pair `(a_i, b_j)`,
/// producing a result of shape `(⍴A),(⍴B)`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn outer_product(ctx: &mut EvalCtx, f: &ValueFn2, a: &Value, b: &Value) -> Result<Value> {
    let mut out_axes: Vec<i64> = a.shape().axes().to_vec();
    out_axes.extend(b.shape().axes().iter().copied());
    let out_shape = Shape::new(&out_axes)?;
    let mut builder = ValueBuilder::new(out_shape);
    for i in 0..a.len().max(1) {
        for j in 0..b.len().max(1) {
            ctx.check_interrupt()?;
            let ca = a.ravel_at(i)?;
            let cb = b.ravel_at(j)?;
            let r = f(ctx, &Value::scalar(ca), &Value::scalar(cb))?;
            if r.len() != 1 {
                return Err(ErrorCode::RankError);
            }
            builder.push(r.ravel_at(0)?);
        }
    }
    builder.finish()
}

/// `A f.g B` — inner product: contract `A`'s last axis against `B`'s
/// first axis, combining pairs with `g` and folding each contraction
/// with `f` (right to left, matching [`crate::operator::reduce::reduce`]).
///
/// # Errors
/// `LengthError` if `A`'s last axis and `B`'s first axis disagree.
#[tracing::instrument(level = "debug", skip_all)]
pub fn inner_product(
    ctx: &mut EvalCtx,
    f: &ValueFn2,
    g: &ValueFn2,
    a: &Value,
    b: &Value,
) -> Result<Value> {
    let contract = a.shape().last_axis();
    if b.shape().first_axis() != contract {
        return Err(ErrorCode::LengthError);
    }
    let a_rows = if a.rank() == 0 { 1 } else { a.len() as i64 / contract.max(1) };
    let b_cols = if b.rank() == 0 { 1 } else { b.len() as i64 / contract.max(1) };

    let mut out_axes: Vec<i64> = if a.rank() == 0 {
        vec![]
    } else {
        a.shape().axes()[..a.rank() - 1].to_vec()
    };
    if b.rank() != 0 {
        out_axes.extend(b.shape().axes()[1..].iter().copied());
    }
    let out_shape = Shape::new(&out_axes)?;

    let mut builder = ValueBuilder::new(out_shape);
    for r in 0..a_rows {
        for c in 0..b_cols {
            ctx.check_interrupt()?;
            if contract == 0 {
                return Err(ErrorCode::DomainError);
            }
            let mut acc = {
                let k = contract - 1;
                let ca = a.ravel_at((r * contract + k) as usize)?;
                let cb = b.ravel_at((k * b_cols + c) as usize)?;
                g(ctx, &Value::scalar(ca), &Value::scalar(cb))?.ravel_at(0)?
            };
            for k in (0..contract - 1).rev() {
                let ca = a.ravel_at((r * contract + k) as usize)?;
                let cb = b.ravel_at((k * b_cols + c) as usize)?;
                let prod = g(ctx, &Value::scalar(ca), &Value::scalar(cb))?.ravel_at(0)?;
                acc = f(ctx, &Value::scalar(prod), &Value::scalar(acc))?.ravel_at(0)?;
            }
            builder.push(acc);
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::cell::Cell;
    use crate::config::Config;
    use crate::primitive::scalar::{add, mul};

    fn add_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
        crate::primitive::scalar::pervade_dyadic(ctx, a, b, add)
    }
    fn mul_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
        crate::primitive::scalar::pervade_dyadic(ctx, a, b, mul)
    }

    #[test]
    fn outer_product_of_vectors_is_a_matrix() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let b = Value::vector([Cell::Int(10), Cell::Int(20), Cell::Int(30)]);
        let r = outer_product(&mut ctx, &mul_fn, &a, &b).unwrap();
        assert_eq!(r.shape().axes(), &[2, 3]);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(10)));
        assert!(matches!(r.ravel_at(4).unwrap(), Cell::Int(40)));
    }

    #[test]
    fn inner_product_is_matrix_multiply_for_vectors() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let b = Value::vector([Cell::Int(4), Cell::Int(5), Cell::Int(6)]);
        let r = inner_product(&mut ctx, &add_fn, &mul_fn, &a, &b).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(32)));
    }
}
