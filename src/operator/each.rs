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

//! `¨` (each) and `⍨` (commute/self).
//!
//! Each maps the operand function cell-by-cell, descending into
//! enclosed (pointer) cells and re-enclosing the result; commute is a
//! pure argument-order transform with no cell iteration of its own.

use crate::cell::Cell;
use crate::error::Result;
use crate::operator::{ValueFn1, ValueFn2};
use crate::primitive::EvalCtx;
use crate::value::Value;

/// `f¨B` — apply `f` to each cell of `B` independently. A pointer cell
/// is disclosed before applying `f` and the result re-enclosed; a simple
/// cell is wrapped as a scalar.
#[tracing::instrument(level = "debug", skip_all)]
pub fn each_monadic(ctx: &mut EvalCtx, f: &ValueFn1, b: &Value) -> Result<Value> {
    let mut out = Vec::with_capacity(b.len());
    for i in 0..b.len() {
        ctx.check_interrupt()?;
        let cell = b.ravel_at(i)?;
        out.push(apply_one(ctx, f, cell)?);
    }
    Value::from_ravel(*b.shape(), out)
}

fn apply_one(ctx: &mut EvalCtx, f: &ValueFn1, cell: Cell) -> Result<Cell> {
    match cell {
        Cell::Pointer(v) => {
            let r = f(ctx, &v)?;
            Ok(Cell::Pointer(r))
        }
        other => {
            let r = f(ctx, &Value::scalar(other))?;
            Ok(if r.len() == 1 {
                r.ravel_at(0)?
            } else {
                Cell::Pointer(r)
            })
        }
    }
}

/// `A f¨B` — each, dyadic: pairs cells of `A` and `B` with scalar
/// extension, applying `f` to each pair.
#[tracing::instrument(level = "debug", skip_all)]
pub fn each_dyadic(ctx: &mut EvalCtx, f: &ValueFn2, a: &Value, b: &Value) -> Result<Value> {
    let (shape, len) = if a.shape().is_scalar() {
        (*b.shape(), b.len())
    } else {
        (*a.shape(), a.len())
    };
    if !a.shape().is_scalar() && !b.shape().is_scalar() && a.shape() != b.shape() {
        return Err(crate::error::ErrorCode::LengthError);
    }
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        ctx.check_interrupt()?;
        let ca = a.ravel_at(if a.shape().is_scalar() { 0 } else { i })?;
        let cb = b.ravel_at(if b.shape().is_scalar() { 0 } else { i })?;
        out.push(apply_pair(ctx, f, ca, cb)?);
    }
    Value::from_ravel(shape, out)
}

fn apply_pair(ctx: &mut EvalCtx, f: &ValueFn2, a: Cell, b: Cell) -> Result<Cell> {
    let (va, vb) = match (&a, &b) {
        (Cell::Pointer(va), Cell::Pointer(vb)) => (va.clone(), vb.clone()),
        (Cell::Pointer(va), _) => (va.clone(), Value::scalar(b.clone())),
        (_, Cell::Pointer(vb)) => (Value::scalar(a.clone()), vb.clone()),
        _ => (Value::scalar(a.clone()), Value::scalar(b.clone())),
    };
    let enclosing = matches!(a, Cell::Pointer(_)) || matches!(b, Cell::Pointer(_));
    let r = f(ctx, &va, &vb)?;
    if enclosing {
        Ok(Cell::Pointer(r))
    } else if r.len() == 1 {
        r.ravel_at(0)
    } else {
        Ok(Cell::Pointer(r))
    }
}

/// `(f⍨)B` — commute, monadic: apply the dyadic operand with both
/// arguments set to `B`.
pub fn commute_monadic(ctx: &mut EvalCtx, f: &ValueFn2, b: &Value) -> Result<Value> {
    f(ctx, b, b)
}

/// `A(f⍨)B` — commute, dyadic: swap the argument order, i.e. `B f A`.
pub fn commute_dyadic(ctx: &mut EvalCtx, f: &ValueFn2, a: &Value, b: &Value) -> Result<Value> {
    f(ctx, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::config::Config;
    use crate::primitive::scalar::{add, sub};

    #[test]
    fn each_negates_every_cell() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let neg = |ctx: &mut EvalCtx, b: &Value| {
            crate::primitive::scalar::pervade_monadic(ctx, b, |c| sub(&Cell::Int(0), c))
        };
        let r = each_monadic(&mut ctx, &neg, &v).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(-1)));
    }

    #[test]
    fn commute_dyadic_swaps_arguments() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::scalar(Cell::Int(10));
        let b = Value::scalar(Cell::Int(3));
        let sub_fn = |ctx: &mut EvalCtx, a: &Value, b: &Value| {
            crate::primitive::scalar::pervade_dyadic(ctx, a, b, sub)
        };
        // A(-⍨)B = B - A = 3 - 10 = -7
        let r = commute_dyadic(&mut ctx, &sub_fn, &a, &b).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(-7)));
    }

    #[test]
    fn commute_monadic_self_applies() {
        let cfg = Config::default();
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let b = Value::scalar(Cell::Int(4));
        let add_fn = |ctx: &mut EvalCtx, a: &Value, b: &Value| {
            crate::primitive::scalar::pervade_dyadic(ctx, a, b, add)
        };
        let r = commute_monadic(&mut ctx, &add_fn, &b).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(8)));
    }
}
