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

//! Operator kernel.
//!
//! Operators take one or two function operands and an optional axis,
//! producing a derived function. Each operator splits between a plain
//! (last-axis) and an axis-suffixed (first-axis) variant, both reaching
//! the same evaluation path — here the operands are ordinary Rust
//! closures instead of virtual `Function` objects, consistent with
//! `primitive::PrimitiveFn` not using trait objects either.

pub mod each;
pub mod product;
pub mod rank;
pub mod reduce;
pub mod scan;

use crate::error::Result;
use crate::primitive::EvalCtx;
use crate::value::Value;

/// A resolved monadic function operand: `f B`.
pub type ValueFn1<'f> = dyn Fn(&mut EvalCtx, &Value) -> Result<Value> + 'f;

/// A resolved dyadic function operand: `A f B`.
pub type ValueFn2<'f> = dyn Fn(&mut EvalCtx, &Value, &Value) -> Result<Value> + 'f;

/// The dispatch contract every operator implements: one/two function
/// operands, crossed with monadic/dyadic valence and
/// presence of an axis operand. Implemented per-operator as free
/// functions (see `reduce`, `scan`, `each`, `product`, `rank`) rather
/// than as trait methods, since each operator's operand arity differs
/// (one function for reduce/scan/each, two for inner/outer product).
/// This trait exists to name the contract; operator modules are not
/// required to implement it when a subset of entry points is meaningless
/// for that operator (e.g. `each` has no "axis" variant).
pub trait Operator1 {
    fn eval_lb(&self, ctx: &mut EvalCtx, l: &ValueFn1, b: &Value) -> Result<Value>;
    fn eval_lxb(&self, ctx: &mut EvalCtx, l: &ValueFn1, x: &Value, b: &Value) -> Result<Value> {
        let _ = x;
        self.eval_lb(ctx, l, b)
    }
    fn eval_alb(&self, ctx: &mut EvalCtx, a: &Value, l: &ValueFn2, b: &Value) -> Result<Value>;
    fn eval_alxb(
        &self,
        ctx: &mut EvalCtx,
        a: &Value,
        l: &ValueFn2,
        x: &Value,
        b: &Value,
    ) -> Result<Value> {
        let _ = x;
        self.eval_alb(ctx, a, l, b)
    }
}

/// The two-function-operand dispatch contract (inner/outer product, rank).
pub trait Operator2 {
    fn eval_lrb(&self, ctx: &mut EvalCtx, l: &ValueFn2, r: &ValueFn2, b: &Value) -> Result<Value>;
    fn eval_lrxb(
        &self,
        ctx: &mut EvalCtx,
        l: &ValueFn2,
        r: &ValueFn2,
        x: &Value,
        b: &Value,
    ) -> Result<Value> {
        let _ = x;
        self.eval_lrb(ctx, l, r, b)
    }
    fn eval_alrb(
        &self,
        ctx: &mut EvalCtx,
        a: &Value,
        l: &ValueFn2,
        r: &ValueFn2,
        b: &Value,
    ) -> Result<Value>;
    fn eval_alrxb(
        &self,
        ctx: &mut EvalCtx,
        a: &Value,
        l: &ValueFn2,
        r: &ValueFn2,
        x: &Value,
        b: &Value,
    ) -> Result<Value> {
        let _ = x;
        self.eval_alrb(ctx, a, l, r, b)
    }
}
