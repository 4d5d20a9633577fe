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

//! Primitive-function kernel.
//!
//! Every primitive implements as many of the four `eval_*` entry points as
//! its valence supports; the unimplemented ones fall back to the default
//! `ValenceError` (only the valences a primitive actually supports get
//! overridden).

pub mod catenate;
pub mod dispatch;
pub mod encode_decode;
pub mod index;
pub mod partition;
pub mod relational;
pub mod scalar;
pub mod set_ops;
pub mod take_drop;
pub mod transform;

use crate::bridge::MacroBridge;
use crate::config::Config;
use crate::error::{ErrorCode, Result};
use crate::token::Token;
use crate::value::Value;

/// Evaluation-time context threaded through every primitive and operator
/// call: the active configuration plus the host callback surface,
/// passed by reference into every primitive and operator function
/// rather than read from ambient globals.
pub struct EvalCtx<'a> {
    pub config: &'a Config,
    pub bridge: &'a mut dyn MacroBridge,
}

impl<'a> EvalCtx<'a> {
    pub fn new(config: &'a Config, bridge: &'a mut dyn MacroBridge) -> Self {
        EvalCtx { config, bridge }
    }

    /// Check the interrupt flag, translating a pending cancellation into
    /// `ErrorCode::Interrupt`. Checked between ravel cells of a
    /// long-running primitive.
    pub fn check_interrupt(&self) -> Result<()> {
        if self.bridge.interrupted() {
            tracing::warn!("interrupt delivered mid-evaluation");
            Err(ErrorCode::Interrupt)
        } else {
            Ok(())
        }
    }
}

/// The dispatch contract every primitive function implements: monadic,
/// dyadic, monadic-with-axis, dyadic-with-axis.
pub trait PrimitiveFn {
    /// `f B` — monadic, no axis.
    fn eval_b(&self, _ctx: &mut EvalCtx, _b: &Value) -> Result<Token> {
        Err(ErrorCode::ValenceError)
    }

    /// `A f B` — dyadic, no axis.
    fn eval_ab(&self, _ctx: &mut EvalCtx, _a: &Value, _b: &Value) -> Result<Token> {
        Err(ErrorCode::ValenceError)
    }

    /// `f[X] B` — monadic with an explicit axis operand.
    fn eval_xb(&self, _ctx: &mut EvalCtx, _x: &Value, _b: &Value) -> Result<Token> {
        Err(ErrorCode::ValenceError)
    }

    /// `A f[X] B` — dyadic with an explicit axis operand.
    fn eval_axb(&self, _ctx: &mut EvalCtx, _a: &Value, _x: &Value, _b: &Value) -> Result<Token> {
        Err(ErrorCode::ValenceError)
    }
}

/// Resolve an axis operand to a zero-based axis index against a value's
/// rank, applying `⎕IO`. A single-element axis vector is
/// expected; anything else is a `RankError` (multi-axis selection is
/// handled by individual primitives that accept it, e.g. transpose).
pub fn resolve_axis(x: &Value, rank: usize, io: i64) -> Result<usize> {
    if x.len() != 1 {
        return Err(ErrorCode::RankError);
    }
    let raw = x.ravel_at(0)?.to_int_tolerant(0.0)? - io;
    if raw < 0 || raw as usize >= rank.max(1) {
        return Err(ErrorCode::AxisError);
    }
    Ok(raw as usize)
}
