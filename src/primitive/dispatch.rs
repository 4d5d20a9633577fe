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

//! Concrete [`PrimitiveFn`] implementations, wired to the free functions
//! in the sibling modules.
//!
//! Each primitive is one struct overriding only the `eval_*` entry
//! points its valence supports; here each struct is a zero-sized marker
//! and the override bodies just forward to [`scalar`], [`catenate`],
//! [`take_drop`], etc.

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::primitive::{
    catenate, encode_decode, index, partition, relational, resolve_axis, scalar, set_ops,
    take_drop, transform, EvalCtx,
};
use crate::token::Token;
use crate::value::Value;

macro_rules! scalar_dyadic {
    ($name:ident, $f:path) => {
        pub struct $name;
        impl PrimitiveFn for $name {
            fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
                Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, $f)?))
            }
        }
    };
}

macro_rules! scalar_monadic_dyadic {
    ($name:ident, $mf:path, $df:path) => {
        pub struct $name;
        impl PrimitiveFn for $name {
            fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
                Ok(Token::Value(scalar::pervade_monadic(ctx, b, $mf)?))
            }
            fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
                Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, $df)?))
            }
        }
    };
}

use super::PrimitiveFn;

scalar_monadic_dyadic!(Plus, scalar::conjugate, scalar::add);
scalar_monadic_dyadic!(Minus, scalar::negate, scalar::sub);
scalar_monadic_dyadic!(Times, scalar::signum, scalar::mul);
scalar_monadic_dyadic!(Divide, scalar::reciprocal, scalar::div);
scalar_monadic_dyadic!(Exponential, scalar::exponential, scalar::power);

/// `⌈` monadic ceiling / dyadic maximum. Ceiling needs `⎕CT`, so it can't
/// reuse the two-arg macro above.
pub struct Ceiling;
impl PrimitiveFn for Ceiling {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        let ct = ctx.config.ct;
        Ok(Token::Value(scalar::pervade_monadic(ctx, b, |c| scalar::ceiling(c, ct))?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, scalar::max)?))
    }
}

/// `⌊` monadic floor / dyadic minimum.
pub struct Floor;
impl PrimitiveFn for Floor {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        let ct = ctx.config.ct;
        Ok(Token::Value(scalar::pervade_monadic(ctx, b, |c| scalar::floor(c, ct))?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, scalar::min)?))
    }
}

/// `|` monadic magnitude / dyadic residue.
pub struct Residue;
impl PrimitiveFn for Residue {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_monadic(ctx, b, scalar::magnitude)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, scalar::residue)?))
    }
}

/// `⍟` monadic natural log / dyadic log-base-`A`.
pub struct Log;
impl PrimitiveFn for Log {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_monadic(ctx, b, scalar::ln)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, scalar::log)?))
    }
}

scalar_dyadic!(And, scalar::and);
scalar_dyadic!(Or, scalar::or);
scalar_dyadic!(Nand, scalar::nand);
scalar_dyadic!(Nor, scalar::nor);
scalar_dyadic!(Lt, scalar::lt);
scalar_dyadic!(Le, scalar::le);
scalar_dyadic!(Gt, scalar::gt);
scalar_dyadic!(Ge, scalar::ge);

/// `~` monadic not. Dyadic `~` doesn't exist in ISO APL; only `eval_b` is
/// overridden.
pub struct Not;
impl PrimitiveFn for Not {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(scalar::pervade_monadic(ctx, b, scalar::not)?))
    }
}

/// `=` — comparison tolerance makes this infallible, so it can't reuse
/// the `scalar_dyadic!` macro (which expects `Result<Cell>`-returning
/// functions).
pub struct Eq;
impl PrimitiveFn for Eq {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        let ct = ctx.config.ct;
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, |x, y| Ok(scalar::eq(x, y, ct)))?))
    }
}

/// `≠` — dyadic not-equal; monadic `≠B` (tally-of-unique, not in the ISO
/// core) is intentionally left unimplemented.
pub struct Ne;
impl PrimitiveFn for Ne {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        let ct = ctx.config.ct;
        Ok(Token::Value(scalar::pervade_dyadic(ctx, a, b, |x, y| Ok(scalar::ne(x, y, ct)))?))
    }
}

/// `⍳` — monadic index generator / dyadic index-of.
pub struct Iota;
impl PrimitiveFn for Iota {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        if !b.shape().is_scalar() {
            return Err(ErrorCode::RankError);
        }
        let n = b.ravel_at(0)?.to_int_tolerant(ctx.config.ct)?;
        Ok(Token::Value(scalar::iota(n, ctx.config.io)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(index::index_of(a, b, ctx.config)?))
    }
}

/// `⍸` — dyadic interval-index only (no monadic form in the ISO core).
pub struct IntervalIndex;
impl PrimitiveFn for IntervalIndex {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(index::interval_index(a, b, ctx.config)?))
    }
}

/// `⍴` — monadic shape-of / dyadic reshape.
pub struct Reshape;
impl PrimitiveFn for Reshape {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(catenate::shape_of(b)))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(catenate::reshape(ctx, a, b)?))
    }
}

/// `,` — monadic ravel / dyadic catenate, both with an optional axis.
pub struct Catenate;
impl PrimitiveFn for Catenate {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(catenate::ravel(b)?))
    }
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(catenate::catenate(a, b)?))
    }
    fn eval_axb(&self, ctx: &mut EvalCtx, a: &Value, x: &Value, b: &Value) -> Result<Token> {
        let rank = a.rank().max(b.rank());
        let axis = resolve_axis(x, rank.max(1), ctx.config.io)?;
        Ok(Token::Value(catenate::catenate_axis(a, b, axis)?))
    }
}

/// `⍪` — laminate (first-axis catenate); no monadic form.
pub struct LaminateFirst;
impl PrimitiveFn for LaminateFirst {
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(catenate::laminate_first(a, b)?))
    }
}

/// `↑` — dyadic take only (monadic `↑B`, "mix", is out of scope — see
/// `take_drop.rs`).
pub struct Take;
impl PrimitiveFn for Take {
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(take_drop::take(a, b)?))
    }
}

/// `↓` — dyadic drop only (monadic `↓B`, "split", is out of scope).
pub struct Drop;
impl PrimitiveFn for Drop {
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(take_drop::drop(a, b)?))
    }
}

/// `⌽` — monadic reverse (last axis) / dyadic rotate (last axis).
pub struct Rotate;
impl PrimitiveFn for Rotate {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        let axis = b.rank().max(1) - 1;
        Ok(Token::Value(transform::reverse(b, axis)?))
    }
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        let axis = b.rank().max(1) - 1;
        Ok(Token::Value(transform::rotate(a, b, axis)?))
    }
    fn eval_xb(&self, ctx: &mut EvalCtx, x: &Value, b: &Value) -> Result<Token> {
        let axis = resolve_axis(x, b.rank().max(1), ctx.config.io)?;
        Ok(Token::Value(transform::reverse(b, axis)?))
    }
    fn eval_axb(&self, ctx: &mut EvalCtx, a: &Value, x: &Value, b: &Value) -> Result<Token> {
        let axis = resolve_axis(x, b.rank().max(1), ctx.config.io)?;
        Ok(Token::Value(transform::rotate(a, b, axis)?))
    }
}

/// `⊖` — monadic reverse (first axis) / dyadic rotate (first axis).
pub struct RotateFirst;
impl PrimitiveFn for RotateFirst {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(transform::reverse(b, 0)?))
    }
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(transform::rotate(a, b, 0)?))
    }
}

/// `⍉` — monadic transpose (reverse axis order) / dyadic transpose
/// (axis permutation).
pub struct Transpose;
impl PrimitiveFn for Transpose {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(transform::transpose_monadic(b)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(transform::transpose_dyadic(a, b, ctx.config.io)?))
    }
}

/// `⊤` — dyadic encode only (no monadic form in the ISO core).
pub struct Encode;
impl PrimitiveFn for Encode {
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(encode_decode::encode(a, b)?))
    }
}

/// `⊥` — dyadic decode only.
pub struct Decode;
impl PrimitiveFn for Decode {
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(encode_decode::decode(a, b)?))
    }
}

/// `∈` — dyadic member only.
pub struct Member;
impl PrimitiveFn for Member {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(relational::member(a, b, ctx.config)?))
    }
}

/// `≡` — monadic depth is out of scope; only the dyadic structural-match
/// form is wired here.
pub struct Match;
impl PrimitiveFn for Match {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(Value::scalar(Cell::Int(
            relational::match_(a, b, ctx.config) as i64,
        ))))
    }
}

/// `≢` — monadic tally / dyadic mismatch.
pub struct Mismatch;
impl PrimitiveFn for Mismatch {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(relational::tally(b)))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(Value::scalar(Cell::Int(
            relational::mismatch(a, b, ctx.config) as i64,
        ))))
    }
}

/// `∪` — monadic unique / dyadic union.
pub struct Union;
impl PrimitiveFn for Union {
    fn eval_b(&self, ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(set_ops::unique(b, ctx.config)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(set_ops::union(a, b, ctx.config)?))
    }
}

/// `∩` — dyadic intersection only (no monadic form).
pub struct Intersection;
impl PrimitiveFn for Intersection {
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(set_ops::intersection(a, b, ctx.config)?))
    }
}

/// `⊂` — monadic enclose / dyadic partition.
pub struct Partition;
impl PrimitiveFn for Partition {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(partition::enclose(b)))
    }
    fn eval_ab(&self, _ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(partition::partition(a, b)?))
    }
}

/// `⊃` — monadic disclose / dyadic pick.
pub struct Pick;
impl PrimitiveFn for Pick {
    fn eval_b(&self, _ctx: &mut EvalCtx, b: &Value) -> Result<Token> {
        Ok(Token::Value(partition::disclose(b)?))
    }
    fn eval_ab(&self, ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Token> {
        Ok(Token::Value(partition::pick(a, b, ctx.config.io)?))
    }
}
