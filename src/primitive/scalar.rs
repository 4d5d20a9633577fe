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

//! Scalar (pervasive) dyadic/monadic primitives: `+ - × ÷ ⌈ ⌊ | * ⍟ ∧ ∨ ~
//! = ≠ < ≤ > ≥`, plus the bitwise operators on character cells.
//!
//! Each cell variant overrides the arithmetic it supports and falls
//! back to coercing up the `INT ⊂ RATIONAL ⊂ FLOAT ⊂ COMPLEX` lattice
//! otherwise.

use num_complex::Complex64;
#[cfg(feature = "rational")]
use num_rational::Ratio;

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::primitive::EvalCtx;
use crate::shape::Shape;
use crate::value::Value;

/// Where two cells land after coercion to a common representation.
enum Common {
    Int(i64, i64),
    #[cfg(feature = "rational")]
    Rational(Ratio<i64>, Ratio<i64>),
    Float(f64, f64),
    Complex(Complex64, Complex64),
}

/// Coerce `a` and `b` to the least common type in the lattice
/// `INT ⊂ RATIONAL ⊂ FLOAT ⊂ COMPLEX`.
fn coerce(a: &Cell, b: &Cell) -> Result<Common> {
    use Cell::*;
    match (a, b) {
        (Int(x), Int(y)) => Ok(Common::Int(*x, *y)),
        #[cfg(feature = "rational")]
        (Rational(_), _) | (_, Rational(_)) if a.is_numeric() && b.is_numeric() => {
            let ra = as_rational(a)?;
            let rb = as_rational(b)?;
            Ok(Common::Rational(ra, rb))
        }
        (Complex(_), _) | (_, Complex(_)) if a.is_numeric() && b.is_numeric() => {
            Ok(Common::Complex(
                a.as_complex().ok_or(ErrorCode::DomainError)?,
                b.as_complex().ok_or(ErrorCode::DomainError)?,
            ))
        }
        _ if a.is_numeric() && b.is_numeric() => Ok(Common::Float(
            a.as_complex().ok_or(ErrorCode::DomainError)?.re,
            b.as_complex().ok_or(ErrorCode::DomainError)?.re,
        )),
        _ => Err(ErrorCode::DomainError),
    }
}

#[cfg(feature = "rational")]
fn as_rational(c: &Cell) -> Result<Ratio<i64>> {
    match c {
        Cell::Int(i) => Ok(Ratio::new(*i, 1)),
        Cell::Rational(r) => Ok(*r),
        _ => Err(ErrorCode::DomainError),
    }
}

fn from_complex(c: Complex64) -> Cell {
    if c.im == 0.0 {
        Cell::Float(c.re)
    } else {
        Cell::Complex(c)
    }
}

/// `A + B`
pub fn add(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) => x
            .checked_add(y)
            .map(Cell::Int)
            .ok_or(ErrorCode::DomainError),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => Ok(Cell::Rational(x + y).normalize()),
        Common::Float(x, y) => Ok(Cell::Float(x + y)),
        Common::Complex(x, y) => Ok(from_complex(x + y)),
    }
}

/// `A - B`
pub fn sub(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) => x
            .checked_sub(y)
            .map(Cell::Int)
            .ok_or(ErrorCode::DomainError),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => Ok(Cell::Rational(x - y).normalize()),
        Common::Float(x, y) => Ok(Cell::Float(x - y)),
        Common::Complex(x, y) => Ok(from_complex(x - y)),
    }
}

/// `A × B`
pub fn mul(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) => x
            .checked_mul(y)
            .map(Cell::Int)
            .ok_or(ErrorCode::DomainError),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => Ok(Cell::Rational(x * y).normalize()),
        Common::Float(x, y) => Ok(Cell::Float(x * y)),
        Common::Complex(x, y) => Ok(from_complex(x * y)),
    }
}

/// `A ÷ B`. `DomainError` on division by exact zero.
pub fn div(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, 0) if x == 0 => Ok(Cell::Int(1)),
        Common::Int(_, 0) => Err(ErrorCode::DomainError),
        Common::Int(x, y) if x % y == 0 => Ok(Cell::Int(x / y)),
        Common::Int(x, y) => Ok(Cell::Float(x as f64 / y as f64)),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => {
            if *y.numer() == 0 {
                if *x.numer() == 0 {
                    Ok(Cell::Int(1))
                } else {
                    Err(ErrorCode::DomainError)
                }
            } else {
                Ok(Cell::Rational(x / y).normalize())
            }
        }
        Common::Float(x, y) => {
            if y == 0.0 {
                if x == 0.0 {
                    Ok(Cell::Int(1))
                } else {
                    Err(ErrorCode::DomainError)
                }
            } else {
                Ok(Cell::Float(x / y))
            }
        }
        Common::Complex(x, y) => {
            if y == Complex64::new(0.0, 0.0) {
                if x == Complex64::new(0.0, 0.0) {
                    Ok(Cell::Int(1))
                } else {
                    Err(ErrorCode::DomainError)
                }
            } else {
                Ok(from_complex(x / y))
            }
        }
    }
}

/// `A ⌈ B` (maximum).
pub fn max(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) => Ok(Cell::Int(x.max(y))),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => Ok(Cell::Rational(x.max(y)).normalize()),
        Common::Float(x, y) => Ok(Cell::Float(x.max(y))),
        Common::Complex(..) => Err(ErrorCode::DomainError),
    }
}

/// `A ⌊ B` (minimum).
pub fn min(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) => Ok(Cell::Int(x.min(y))),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => Ok(Cell::Rational(x.min(y)).normalize()),
        Common::Float(x, y) => Ok(Cell::Float(x.min(y))),
        Common::Complex(..) => Err(ErrorCode::DomainError),
    }
}

/// `A | B` (residue): `B - A × ⌊B÷A`, with `A = 0` meaning `B` unchanged.
pub fn residue(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(0, y) => Ok(Cell::Int(y)),
        Common::Int(x, y) => Ok(Cell::Int(y.rem_euclid(x))),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) if *x.numer() == 0 => Ok(Cell::Rational(y).normalize()),
        #[cfg(feature = "rational")]
        Common::Rational(x, y) => {
            let q = (y / x).floor();
            Ok(Cell::Rational(y - x * q).normalize())
        }
        Common::Float(x, _) if x == 0.0 => Ok(b.clone()),
        Common::Float(x, y) => Ok(Cell::Float(y - x * (y / x).floor())),
        Common::Complex(..) => Err(ErrorCode::DomainError),
    }
}

/// `A * B` (power).
pub fn power(a: &Cell, b: &Cell) -> Result<Cell> {
    match coerce(a, b)? {
        Common::Int(x, y) if y >= 0 && y <= u32::MAX as i64 => x
            .checked_pow(y as u32)
            .map(Cell::Int)
            .ok_or(ErrorCode::DomainError),
        _ => {
            let x = a.as_complex().ok_or(ErrorCode::DomainError)?;
            let y = b.as_complex().ok_or(ErrorCode::DomainError)?;
            Ok(from_complex(x.powc(y)))
        }
    }
}

/// `A ⍟ B` (logarithm of `B` to base `A`; monadic `⍟B` is natural log,
/// expressed by the caller as `A = e`).
pub fn log(a: &Cell, b: &Cell) -> Result<Cell> {
    let x = a.as_complex().ok_or(ErrorCode::DomainError)?;
    let y = b.as_complex().ok_or(ErrorCode::DomainError)?;
    if x.im == 0.0 && y.im == 0.0 && x.re > 0.0 && y.re > 0.0 {
        Ok(Cell::Float(y.re.ln() / x.re.ln()))
    } else {
        Ok(from_complex(y.ln() / x.ln()))
    }
}

/// `- B` (monadic negate): `0 - B`.
pub fn negate(b: &Cell) -> Result<Cell> {
    sub(&Cell::Int(0), b)
}

/// `÷ B` (monadic reciprocal): `1 ÷ B`.
pub fn reciprocal(b: &Cell) -> Result<Cell> {
    div(&Cell::Int(1), b)
}

/// `+ B` (monadic conjugate): identity except for complex cells.
pub fn conjugate(b: &Cell) -> Result<Cell> {
    match b {
        Cell::Complex(c) => Ok(from_complex(c.conj())),
        _ if b.is_numeric() => Ok(b.clone()),
        _ => Err(ErrorCode::DomainError),
    }
}

/// `× B` (monadic signum): `¯1`/`0`/`1` for real cells, `B ÷ |B|` for
/// complex (`0` maps to `0`).
pub fn signum(b: &Cell) -> Result<Cell> {
    match b {
        Cell::Int(i) => Ok(Cell::Int(i.signum())),
        Cell::Float(f) => Ok(Cell::Int(if *f > 0.0 { 1 } else if *f < 0.0 { -1 } else { 0 })),
        Cell::Complex(c) => {
            if *c == Complex64::new(0.0, 0.0) {
                Ok(Cell::Int(0))
            } else {
                Ok(from_complex(c / c.norm()))
            }
        }
        _ => Err(ErrorCode::DomainError),
    }
}

/// `⌈ B` (monadic ceiling): smallest integer not less than `B`, within
/// `⎕CT` tolerance of an integer already present.
pub fn ceiling(b: &Cell, ct: f64) -> Result<Cell> {
    match b {
        Cell::Int(_) => Ok(b.clone()),
        Cell::Float(f) => Ok(Cell::Int(round_to_tolerant_int(f.ceil(), *f, ct))),
        _ => Err(ErrorCode::DomainError),
    }
}

/// `⌊ B` (monadic floor): largest integer not greater than `B`.
pub fn floor(b: &Cell, ct: f64) -> Result<Cell> {
    match b {
        Cell::Int(_) => Ok(b.clone()),
        Cell::Float(f) => Ok(Cell::Int(round_to_tolerant_int(f.floor(), *f, ct))),
        _ => Err(ErrorCode::DomainError),
    }
}

/// If `f` is already within `ct` of the nearest integer, snap to that
/// integer instead of the strict ceiling/floor — matches `⎕CT`'s role in
/// near-int tests elsewhere in this module.
fn round_to_tolerant_int(strict: f64, original: f64, ct: f64) -> i64 {
    let nearest = original.round();
    if (original - nearest).abs() <= ct.max(0.0) * original.abs().max(1.0) {
        nearest as i64
    } else {
        strict as i64
    }
}

/// `| B` (monadic magnitude/absolute value).
pub fn magnitude(b: &Cell) -> Result<Cell> {
    match b {
        Cell::Int(i) => Ok(Cell::Int(i.abs())),
        Cell::Float(f) => Ok(Cell::Float(f.abs())),
        Cell::Complex(c) => Ok(Cell::Float(c.norm())),
        _ => Err(ErrorCode::DomainError),
    }
}

/// `⋆ B` (monadic exponential): `e ⋆ B`.
pub fn exponential(b: &Cell) -> Result<Cell> {
    let x = b.as_complex().ok_or(ErrorCode::DomainError)?;
    Ok(from_complex(x.exp()))
}

/// `⍟ B` (monadic natural log).
pub fn ln(b: &Cell) -> Result<Cell> {
    let x = b.as_complex().ok_or(ErrorCode::DomainError)?;
    if x.im == 0.0 && x.re > 0.0 {
        Ok(Cell::Float(x.re.ln()))
    } else {
        Ok(from_complex(x.ln()))
    }
}

fn bool_cell(b: bool) -> Cell {
    Cell::Int(b as i64)
}

/// `A ∧ B` on boolean-valued cells (`0`/`1`).
pub fn and(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(as_bool(a)? && as_bool(b)?))
}

/// `A ∨ B`.
pub fn or(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(as_bool(a)? || as_bool(b)?))
}

/// `A ⍲ B` (nand).
pub fn nand(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(!(as_bool(a)? && as_bool(b)?)))
}

/// `A ⍱ B` (nor).
pub fn nor(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(!(as_bool(a)? || as_bool(b)?)))
}

/// `~ B` (monadic not).
pub fn not(b: &Cell) -> Result<Cell> {
    Ok(bool_cell(!as_bool(b)?))
}

fn as_bool(c: &Cell) -> Result<bool> {
    match c.to_int_tolerant(0.0)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ErrorCode::DomainError),
    }
}

/// `A = B` at comparison tolerance `ct`.
pub fn eq(a: &Cell, b: &Cell, ct: f64) -> Cell {
    bool_cell(a.equal(b, ct))
}

/// `A ≠ B`.
pub fn ne(a: &Cell, b: &Cell, ct: f64) -> Cell {
    bool_cell(!a.equal(b, ct))
}

/// `A < B`.
pub fn lt(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(a.total_cmp(b) == std::cmp::Ordering::Less))
}

/// `A ≤ B`.
pub fn le(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(a.total_cmp(b) != std::cmp::Ordering::Greater))
}

/// `A > B`.
pub fn gt(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(a.total_cmp(b) == std::cmp::Ordering::Greater))
}

/// `A ≥ B`.
pub fn ge(a: &Cell, b: &Cell) -> Result<Cell> {
    Ok(bool_cell(a.total_cmp(b) != std::cmp::Ordering::Less))
}

/// Bitwise operators on character cells coerced to code points (the one
/// context where a `Char` cell's code point may transiently go
/// negative).
pub mod bitwise {
    use super::*;

    fn code(c: &Cell) -> Result<i32> {
        match c {
            Cell::Char(c) => Ok(*c),
            _ => Err(ErrorCode::DomainError),
        }
    }

    pub fn xor(a: &Cell, b: &Cell) -> Result<Cell> {
        Ok(Cell::Char(code(a)? ^ code(b)?))
    }

    pub fn and(a: &Cell, b: &Cell) -> Result<Cell> {
        Ok(Cell::Char(code(a)? & code(b)?))
    }

    pub fn or(a: &Cell, b: &Cell) -> Result<Cell> {
        Ok(Cell::Char(code(a)? | code(b)?))
    }
}

/// Apply a dyadic scalar function cell-by-cell across `a` and `b` with
/// scalar extension: a scalar operand pairs with every cell of the
/// other; two non-scalar operands must share a shape.
pub fn pervade_dyadic(
    ctx: &mut EvalCtx,
    a: &Value,
    b: &Value,
    f: impl Fn(&Cell, &Cell) -> Result<Cell>,
) -> Result<Value> {
    let (shape, len) = match (a.shape().is_scalar(), b.shape().is_scalar()) {
        (true, true) | (false, true) => (*a.shape(), a.len()),
        (true, false) => (*b.shape(), b.len()),
        (false, false) => {
            if a.shape() != b.shape() {
                return Err(ErrorCode::LengthError);
            }
            (*a.shape(), a.len())
        }
    };
    let mut ravel = Vec::with_capacity(len);
    for i in 0..len {
        ctx.check_interrupt()?;
        let ca = a.ravel_at(if a.shape().is_scalar() { 0 } else { i })?;
        let cb = b.ravel_at(if b.shape().is_scalar() { 0 } else { i })?;
        ravel.push(recurse_dyadic(&ca, &cb, &f)?);
    }
    Value::from_ravel(shape, ravel)
}

/// Pointer cells recurse structurally rather than erroring, matching the
/// source's pervasion-through-nesting rule for scalar primitives.
fn recurse_dyadic(
    a: &Cell,
    b: &Cell,
    f: &impl Fn(&Cell, &Cell) -> Result<Cell>,
) -> Result<Cell> {
    match (a, b) {
        (Cell::Pointer(va), Cell::Pointer(vb)) => {
            if va.shape() != vb.shape() {
                return Err(ErrorCode::LengthError);
            }
            let mut out = Vec::with_capacity(va.len());
            for i in 0..va.len() {
                out.push(recurse_dyadic(&va.ravel_at(i)?, &vb.ravel_at(i)?, f)?);
            }
            Ok(Cell::Pointer(Value::from_ravel(*va.shape(), out)?))
        }
        (Cell::Pointer(va), other) => {
            let mut out = Vec::with_capacity(va.len());
            for i in 0..va.len() {
                out.push(recurse_dyadic(&va.ravel_at(i)?, other, f)?);
            }
            Ok(Cell::Pointer(Value::from_ravel(*va.shape(), out)?))
        }
        (other, Cell::Pointer(vb)) => {
            let mut out = Vec::with_capacity(vb.len());
            for i in 0..vb.len() {
                out.push(recurse_dyadic(other, &vb.ravel_at(i)?, f)?);
            }
            Ok(Cell::Pointer(Value::from_ravel(*vb.shape(), out)?))
        }
        _ => f(a, b),
    }
}

/// Apply a monadic scalar function cell-by-cell, recursing through
/// pointer cells the same way [`pervade_dyadic`] does.
pub fn pervade_monadic(
    ctx: &mut EvalCtx,
    b: &Value,
    f: impl Fn(&Cell) -> Result<Cell>,
) -> Result<Value> {
    let mut ravel = Vec::with_capacity(b.len());
    for i in 0..b.len() {
        ctx.check_interrupt()?;
        ravel.push(recurse_monadic(&b.ravel_at(i)?, &f)?);
    }
    Value::from_ravel(*b.shape(), ravel)
}

fn recurse_monadic(c: &Cell, f: &impl Fn(&Cell) -> Result<Cell>) -> Result<Cell> {
    match c {
        Cell::Pointer(v) => {
            let mut out = Vec::with_capacity(v.len());
            for i in 0..v.len() {
                out.push(recurse_monadic(&v.ravel_at(i)?, f)?);
            }
            Ok(Cell::Pointer(Value::from_ravel(*v.shape(), out)?))
        }
        _ => f(c),
    }
}

/// `⍳N` — index generator, the simplest shape-producing primitive,
/// included here since it shares this module's scalar-style signature
/// (`Value -> Value`, no axis).
pub fn iota(n: i64, io: i64) -> Result<Value> {
    if n < 0 {
        return Err(ErrorCode::DomainError);
    }
    let shape = Shape::vector(n);
    let ravel = (0..n).map(|i| Cell::Int(i + io)).collect();
    Value::from_ravel(shape, ravel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crate::config::Config;

    #[test]
    fn add_promotes_int_to_float_on_overflow_free_division() {
        assert!(matches!(add(&Cell::Int(2), &Cell::Int(3)).unwrap(), Cell::Int(5)));
    }

    #[test]
    fn div_by_zero_of_zero_is_one() {
        assert!(matches!(div(&Cell::Int(0), &Cell::Int(0)).unwrap(), Cell::Int(1)));
        assert_eq!(div(&Cell::Int(1), &Cell::Int(0)).unwrap_err(), ErrorCode::DomainError);
    }

    #[test]
    fn residue_follows_euclidean_sign() {
        assert!(matches!(residue(&Cell::Int(3), &Cell::Int(-7)).unwrap(), Cell::Int(2)));
    }

    #[test]
    fn pervade_dyadic_scalar_extends() {
        let mut cfg = Config::default();
        cfg.ct = 0.0;
        let mut bridge = NullBridge;
        let mut ctx = EvalCtx::new(&cfg, &mut bridge);
        let a = Value::scalar(Cell::Int(10));
        let b = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let r = pervade_dyadic(&mut ctx, &a, &b, |x, y| add(x, y)).unwrap();
        assert_eq!(r.ravel_to_vec().len(), 3);
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(13)));
    }

    #[test]
    fn ceiling_and_floor_respect_tolerance() {
        assert!(matches!(ceiling(&Cell::Float(2.0000000001), 1e-6).unwrap(), Cell::Int(2)));
        assert!(matches!(ceiling(&Cell::Float(2.4), 1e-6).unwrap(), Cell::Int(3)));
        assert!(matches!(floor(&Cell::Float(2.6), 1e-6).unwrap(), Cell::Int(2)));
    }

    #[test]
    fn signum_of_negative_zero_and_positive() {
        assert!(matches!(signum(&Cell::Int(-5)).unwrap(), Cell::Int(-1)));
        assert!(matches!(signum(&Cell::Int(0)).unwrap(), Cell::Int(0)));
        assert!(matches!(signum(&Cell::Int(5)).unwrap(), Cell::Int(1)));
    }

    #[test]
    fn negate_and_reciprocal() {
        assert!(matches!(negate(&Cell::Int(4)).unwrap(), Cell::Int(-4)));
        assert!(matches!(reciprocal(&Cell::Int(1)).unwrap(), Cell::Int(1)));
    }

    #[test]
    fn iota_respects_index_origin() {
        let v = iota(3, 0).unwrap();
        assert!(matches!(v.ravel_at(0).unwrap(), Cell::Int(0)));
        let v = iota(3, 1).unwrap();
        assert!(matches!(v.ravel_at(0).unwrap(), Cell::Int(1)));
    }
}
