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

//! [`Cell`]: a single polymorphic array element.
//!
//! A closed Rust sum type with free functions keyed by variant, rather
//! than a class hierarchy reached through virtual dispatch: a `type_`
//! tag plus a payload, never a vtable.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use num_complex::Complex64;
#[cfg(feature = "rational")]
use num_rational::Ratio;

use crate::error::{ErrorCode, Result};
use crate::value::Value;

/// A single array element.
///
/// `Char` stores a Unicode scalar value as `i32` rather than Rust's
/// `char`: bitwise operators may transiently produce a negative value,
/// a state a `char` cannot represent.
#[derive(Clone)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Char(i32),
    /// Owning reference to a nested [`Value`] (an enclosed array).
    Pointer(Value),
    /// Lvalue reference to cell `index` within `target`, used only during
    /// selective assignment. `target` keeps the referenced value alive, so
    /// the cell-ref's lifetime is strictly contained in the value it
    /// references.
    CellRef(Value, usize),
    #[cfg(feature = "rational")]
    Rational(Ratio<i64>),
}

/// Which native integer widths a cell's value could fit in, used only by
/// the CDR codec's subtype-mask selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntWidth {
    pub signed: bool,
    pub bits: u8,
}

impl Cell {
    /// Numerically zero / blank, per the receiver's own type — used when
    /// building a same-type fill cell (not the Value-level prototype,
    /// which additionally handles nested values; see `value::Value::prototype`).
    pub fn zero_like(&self) -> Cell {
        match self {
            Cell::Int(_) => Cell::Int(0),
            Cell::Float(_) => Cell::Float(0.0),
            Cell::Complex(_) => Cell::Complex(Complex64::new(0.0, 0.0)),
            Cell::Char(_) => Cell::Char(' ' as i32),
            Cell::Pointer(v) => Cell::Pointer(v.prototype_value()),
            Cell::CellRef(..) => Cell::Int(0),
            #[cfg(feature = "rational")]
            Cell::Rational(_) => Cell::Rational(Ratio::new(0, 1)),
        }
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Cell::Char(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Cell::Pointer(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_) | Cell::Complex(_))
            || self.is_rational()
    }

    #[cfg(feature = "rational")]
    fn is_rational(&self) -> bool {
        matches!(self, Cell::Rational(_))
    }
    #[cfg(not(feature = "rational"))]
    fn is_rational(&self) -> bool {
        false
    }

    /// Coerce to a byte value, for sub-functions that operate on byte
    /// vectors. Non-near-integer or out-of-range cells domain-error.
    pub fn get_byte_value(&self) -> Result<u8> {
        let n = self.to_int_tolerant(0.0)?;
        u8::try_from(n).map_err(|_| ErrorCode::DomainError)
    }

    /// Coerce to `i64` within comparison tolerance `ct`.
    pub fn to_int_tolerant(&self, ct: f64) -> Result<i64> {
        match self {
            Cell::Int(i) => Ok(*i),
            Cell::Float(f) => {
                let r = f.round();
                if (f - r).abs() <= ct.max(0.0) * f.abs().max(1.0) {
                    Ok(r as i64)
                } else {
                    Err(ErrorCode::DomainError)
                }
            }
            Cell::Complex(c) if c.im == 0.0 => Cell::Float(c.re).to_int_tolerant(ct),
            Cell::Char(c) => Ok(*c as i64),
            #[cfg(feature = "rational")]
            Cell::Rational(r) if *r.denom() == 1 => Ok(*r.numer()),
            _ => Err(ErrorCode::DomainError),
        }
    }

    /// True if this cell is within `ct` of an integer.
    pub fn is_near_int(&self, ct: f64) -> bool {
        self.to_int_tolerant(ct).is_ok()
    }

    /// Equality with comparison tolerance `ct`: `|a - b| ≤ ct * max(|a|,
    /// |b|)` for floats; exact for everything else except nested
    /// pointers, which recurse structurally.
    pub fn equal(&self, other: &Cell, ct: f64) -> bool {
        use Cell::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Pointer(a), Pointer(b)) => a.equal(b, ct),
            (CellRef(va, ia), CellRef(vb, ib)) => Rc::ptr_eq(va.inner(), vb.inner()) && ia == ib,
            _ if self.is_numeric() && other.is_numeric() => {
                let (a, b) = match (self.as_complex(), other.as_complex()) {
                    (Some(a), Some(b)) => (a, b),
                    _ => return false,
                };
                if a.im == 0.0 && b.im == 0.0 {
                    let (x, y) = (a.re, b.re);
                    (x - y).abs() <= ct.max(0.0) * x.abs().max(y.abs()).max(1.0) || x == y
                } else {
                    (a.re - b.re).abs() <= ct.max(0.0).max(f64::EPSILON)
                        && (a.im - b.im).abs() <= ct.max(0.0).max(f64::EPSILON)
                }
            }
            _ => false,
        }
    }

    /// Total ordering used by sort/grade primitives: characters order
    /// before numbers; ties are broken by a stable pseudo-address so that
    /// equal-valued cells retain relative position.
    pub fn total_cmp(&self, other: &Cell) -> Ordering {
        use Cell::*;
        fn rank(c: &Cell) -> u8 {
            match c {
                Char(_) => 0,
                Int(_) | Float(_) | Complex(_) => 1,
                #[cfg(feature = "rational")]
                Rational(_) => 1,
                Pointer(_) => 2,
                CellRef(..) => 3,
            }
        }
        match (self, other) {
            (Char(a), Char(b)) => a.cmp(b),
            _ if self.is_numeric() && other.is_numeric() => {
                let a = self.as_complex().unwrap_or(Complex64::new(f64::NAN, 0.0));
                let b = other.as_complex().unwrap_or(Complex64::new(f64::NAN, 0.0));
                a.re.partial_cmp(&b.re)
                    .unwrap_or(Ordering::Equal)
                    .then(a.im.partial_cmp(&b.im).unwrap_or(Ordering::Equal))
            }
            _ => rank(self).cmp(&rank(other)),
        }
    }

    /// View as a complex number, for numeric cells only.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Cell::Int(i) => Some(Complex64::new(*i as f64, 0.0)),
            Cell::Float(f) => Some(Complex64::new(*f, 0.0)),
            Cell::Complex(c) => Some(*c),
            #[cfg(feature = "rational")]
            Cell::Rational(r) => Some(Complex64::new(
                *r.numer() as f64 / *r.denom() as f64,
                0.0,
            )),
            _ => None,
        }
    }

    /// Reduce a rational cell with denominator `1` down to an integer
    /// cell. A no-op for every other variant.
    #[cfg(feature = "rational")]
    pub fn normalize(self) -> Cell {
        match self {
            Cell::Rational(r) if *r.denom() == 1 => Cell::Int(*r.numer()),
            other => other,
        }
    }
    #[cfg(not(feature = "rational"))]
    pub fn normalize(self) -> Cell {
        self
    }

    /// CDR wire width in bytes: 1 for bool/byte/char, 4 for 32-bit
    /// integers, 8 for everything wider.
    pub fn cdr_size(&self) -> u8 {
        match self {
            Cell::Char(c) if (0..=255).contains(c) => 1,
            Cell::Char(_) => 4,
            Cell::Int(i) if i32::try_from(*i).is_ok() => 4,
            Cell::Int(_) => 8,
            Cell::Float(_) | Cell::Complex(_) => 8,
            Cell::Pointer(_) | Cell::CellRef(..) => 8,
            #[cfg(feature = "rational")]
            Cell::Rational(_) => 8,
        }
    }

    /// The narrowest native integer width this cell's value could fit in,
    /// used only by the CDR codec when choosing an output width. `None`
    /// for non-integral cells.
    pub fn int_width(&self) -> Option<IntWidth> {
        let n = match self {
            Cell::Int(i) => *i,
            Cell::Char(c) => *c as i64,
            _ => return None,
        };
        let (signed, bits) = if (0..=1).contains(&n) {
            (false, 1)
        } else if u8::try_from(n).is_ok() {
            (false, 8)
        } else if i8::try_from(n).is_ok() {
            (true, 8)
        } else if u16::try_from(n).is_ok() {
            (false, 16)
        } else if i16::try_from(n).is_ok() {
            (true, 16)
        } else if u32::try_from(n).is_ok() {
            (false, 32)
        } else if i32::try_from(n).is_ok() {
            (true, 32)
        } else if n >= 0 {
            (false, 64)
        } else {
            (true, 64)
        };
        Some(IntWidth { signed, bits })
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "Int({i})"),
            Cell::Float(x) => write!(f, "Float({x})"),
            Cell::Complex(c) => write!(f, "Complex({c})"),
            Cell::Char(c) => write!(f, "Char({c})"),
            Cell::Pointer(_) => write!(f, "Pointer(..)"),
            Cell::CellRef(_, idx) => write!(f, "CellRef(.., {idx})"),
            #[cfg(feature = "rational")]
            Cell::Rational(r) => write!(f, "Rational({r})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_near_int_within_tolerance() {
        let c = Cell::Float(3.0000000001);
        assert!(c.is_near_int(1e-6));
        assert!(!Cell::Float(3.1).is_near_int(1e-6));
    }

    #[test]
    fn char_orders_before_numbers() {
        assert_eq!(Cell::Char(65).total_cmp(&Cell::Int(0)), Ordering::Less);
    }

    #[test]
    fn equal_respects_qct() {
        assert!(Cell::Float(1.0).equal(&Cell::Float(1.0 + 1e-10), 1e-6));
        assert!(!Cell::Float(1.0).equal(&Cell::Float(1.1), 1e-6));
    }
}
