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

//! `⊤` (encode) and `⊥` (decode).
//!
//! Both follow the mixed-radix convention: successive division against
//! a radix list for encode, and the corresponding Horner-style
//! accumulation for decode.

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::Value;

/// `A⊤B` — represent each cell of `B` in the mixed radix given by `A`
/// (read left to right, most significant first), producing one extra
/// leading axis of length `≢A` on the result.
pub fn encode(a: &Value, b: &Value) -> Result<Value> {
    let radices: Result<Vec<i64>> = (0..a.len()).map(|i| a.ravel_at(i)?.to_int_tolerant(0.0)).collect();
    let radices = radices?;
    let mut out_axes = vec![radices.len() as i64];
    out_axes.extend(b.shape().axes().iter().copied());
    let out_shape = Shape::new(&out_axes)?;

    let mut digits = vec![Vec::with_capacity(b.len()); radices.len()];
    for i in 0..b.len() {
        let mut n = b.ravel_at(i)?.to_int_tolerant(0.0)?;
        let mut row = vec![0i64; radices.len()];
        for (pos, &radix) in radices.iter().enumerate().rev() {
            if radix == 0 {
                row[pos] = n;
                n = 0;
            } else {
                row[pos] = n.rem_euclid(radix);
                n = n.div_euclid(radix);
            }
        }
        for (pos, d) in row.into_iter().enumerate() {
            digits[pos].push(Cell::Int(d));
        }
    }
    let ravel: Vec<Cell> = digits.into_iter().flatten().collect();
    Value::from_ravel(out_shape, ravel)
}

/// `A⊥B` — evaluate `B` (the last axis) as digits in the mixed radix `A`:
/// `Σ Bᵢ × Π(A after i)`.
pub fn decode(a: &Value, b: &Value) -> Result<Value> {
    let radices: Result<Vec<i64>> = (0..a.len()).map(|i| a.ravel_at(i)?.to_int_tolerant(0.0)).collect();
    let radices = radices?;
    if b.shape().is_scalar() || b.rank() <= 1 {
        if b.len() != radices.len() {
            return Err(ErrorCode::LengthError);
        }
        let mut acc = 0i64;
        for i in 0..b.len() {
            let digit = b.ravel_at(i)?.to_int_tolerant(0.0)?;
            acc = acc
                .checked_mul(if i == 0 { 1 } else { radices[i] })
                .and_then(|v| v.checked_add(digit))
                .ok_or(ErrorCode::DomainError)?;
        }
        return Ok(Value::scalar(Cell::Int(acc)));
    }
    let rows = b.shape().first_axis() as usize;
    let cols = b.len() / rows.max(1);
    if cols != radices.len() {
        return Err(ErrorCode::LengthError);
    }
    let mut out = Vec::with_capacity(rows);
    for r in 0..rows {
        let mut acc = 0i64;
        for c in 0..cols {
            let digit = b.ravel_at(r * cols + c)?.to_int_tolerant(0.0)?;
            acc = acc
                .checked_mul(if c == 0 { 1 } else { radices[c] })
                .and_then(|v| v.checked_add(digit))
                .ok_or(ErrorCode::DomainError)?;
        }
        out.push(Cell::Int(acc));
    }
    Value::from_ravel(Shape::vector(rows as i64), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_round_trips() {
        let radix = Value::vector([Cell::Int(24), Cell::Int(60), Cell::Int(60)]);
        let seconds = Value::scalar(Cell::Int(3725));
        let digits = encode(&radix, &seconds).unwrap();
        assert!(matches!(digits.ravel_at(0).unwrap(), Cell::Int(1)));
        assert!(matches!(digits.ravel_at(1).unwrap(), Cell::Int(2)));
        assert!(matches!(digits.ravel_at(2).unwrap(), Cell::Int(5)));

        let digit_vec = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(5)]);
        let back = decode(&radix, &digit_vec).unwrap();
        assert!(matches!(back.ravel_at(0).unwrap(), Cell::Int(3725)));
    }
}
