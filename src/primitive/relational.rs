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

//! `∈` (member), `≡`/`≢` (match/mismatch).
//!
//! Matching recurses structurally through pointer cells and compares
//! everything else at `⎕CT` tolerance, the same rule
//! [`crate::value::Value::equal`] already implements; this module is a
//! thin shape- and cell-wise lift of it for the dedicated relational
//! primitives.

use crate::cell::Cell;
use crate::config::Config;
use crate::value::Value;

/// `A∈B` — for each cell of `A`, whether an equal cell occurs anywhere
/// in `B`'s ravel.
pub fn member(a: &Value, b: &Value, cfg: &Config) -> crate::error::Result<Value> {
    let haystack = b.ravel_to_vec();
    let results: Vec<Cell> = (0..a.len())
        .map(|i| {
            let needle = a.ravel_at(i)?;
            let found = haystack.iter().any(|h| h.equal(&needle, cfg.ct));
            Ok(Cell::Int(found as i64))
        })
        .collect::<crate::error::Result<_>>()?;
    Value::from_ravel(*a.shape(), results)
}

/// `A≡B` — deep structural match at `⎕CT` tolerance.
pub fn match_(a: &Value, b: &Value, cfg: &Config) -> bool {
    a.equal(b, cfg.ct)
}

/// `A≢B` — deep structural mismatch.
pub fn mismatch(a: &Value, b: &Value, cfg: &Config) -> bool {
    !match_(a, b, cfg)
}

/// `≢B` — monadic tally: the length of `B`'s first axis, or `1` for a
/// scalar.
pub fn tally(b: &Value) -> Value {
    let n = if b.rank() == 0 { 1 } else { b.shape().first_axis() };
    Value::from_ravel(crate::shape::Shape::SCALAR, vec![Cell::Int(n)]).expect("scalar shape always valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_finds_and_misses() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(1), Cell::Int(9)]);
        let b = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let r = member(&a, &b, &cfg).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(1)));
        assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(0)));
    }

    #[test]
    fn match_is_reflexive() {
        let cfg = Config::default();
        let v = Value::vector([Cell::Int(1), Cell::Int(2)]);
        assert!(match_(&v, &v, &cfg));
        assert!(!mismatch(&v, &v, &cfg));
    }
}
