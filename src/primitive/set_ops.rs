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

//! `∪` (union) and `∩` (intersection).
//!
//! Both are expressed as a filter over one operand's ravel by
//! membership in the other, reusing the member-test machinery of
//! `relational.rs` rather than a dedicated hash-set implementation.

use crate::cell::Cell;
use crate::config::Config;
use crate::error::Result;
use crate::value::Value;

/// `A∪B` — the cells of `A`, followed by the cells of `B` that don't
/// already occur in `A`, each kept at most once.
pub fn union(a: &Value, b: &Value, cfg: &Config) -> Result<Value> {
    let mut out: Vec<Cell> = Vec::new();
    for i in 0..a.len() {
        let c = a.ravel_at(i)?;
        if !out.iter().any(|x| x.equal(&c, cfg.ct)) {
            out.push(c);
        }
    }
    for i in 0..b.len() {
        let c = b.ravel_at(i)?;
        if !out.iter().any(|x| x.equal(&c, cfg.ct)) {
            out.push(c);
        }
    }
    Ok(Value::vector(out))
}

/// `A∩B` — the cells of `A` that also occur in `B`, each kept at most
/// once, preserving `A`'s order.
pub fn intersection(a: &Value, b: &Value, cfg: &Config) -> Result<Value> {
    let bset = b.ravel_to_vec();
    let mut out: Vec<Cell> = Vec::new();
    for i in 0..a.len() {
        let c = a.ravel_at(i)?;
        if bset.iter().any(|x| x.equal(&c, cfg.ct)) && !out.iter().any(|x| x.equal(&c, cfg.ct)) {
            out.push(c);
        }
    }
    Ok(Value::vector(out))
}

/// `∪B` — monadic unique: `B`'s cells in first-seen order, each kept at
/// most once.
pub fn unique(b: &Value, cfg: &Config) -> Result<Value> {
    let mut out: Vec<Cell> = Vec::new();
    for i in 0..b.len() {
        let c = b.ravel_at(i)?;
        if !out.iter().any(|x| x.equal(&c, cfg.ct)) {
            out.push(c);
        }
    }
    Ok(Value::vector(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_deduplicates() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let b = Value::vector([Cell::Int(2), Cell::Int(3)]);
        let r = union(&a, &b, &cfg).unwrap();
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn intersection_keeps_only_shared() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let b = Value::vector([Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let r = intersection(&a, &b, &cfg).unwrap();
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn unique_deduplicates_preserving_order() {
        let cfg = Config::default();
        let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(1), Cell::Int(3)]);
        let r = unique(&v, &cfg).unwrap();
        assert_eq!(r.len(), 3);
        assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(2)));
    }
}
