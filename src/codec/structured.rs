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

//! `⎕MAP` and the `⎕CR` sub-function family.
//!
//! `⎕CR` dispatches on an integer sub-function code; this module
//! implements a handful of those rather than the full case table, which
//! belongs to the host's command processor, not the evaluation core.

use crate::cell::Cell;
use crate::codec::cdr;
use crate::config::Config;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::Value;

/// One key/value pair extracted from `A ⎕MAP B`'s left argument.
struct KeyValue {
    key: Cell,
    value: Cell,
}

/// Split `A` into key/value pairs: an `N×2` matrix gives one pair per
/// row; a flat vector gives one pair per adjacent pair of cells. `A` is
/// sorted and deduplicated by [`quad_map`], not here.
fn pairs_of(a: &Value) -> Result<Vec<KeyValue>> {
    if a.rank() == 2 {
        let axes = a.shape().axes();
        if axes[1] != 2 {
            return Err(ErrorCode::LengthError);
        }
        let rows = axes[0] as usize;
        (0..rows)
            .map(|r| {
                Ok(KeyValue {
                    key: a.ravel_at(r * 2)?,
                    value: a.ravel_at(r * 2 + 1)?,
                })
            })
            .collect()
    } else {
        if a.len() % 2 != 0 {
            return Err(ErrorCode::LengthError);
        }
        (0..a.len() / 2)
            .map(|i| {
                Ok(KeyValue {
                    key: a.ravel_at(i * 2)?,
                    value: a.ravel_at(i * 2 + 1)?,
                })
            })
            .collect()
    }
}

/// `A ⎕MAP B` — substitute every cell of `B` that matches a key in `A`'s
/// left column with the corresponding right-column value, recursing
/// into pointer (enclosed) cells.
///
/// The key/value pairs are sorted once up front (duplicate keys
/// rejected as a `DomainError`) and every cell of `B` is looked up in
/// that sorted array by binary search rather than scanning `A` linearly
/// per cell.
pub fn quad_map(a: &Value, b: &Value, cfg: &Config) -> Result<Value> {
    let mut pairs = pairs_of(a)?;
    pairs.sort_by(|x, y| x.key.total_cmp(&y.key));
    for w in pairs.windows(2) {
        if w[0].key.equal(&w[1].key, cfg.ct) {
            return Err(ErrorCode::DomainError);
        }
    }

    let ravel: Result<Vec<Cell>> = (0..b.len()).map(|i| map_cell(&b.ravel_at(i)?, &pairs, cfg)).collect();
    Value::from_ravel(*b.shape(), ravel?)
}

fn map_cell(c: &Cell, pairs: &[KeyValue], cfg: &Config) -> Result<Cell> {
    if let Cell::Pointer(inner) = c {
        return Ok(Cell::Pointer(quad_map_inner(inner, pairs, cfg)?));
    }
    match lookup(c, pairs, cfg) {
        Some(v) => Ok(v.clone()),
        None => Ok(c.clone()),
    }
}

/// Apply an already-sorted key/value table to every cell of `b`,
/// recursing through nested pointer cells (used for `A ⎕MAP B`'s pointer
/// operand, which shares the outer map rather than re-sorting per
/// level).
fn quad_map_inner(b: &Value, pairs: &[KeyValue], cfg: &Config) -> Result<Value> {
    let ravel: Result<Vec<Cell>> = (0..b.len()).map(|i| map_cell(&b.ravel_at(i)?, pairs, cfg)).collect();
    Value::from_ravel(*b.shape(), ravel?)
}

/// Binary search `pairs` (sorted by key, per [`Cell::total_cmp`]) for a
/// cell equal to `needle`. `total_cmp`'s strict ordering drives the
/// search; the landing candidate is then confirmed with a `⎕CT`-tolerant
/// [`Cell::equal`] so near-integral floats still match the way the rest
/// of this core compares numbers.
fn lookup<'a>(needle: &Cell, pairs: &'a [KeyValue], cfg: &Config) -> Option<&'a Cell> {
    let mut lo = 0usize;
    let mut hi = pairs.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match pairs[mid].key.total_cmp(needle) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => return Some(&pairs[mid].value),
        }
    }
    pairs
        .get(lo)
        .filter(|kv| kv.key.equal(needle, cfg.ct))
        .map(|kv| &kv.value)
}

/// `⎕MAP` — interpret a raw byte vector as a value of the cell kind
/// named by `tag` (one of the [`crate::codec::cdr`] tag bytes), without
/// the CDR record's shape header: `shape` supplies the target shape
/// directly, for a headerless pre-agreed layout.
pub fn map_bytes(tag: u8, shape: &Shape, bytes: &Value) -> Result<Value> {
    let raw = bytes.to_bytes()?;
    let mut framed = Vec::with_capacity(2 + shape.rank() * 8 + raw.len());
    framed.push(tag);
    framed.push(shape.rank() as u8);
    for &axis in shape.axes() {
        framed.extend_from_slice(&axis.to_be_bytes());
    }
    framed.extend_from_slice(&raw);
    cdr::decode(&framed)
}

/// `⎕CR 30` — "conform": recursively strip single-element enclosing
/// pointers that wrap a simple scalar, collapsing `⊂⊂⊂5` down to `5`.
/// Used by hosts to normalize a value read back from `⎕CR 33`/`34`
/// before further processing.
pub fn cr_30_conform(v: &Value) -> Value {
    if v.shape().is_scalar() {
        if let Ok(Cell::Pointer(inner)) = v.ravel_at(0) {
            return cr_30_conform(&inner);
        }
    }
    v.clone()
}

/// `⎕CR 33` — pack a tagged value into a TLV byte record: the tag is the
/// integer left argument, the payload is `B`'s CDR encoding.
pub fn cr_33_pack(tag: i64, b: &Value) -> Result<Value> {
    let payload = cdr::encode(b)?;
    let record = cdr::pack_tlv(tag as u32, &payload);
    Ok(Value::from_bytes(&record))
}

/// `⎕CR 34` — the inverse of [`cr_33_pack`]: unpack a TLV byte record
/// into `(tag, value)`.
pub fn cr_34_unpack(b: &Value) -> Result<(i64, Value)> {
    let bytes = b.to_bytes()?;
    let (tag, payload) = cdr::unpack_tlv(&bytes)?;
    Ok((tag as i64, cdr::decode(payload)?))
}

/// `⎕CR 35` — split a character vector into a nested vector of lines,
/// one enclosed character vector per line, dropping line terminators.
pub fn cr_35_lines(v: &Value) -> Result<Value> {
    let s = v.to_rust_string()?;
    let cells: Vec<Cell> = s.lines().map(|line| Cell::Pointer(Value::from_str(line))).collect();
    Ok(Value::vector(cells))
}

/// `⎕CR 36` — the inverse of [`cr_35_lines`]: join a nested vector of
/// character-vector lines back into one character vector with `\n`
/// separators.
pub fn cr_36_unlines(v: &Value) -> Result<Value> {
    let mut lines = Vec::with_capacity(v.len());
    for i in 0..v.len() {
        match v.ravel_at(i)? {
            Cell::Pointer(line) => lines.push(line.to_rust_string()?),
            _ => return Err(ErrorCode::DomainError),
        }
    }
    Ok(Value::from_str(&lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conform_strips_repeated_enclosure() {
        let inner = Value::scalar(Cell::Int(5));
        let once = Value::scalar(Cell::Pointer(inner));
        let twice = Value::scalar(Cell::Pointer(once));
        let r = cr_30_conform(&twice);
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(5)));
    }

    #[test]
    fn pack_then_unpack_tlv_round_trips() {
        let v = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let packed = cr_33_pack(0x1234, &v).unwrap();
        let (tag, back) = cr_34_unpack(&packed).unwrap();
        assert_eq!(tag, 0x1234);
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn lines_round_trip() {
        let v = Value::from_str("a\nb\nc");
        let nested = cr_35_lines(&v).unwrap();
        assert_eq!(nested.len(), 3);
        let back = cr_36_unlines(&nested).unwrap();
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn map_substitutes_matched_cells_and_leaves_rest() {
        let cfg = Config::default();
        // A: 'a'→'A', 'b'→'B', 'c'→'C'; B: 3 2 shaped 'aAbBcC'.
        let a = Value::vector(
            ['a', 'A', 'b', 'B', 'c', 'C'].into_iter().map(|c| Cell::Char(c as i32)),
        );
        let b = Value::from_ravel(
            Shape::new(&[3, 2]).unwrap(),
            "aAbBcC".chars().map(|c| Cell::Char(c as i32)).collect(),
        )
        .unwrap();
        let r = quad_map(&a, &b, &cfg).unwrap();
        let out: String = (0..r.len())
            .map(|i| match r.ravel_at(i).unwrap() {
                Cell::Char(c) => char::from_u32(c as u32).unwrap(),
                _ => panic!("expected char"),
            })
            .collect();
        assert_eq!(out, "AABBCC");
    }

    #[test]
    fn map_leaves_unmapped_cells_unchanged() {
        let cfg = Config::default();
        let a = Value::vector(['a', 'A', 'b', 'B', 'c', 'C'].into_iter().map(|c| Cell::Char(c as i32)));
        let b = Value::from_str("aBc");
        let r = quad_map(&a, &b, &cfg).unwrap();
        assert_eq!(r.to_rust_string().unwrap(), "ABc");
    }

    #[test]
    fn map_rejects_duplicate_keys() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(1), Cell::Int(10), Cell::Int(1), Cell::Int(20)]);
        let b = Value::vector([Cell::Int(1)]);
        assert_eq!(quad_map(&a, &b, &cfg).unwrap_err(), ErrorCode::DomainError);
    }

    #[test]
    fn map_recurses_through_pointer_cells() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(1), Cell::Int(9)]);
        let inner = Value::vector([Cell::Int(1), Cell::Int(2)]);
        let b = Value::vector([Cell::Pointer(inner)]);
        let r = quad_map(&a, &b, &cfg).unwrap();
        match r.ravel_at(0).unwrap() {
            Cell::Pointer(v) => assert!(matches!(v.ravel_at(0).unwrap(), Cell::Int(9))),
            _ => panic!("expected pointer cell"),
        }
    }
}
