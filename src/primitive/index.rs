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

//! `⍳` (index-of) and `⍸` (interval-index).
//!
//! Index-of compares each major cell of `B` against the major cells of
//! `A` for the first match, falling back to `≢A` (one past the end, in
//! `⎕IO`-relative terms) when none is found; interval-index instead
//! treats `A` as a sorted partition boundary vector and reports which
//! half-open interval each cell of `B` falls into.

use crate::cell::Cell;
use crate::config::Config;
use crate::error::Result;
use crate::value::Value;

/// A value's cells grouped into "major cells" along its first axis (the
/// unit index-of and interval-index both compare).
fn major_cells(v: &Value) -> Result<Vec<Vec<Cell>>> {
    if v.rank() <= 1 {
        return (0..v.len()).map(|i| Ok(vec![v.ravel_at(i)?])).collect();
    }
    let n = v.shape().first_axis().max(0) as usize;
    let stride = if n == 0 { 0 } else { v.len() / n };
    (0..n)
        .map(|i| (0..stride).map(|j| v.ravel_at(i * stride + j)).collect())
        .collect()
}

fn cells_equal(a: &[Cell], b: &[Cell], ct: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equal(y, ct))
}

/// `A⍳B` — for each major cell of `B`, the `⎕IO`-relative position of the
/// first matching major cell of `A`, or `≢A` if there is no match.
///
/// Dispatches to the linear-scan reference path for small/rank>1 `A`
/// (where a single major cell is itself a multi-cell row, which the
/// grade-assisted path below doesn't key on), and to the grade-assisted
/// binary-search path otherwise, using a sorted index rather than an
/// O(|A|·|B|) scan when `A`'s major cells are themselves scalars.
pub fn index_of(a: &Value, b: &Value, cfg: &Config) -> Result<Value> {
    let haystack = major_cells(a)?;
    let needles = major_cells(b)?;
    let not_found = haystack.len() as i64 + cfg.io;

    let results: Vec<Cell> = if a.rank() <= 1 && haystack.iter().all(|h| h.len() == 1) {
        index_of_graded(&haystack, &needles, cfg.ct, cfg.io, not_found)
    } else {
        needles
            .iter()
            .map(|needle| {
                haystack
                    .iter()
                    .position(|hay| cells_equal(hay, needle, cfg.ct))
                    .map(|i| Cell::Int(i as i64 + cfg.io))
                    .unwrap_or(Cell::Int(not_found))
            })
            .collect()
    };

    if b.shape().is_scalar() {
        results
            .into_iter()
            .next()
            .map(Value::scalar)
            .ok_or(crate::error::ErrorCode::DomainError)
    } else {
        Value::from_ravel(*b.shape(), results)
    }
}

/// Grade `haystack` once (the `⍋`/`⍒` family shares this same total
/// order), then resolve each needle by binary search instead of a
/// linear scan. Matches the *first* occurrence on ties, same as the
/// direct scan, by preferring the lowest original index among equal keys
/// once the search lands on a matching run.
fn index_of_graded(
    haystack: &[Vec<Cell>],
    needles: &[Vec<Cell>],
    ct: f64,
    io: i64,
    not_found: i64,
) -> Vec<Cell> {
    let mut order: Vec<usize> = (0..haystack.len()).collect();
    order.sort_by(|&i, &j| haystack[i][0].total_cmp(&haystack[j][0]));

    needles
        .iter()
        .map(|needle| {
            let key = &needle[0];
            let mut lo = 0usize;
            let mut hi = order.len();
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                if haystack[order[mid]][0].total_cmp(key) == std::cmp::Ordering::Less {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }
            // `lo` is the first position in graded order whose key is not
            // less than `needle`; scan the tolerant-equal run from there
            // for the smallest original index (the direct scan's "first
            // occurrence" semantics).
            let mut best: Option<usize> = None;
            let mut i = lo;
            while i < order.len() && haystack[order[i]][0].equal(key, ct) {
                let idx = order[i];
                best = Some(best.map_or(idx, |b| b.min(idx)));
                i += 1;
            }
            best.map(|i| Cell::Int(i as i64 + io)).unwrap_or(Cell::Int(not_found))
        })
        .collect()
}

/// `A⍸B` — `A` is a sorted vector of interval boundaries; for each cell
/// of `B`, report how many boundaries it is greater than or equal to
/// (`⎕IO`-relative), i.e. which half-open interval `[A[i], A[i+1])` it
/// falls into.
pub fn interval_index(a: &Value, b: &Value, cfg: &Config) -> Result<Value> {
    let boundaries: Result<Vec<Cell>> = (0..a.len()).map(|i| a.ravel_at(i)).collect();
    let boundaries = boundaries?;
    let results: Result<Vec<Cell>> = (0..b.len())
        .map(|i| {
            let cell = b.ravel_at(i)?;
            let count = boundaries
                .iter()
                .filter(|bnd| {
                    matches!(
                        bnd.total_cmp(&cell),
                        std::cmp::Ordering::Less | std::cmp::Ordering::Equal
                    )
                })
                .count();
            Ok(Cell::Int(count as i64 - 1 + cfg.io))
        })
        .collect();
    Value::from_ravel(*b.shape(), results?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_reports_not_found_as_length() {
        let cfg = Config::default();
        let a = Value::vector([Cell::Int(10), Cell::Int(20)]);
        let b = Value::vector([Cell::Int(20), Cell::Int(99)]);
        let r = index_of(&a, &b, &cfg).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
        assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(3)));
    }

    #[test]
    fn index_of_own_iota_is_identity() {
        let cfg = Config::default();
        let a = Value::vector((1..=5).map(Cell::Int));
        let r = index_of(&a, &a, &cfg).unwrap();
        for i in 0..5 {
            assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(n) if n == i as i64 + 1));
        }
    }

    #[test]
    fn index_of_graded_path_picks_first_occurrence_like_the_scan() {
        let cfg = Config::default();
        // Unsorted with a duplicate key (5 appears at positions 0 and 3,
        // ⎕IO-relative 1 and 4): both the graded fast path and a direct
        // linear scan must report the *first* occurrence.
        let a = Value::vector([5, 3, 1, 5, 2].map(Cell::Int));
        let b = Value::vector([5, 1, 9].map(Cell::Int));
        let r = index_of(&a, &b, &cfg).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(1)));
        assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(3)));
        assert!(matches!(r.ravel_at(2).unwrap(), Cell::Int(6)));
    }

    #[test]
    fn index_of_matrix_rows_uses_the_direct_scan() {
        let cfg = Config::default();
        let a = Value::from_ravel(
            crate::shape::Shape::new(&[2, 2]).unwrap(),
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)],
        )
        .unwrap();
        let b = Value::from_ravel(
            crate::shape::Shape::new(&[1, 2]).unwrap(),
            vec![Cell::Int(3), Cell::Int(4)],
        )
        .unwrap();
        let r = index_of(&a, &b, &cfg).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
    }
}
