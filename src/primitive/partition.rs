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

//! `⊂` (partition/enclose) and `⊃` (pick/disclose).
//!
//! Partition groups the major cells of `B` along its first axis by runs
//! of equal non-zero values in `A`, each run becoming one enclosed
//! (pointer) result cell; pick descends into nested values following a
//! path vector.

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::Value;

/// `⊂B` — monadic enclose: wrap `B` in a single `CT_POINTER` scalar.
/// An already-scalar simple value encloses to itself.
pub fn enclose(b: &Value) -> Value {
    Value::scalar(Cell::Pointer(b.clone()))
}

/// `A⊂B` — partition: `A` assigns each major cell of `B` a non-negative
/// partition number; a run of equal positive numbers becomes one
/// enclosed major cell, zeros drop their corresponding major cell
/// entirely.
pub fn partition(a: &Value, b: &Value) -> Result<Value> {
    let n = if b.rank() == 0 { 1usize } else { b.shape().first_axis() as usize };
    if a.len() != n {
        return Err(ErrorCode::LengthError);
    }
    let stride = if n == 0 { 0 } else { b.len() / n };
    let tags: Result<Vec<i64>> = (0..n).map(|i| a.ravel_at(i)?.to_int_tolerant(0.0)).collect();
    let tags = tags?;

    let mut groups: Vec<Vec<Cell>> = Vec::new();
    let mut current: Vec<Cell> = Vec::new();
    let mut current_tag: i64 = 0;
    let mut in_group = false;
    for (i, &tag) in tags.iter().enumerate() {
        let row: Vec<Cell> = (0..stride).map(|j| b.ravel_at(i * stride + j)).collect::<Result<_>>()?;
        if tag == 0 {
            if in_group {
                groups.push(std::mem::take(&mut current));
                in_group = false;
            }
            continue;
        }
        if in_group && tag == current_tag {
            current.extend(row);
        } else {
            if in_group {
                groups.push(std::mem::take(&mut current));
            }
            current = row;
            current_tag = tag;
            in_group = true;
        }
    }
    if in_group {
        groups.push(current);
    }

    let tail_shape: Vec<i64> = if b.rank() <= 1 {
        vec![]
    } else {
        b.shape().axes()[1..].to_vec()
    };
    let cells: Result<Vec<Cell>> = groups
        .into_iter()
        .map(|g| {
            let rows = if stride == 0 { 0 } else { g.len() / stride };
            let mut shape_axes = vec![rows as i64];
            shape_axes.extend(tail_shape.iter().copied());
            let shape = Shape::new(&shape_axes)?;
            Ok(Cell::Pointer(Value::from_ravel(shape, g)?))
        })
        .collect();
    Ok(Value::vector(cells?))
}

/// `⊃B` — monadic disclose/first: unwrap a one-element pointer, or
/// return the first cell of a simple array's ravel in a rank-0 value.
pub fn disclose(b: &Value) -> Result<Value> {
    if b.is_empty() {
        return Ok(Value::scalar(b.prototype()));
    }
    match b.ravel_at(0)? {
        Cell::Pointer(v) => Ok(v),
        other => Ok(Value::scalar(other)),
    }
}

/// `A⊃B` — pick: descend into `B` following the path described by `A`
/// (a vector of indices, or a scalar for a single level).
pub fn pick(a: &Value, b: &Value, io: i64) -> Result<Value> {
    let path: Vec<i64> = if a.shape().is_scalar() {
        vec![a.ravel_at(0)?.to_int_tolerant(0.0)?]
    } else {
        (0..a.len())
            .map(|i| a.ravel_at(i)?.to_int_tolerant(0.0))
            .collect::<Result<_>>()?
    };
    let mut current = b.clone();
    for raw in path {
        let idx = (raw - io) as i64;
        if idx < 0 || idx as usize >= current.len() {
            return Err(ErrorCode::IndexError);
        }
        match current.ravel_at(idx as usize)? {
            Cell::Pointer(v) => current = v,
            other => return Ok(Value::scalar(other)),
        }
    }
    Ok(current)
}
