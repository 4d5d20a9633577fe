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

//! `⎕JSON` — JSON ↔ `Value` conversion.
//!
//! JSON objects become an enclosed vector of two-element `[key, value]`
//! pairs (there being no native map type in the data model), JSON
//! arrays become an ordinary enclosed-cell vector, and a character
//! vector round-trips to a JSON string. Uses `serde_json`'s `Value` as
//! the wire-side tree, the crate already in the dependency stack for
//! `⎕CR`'s structured sub-functions.

use serde_json::Value as Json;

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::Value;

/// Render `v` as a JSON document.
pub fn to_json(v: &Value) -> Result<Json> {
    if v.shape().rank() <= 1 && v.ravel_to_vec().iter().all(|c| matches!(c, Cell::Char(_))) && !v.is_empty() {
        return Ok(Json::String(v.to_rust_string()?));
    }
    if v.shape().is_scalar() {
        return cell_to_json(&v.ravel_at(0)?);
    }
    let mut arr = Vec::with_capacity(v.len());
    for i in 0..v.len() {
        arr.push(cell_to_json(&v.ravel_at(i)?)?);
    }
    Ok(Json::Array(arr))
}

fn cell_to_json(c: &Cell) -> Result<Json> {
    match c {
        Cell::Int(i) => Ok(Json::Number((*i).into())),
        Cell::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or(ErrorCode::DomainError),
        Cell::Char(ch) => Ok(Json::String(
            char::from_u32(*ch as u32).ok_or(ErrorCode::DomainError)?.to_string(),
        )),
        Cell::Pointer(v) => to_json(v),
        _ => Err(ErrorCode::DomainError),
    }
}

/// Parse a JSON document into a `Value`. Objects become an enclosed
/// vector of `[key, value]` pair values (each itself an enclosed
/// two-element vector), preserving key order.
pub fn from_json(j: &Json) -> Result<Value> {
    match j {
        Json::Null => Ok(Value::from_ravel(Shape::vector(0), vec![])?),
        Json::Bool(b) => Ok(Value::scalar(Cell::Int(*b as i64))),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::scalar(Cell::Int(i)))
            } else {
                Ok(Value::scalar(Cell::Float(n.as_f64().ok_or(ErrorCode::DomainError)?)))
            }
        }
        Json::String(s) => Ok(Value::from_str(s)),
        Json::Array(items) => {
            let values: Result<Vec<Value>> = items.iter().map(from_json).collect();
            let values = values?;
            // An array whose items are all simple scalars becomes a flat
            // simple vector (so `[1,2,3]` round-trips to a plain numeric
            // `Value`, not a vector of enclosed scalars); anything else
            // encloses each item, matching `to_json`'s recursive encoding
            // of `CT_POINTER` cells.
            if values.iter().all(|v| v.shape().is_scalar() && !matches!(v.ravel_at(0), Ok(Cell::Pointer(_)))) {
                let cells: Result<Vec<Cell>> = values.iter().map(|v| v.ravel_at(0)).collect();
                Ok(Value::vector(cells?))
            } else {
                Ok(Value::vector(values.into_iter().map(Cell::Pointer)))
            }
        }
        Json::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (k, val) in map {
                let key = Value::from_str(k);
                let value = from_json(val)?;
                let pair = Value::vector([Cell::Pointer(key), Cell::Pointer(value)]);
                pairs.push(Cell::Pointer(pair));
            }
            Ok(Value::vector(pairs))
        }
    }
}
