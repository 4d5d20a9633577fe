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

//! `⎕XML` — XML ↔ `Value` conversion.
//!
//! Works in two passes: tokenize the document into a flat event stream,
//! then fold that stream into a nested element tree. `quick-xml`'s pull
//! parser already gives the tokenize pass; [`to_value`] does the fold.
//!
//! An element becomes a three-cell enclosed vector
//! `[tag, attributes, children]`: `tag` is a character vector, `attributes`
//! is a vector of enclosed `[name, value]` pairs (mirroring `⎕JSON`'s
//! object encoding), and `children` is a vector of enclosed child
//! elements and text-node character vectors.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::value::Value;

/// Parse an XML document into a `Value` tree rooted at its single
/// top-level element.
pub fn to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, Vec<(String, String)>, Vec<Cell>)> = Vec::new();
    let mut root: Option<Cell> = None;

    loop {
        match reader.read_event().map_err(|_| ErrorCode::DomainError)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let mut attrs = Vec::new();
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let val = attr
                        .unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_default();
                    attrs.push((key, val));
                }
                stack.push((name, attrs, Vec::new()));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let mut attrs = Vec::new();
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let val = attr
                        .unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_default();
                    attrs.push((key, val));
                }
                let cell = build_element(name, attrs, Vec::new());
                push_child(&mut stack, &mut root, cell);
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|_| ErrorCode::DomainError)?.into_owned();
                if !text.trim().is_empty() {
                    if let Some((_, _, children)) = stack.last_mut() {
                        children.push(Cell::Pointer(Value::from_str(&text)));
                    }
                }
            }
            Event::End(_) => {
                let (name, attrs, children) = stack.pop().ok_or(ErrorCode::DomainError)?;
                let cell = build_element(name, attrs, children);
                push_child(&mut stack, &mut root, cell);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    match root {
        Some(Cell::Pointer(v)) => Ok(v),
        _ => Err(ErrorCode::DomainError),
    }
}

fn build_element(name: String, attrs: Vec<(String, String)>, children: Vec<Cell>) -> Cell {
    let tag = Value::from_str(&name);
    let attr_cells: Vec<Cell> = attrs
        .into_iter()
        .map(|(k, v)| {
            Cell::Pointer(Value::vector([
                Cell::Pointer(Value::from_str(&k)),
                Cell::Pointer(Value::from_str(&v)),
            ]))
        })
        .collect();
    let element = Value::vector([
        Cell::Pointer(tag),
        Cell::Pointer(Value::vector(attr_cells)),
        Cell::Pointer(Value::vector(children)),
    ]);
    Cell::Pointer(element)
}

fn push_child(
    stack: &mut [(String, Vec<(String, String)>, Vec<Cell>)],
    root: &mut Option<Cell>,
    cell: Cell,
) {
    if let Some((_, _, children)) = stack.last_mut() {
        children.push(cell);
    } else {
        *root = Some(cell);
    }
}

/// Render an element `Value` (as produced by [`to_value`]) back to an
/// XML string.
pub fn from_value(v: &Value) -> Result<String> {
    if v.len() != 3 {
        return Err(ErrorCode::DomainError);
    }
    let tag = as_pointer(&v.ravel_at(0)?)?.to_rust_string()?;
    let attrs = as_pointer(&v.ravel_at(1)?)?;
    let children = as_pointer(&v.ravel_at(2)?)?;

    let mut out = format!("<{tag}");
    for i in 0..attrs.len() {
        let pair = as_pointer(&attrs.ravel_at(i)?)?;
        let key = as_pointer(&pair.ravel_at(0)?)?.to_rust_string()?;
        let val = as_pointer(&pair.ravel_at(1)?)?.to_rust_string()?;
        out.push_str(&format!(" {key}=\"{}\"", escape(&val)));
    }
    if children.is_empty() {
        out.push_str("/>");
        return Ok(out);
    }
    out.push('>');
    for i in 0..children.len() {
        let child = as_pointer(&children.ravel_at(i)?)?;
        if child.len() == 3 {
            out.push_str(&from_value(&child)?);
        } else {
            out.push_str(&escape(&child.to_rust_string()?));
        }
    }
    out.push_str(&format!("</{tag}>"));
    Ok(out)
}

fn as_pointer(c: &Cell) -> Result<Value> {
    match c {
        Cell::Pointer(v) => Ok(v.clone()),
        _ => Err(ErrorCode::DomainError),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
