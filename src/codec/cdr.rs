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

//! CDR (Common Data Representation) binary codec.
//!
//! A record begins with a one-byte cell-kind tag and a one-byte rank,
//! followed by the shape as big-endian `i64` axes, followed by the
//! ravel packed at each cell's own [`crate::cell::Cell::cdr_size`]
//! width. All multi-byte integers are big-endian.

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;
use crate::value::Value;

const TAG_INT: u8 = 0;
const TAG_FLOAT: u8 = 1;
const TAG_COMPLEX: u8 = 2;
const TAG_CHAR: u8 = 3;

/// Serialize `v` into a CDR byte record. Nested (`CT_POINTER`) and
/// `CT_CELLREF` values are not representable on the wire and are
/// rejected with `DomainError`: only simple arrays round-trip through
/// CDR.
pub fn encode(v: &Value) -> Result<Vec<u8>> {
    let ravel = v.ravel_to_vec();
    let tag = cell_tag(ravel.first())?;
    let mut out = Vec::new();
    out.push(tag);
    out.push(v.rank() as u8);
    for &axis in v.shape().axes() {
        out.extend_from_slice(&axis.to_be_bytes());
    }
    for cell in &ravel {
        encode_cell(tag, cell, &mut out)?;
    }
    Ok(out)
}

fn cell_tag(first: Option<&Cell>) -> Result<u8> {
    match first {
        None => Ok(TAG_INT),
        Some(Cell::Int(_)) => Ok(TAG_INT),
        Some(Cell::Float(_)) => Ok(TAG_FLOAT),
        Some(Cell::Complex(_)) => Ok(TAG_COMPLEX),
        Some(Cell::Char(_)) => Ok(TAG_CHAR),
        _ => Err(ErrorCode::DomainError),
    }
}

fn encode_cell(tag: u8, cell: &Cell, out: &mut Vec<u8>) -> Result<()> {
    match (tag, cell) {
        (TAG_INT, Cell::Int(i)) => {
            out.extend_from_slice(&i.to_be_bytes());
            Ok(())
        }
        (TAG_FLOAT, Cell::Float(f)) => {
            out.extend_from_slice(&f.to_be_bytes());
            Ok(())
        }
        (TAG_COMPLEX, Cell::Complex(c)) => {
            out.extend_from_slice(&c.re.to_be_bytes());
            out.extend_from_slice(&c.im.to_be_bytes());
            Ok(())
        }
        (TAG_CHAR, Cell::Char(c)) => {
            out.extend_from_slice(&c.to_be_bytes());
            Ok(())
        }
        _ => Err(ErrorCode::DomainError),
    }
}

/// Parse a CDR byte record back into a `Value`.
///
/// # Errors
/// `DomainError` on a truncated or malformed record.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let mut cursor = 0usize;
    let tag = *bytes.get(cursor).ok_or(ErrorCode::DomainError)?;
    cursor += 1;
    let rank = *bytes.get(cursor).ok_or(ErrorCode::DomainError)? as usize;
    cursor += 1;
    let mut axes = Vec::with_capacity(rank);
    for _ in 0..rank {
        let chunk: [u8; 8] = bytes
            .get(cursor..cursor + 8)
            .ok_or(ErrorCode::DomainError)?
            .try_into()
            .map_err(|_| ErrorCode::DomainError)?;
        axes.push(i64::from_be_bytes(chunk));
        cursor += 8;
    }
    let shape = Shape::new(&axes)?;
    let mut ravel = Vec::with_capacity(shape.volume_usize());
    for _ in 0..shape.volume_usize() {
        ravel.push(decode_cell(tag, bytes, &mut cursor)?);
    }
    Value::from_ravel(shape, ravel)
}

fn decode_cell(tag: u8, bytes: &[u8], cursor: &mut usize) -> Result<Cell> {
    match tag {
        TAG_INT => {
            let chunk: [u8; 8] = bytes
                .get(*cursor..*cursor + 8)
                .ok_or(ErrorCode::DomainError)?
                .try_into()
                .map_err(|_| ErrorCode::DomainError)?;
            *cursor += 8;
            Ok(Cell::Int(i64::from_be_bytes(chunk)))
        }
        TAG_FLOAT => {
            let chunk: [u8; 8] = bytes
                .get(*cursor..*cursor + 8)
                .ok_or(ErrorCode::DomainError)?
                .try_into()
                .map_err(|_| ErrorCode::DomainError)?;
            *cursor += 8;
            Ok(Cell::Float(f64::from_be_bytes(chunk)))
        }
        TAG_COMPLEX => {
            let re_chunk: [u8; 8] = bytes
                .get(*cursor..*cursor + 8)
                .ok_or(ErrorCode::DomainError)?
                .try_into()
                .map_err(|_| ErrorCode::DomainError)?;
            *cursor += 8;
            let im_chunk: [u8; 8] = bytes
                .get(*cursor..*cursor + 8)
                .ok_or(ErrorCode::DomainError)?
                .try_into()
                .map_err(|_| ErrorCode::DomainError)?;
            *cursor += 8;
            Ok(Cell::Complex(num_complex::Complex64::new(
                f64::from_be_bytes(re_chunk),
                f64::from_be_bytes(im_chunk),
            )))
        }
        TAG_CHAR => {
            let chunk: [u8; 4] = bytes
                .get(*cursor..*cursor + 4)
                .ok_or(ErrorCode::DomainError)?
                .try_into()
                .map_err(|_| ErrorCode::DomainError)?;
            *cursor += 4;
            Ok(Cell::Char(i32::from_be_bytes(chunk)))
        }
        _ => Err(ErrorCode::DomainError),
    }
}

/// Pack a `(tag, payload)` pair into a length-prefixed TLV record: a
/// 4-byte big-endian tag, a 4-byte big-endian length, then the payload
/// bytes verbatim.
pub fn pack_tlv(tag: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len());
    out.extend_from_slice(&tag.to_be_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Unpack a TLV record written by [`pack_tlv`], per `do_CR34`.
///
/// # Errors
/// `DomainError` if the record is shorter than its declared length.
pub fn unpack_tlv(bytes: &[u8]) -> Result<(u32, &[u8])> {
    let tag_bytes: [u8; 4] = bytes.get(0..4).ok_or(ErrorCode::DomainError)?.try_into().unwrap();
    let len_bytes: [u8; 4] = bytes.get(4..8).ok_or(ErrorCode::DomainError)?.try_into().unwrap();
    let tag = u32::from_be_bytes(tag_bytes);
    let len = u32::from_be_bytes(len_bytes) as usize;
    let payload = bytes.get(8..8 + len).ok_or(ErrorCode::DomainError)?;
    Ok((tag, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_vector_round_trips() {
        let v = Value::vector([Cell::Int(1), Cell::Int(-2), Cell::Int(3)]);
        let bytes = encode(&v).unwrap();
        let back = decode(&bytes).unwrap();
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn char_matrix_round_trips() {
        let shape = Shape::new(&[2, 2]).unwrap();
        let v = Value::from_ravel(
            shape,
            vec![Cell::Char('a' as i32), Cell::Char('b' as i32), Cell::Char('c' as i32), Cell::Char('d' as i32)],
        )
        .unwrap();
        let bytes = encode(&v).unwrap();
        let back = decode(&bytes).unwrap();
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn tlv_pack_unpack_round_trips() {
        let packed = pack_tlv(0x4150_4C31, b"hello");
        let (tag, payload) = unpack_tlv(&packed).unwrap();
        assert_eq!(tag, 0x4150_4C31);
        assert_eq!(payload, b"hello");
    }
}
