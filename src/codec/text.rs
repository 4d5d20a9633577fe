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

//! Hex, base64, and UTF-8 text conversions.
//!
//! Delegates to the `hex`/`base64` crates for this kind of
//! byte-vector-to-text bridge rather than a hand-rolled encoder.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{ErrorCode, Result};
use crate::value::Value;

/// `⎕UCS`-style hex encode: render `v`'s bytes (via
/// [`Value::to_bytes`]) as a lowercase hex character vector.
pub fn to_hex(v: &Value) -> Result<Value> {
    let bytes = v.to_bytes()?;
    Ok(Value::from_str(&hex::encode(bytes)))
}

/// `⎕CR 5`: render `v`'s bytes as an uppercase hex character vector.
pub fn to_hex_upper(v: &Value) -> Result<Value> {
    let bytes = v.to_bytes()?;
    Ok(Value::from_str(&hex::encode_upper(bytes)))
}

/// Parse a hex character vector back into a byte vector value. Accepts
/// either case, matching `⎕CR 5`/`6`'s documented inverse via negated `A`.
pub fn from_hex(v: &Value) -> Result<Value> {
    let s = v.to_rust_string()?;
    let bytes = hex::decode(s.trim()).map_err(|_| ErrorCode::DomainError)?;
    Ok(Value::from_bytes(&bytes))
}

/// Base64-encode `v`'s bytes as a character vector.
pub fn to_base64(v: &Value) -> Result<Value> {
    let bytes = v.to_bytes()?;
    Ok(Value::from_str(&BASE64.encode(bytes)))
}

/// Decode a base64 character vector back into a byte vector value.
pub fn from_base64(v: &Value) -> Result<Value> {
    let s = v.to_rust_string()?;
    let bytes = BASE64.decode(s.trim()).map_err(|_| ErrorCode::DomainError)?;
    Ok(Value::from_bytes(&bytes))
}

/// Decode a UTF-8 byte vector into a character vector (one cell per
/// Unicode scalar value, not per byte).
pub fn utf8_decode(v: &Value) -> Result<Value> {
    let bytes = v.to_bytes()?;
    let s = String::from_utf8(bytes).map_err(|_| ErrorCode::DomainError)?;
    Ok(Value::from_str(&s))
}

/// Encode a character vector into its UTF-8 byte vector.
pub fn utf8_encode(v: &Value) -> Result<Value> {
    let s = v.to_rust_string()?;
    Ok(Value::from_bytes(s.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        let v = Value::from_bytes(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let hex = to_hex(&v).unwrap();
        let back = from_hex(&hex).unwrap();
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn hex_upper_matches_lower_case_insensitively() {
        let v = Value::from_bytes(&[0xDE, 0xAD]);
        let lower = to_hex(&v).unwrap().to_rust_string().unwrap();
        let upper = to_hex_upper(&v).unwrap().to_rust_string().unwrap();
        assert_eq!(lower, "dead");
        assert_eq!(upper, "DEAD");
        assert!(v.equal(&from_hex(&to_hex_upper(&v).unwrap()).unwrap(), 0.0));
    }

    #[test]
    fn base64_round_trips() {
        let v = Value::from_bytes(b"hello, apl");
        let b64 = to_base64(&v).unwrap();
        let back = from_base64(&b64).unwrap();
        assert!(v.equal(&back, 0.0));
    }

    #[test]
    fn utf8_round_trips_non_ascii() {
        let v = Value::from_str("héllo wörld");
        let bytes = utf8_encode(&v).unwrap();
        let back = utf8_decode(&bytes).unwrap();
        assert!(v.equal(&back, 0.0));
    }
}
