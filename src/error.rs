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

//! The error taxonomy of the evaluation core.
//!
//! A flat enum, a hand-written `Display` so error text stays exactly as
//! intended rather than whatever `#[derive(Debug)]` would produce, and
//! `impl std::error::Error` so the type composes with `?` at crate
//! boundaries.

use std::fmt;

/// Every failure mode a primitive, operator, or codec can raise.
///
/// Variant names follow the ISO/IEC 13751 error names rather than
/// shorthand abbreviations, since callers outside this crate need to
/// recognize them as APL errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// A function operand has the wrong valence or tag.
    SyntaxError,
    /// A primitive was called with an unsupported argument pattern
    /// (missing `eval_*` entry point for this valence).
    ValenceError,
    /// Operand rank exceeds permitted bounds.
    RankError,
    /// Conformable lengths differ.
    LengthError,
    /// Axis operand out of range.
    AxisError,
    /// Index out of range.
    IndexError,
    /// Cell type incompatible with the operation, including coercion
    /// failure in the numeric lattice.
    DomainError,
    /// A required operand is missing (e.g. no axis given to `⍤`).
    ValueError,
    /// Allocation failed.
    WsFull,
    /// The interrupt flag was observed between ravel cells.
    Interrupt,
    /// `ErrorCode` plus a one-sentence diagnostic for the user-facing
    /// shell (the `MORE_ERROR` convention).
    MoreError(Box<ErrorCode>, String),
}

impl ErrorCode {
    /// Attach a diagnostic sentence, matching the `MORE_ERROR` convention:
    /// the underlying code is preserved, the message is purely additive.
    pub fn with_diagnostic(self, message: impl Into<String>) -> Self {
        match self {
            ErrorCode::MoreError(code, _) => ErrorCode::MoreError(code, message.into()),
            other => ErrorCode::MoreError(Box::new(other), message.into()),
        }
    }

    /// The error code ignoring any attached diagnostic, for callers that
    /// match on the taxonomy rather than the message.
    pub fn code(&self) -> &ErrorCode {
        match self {
            ErrorCode::MoreError(code, _) => code,
            other => other,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::SyntaxError => f.write_str("SYNTAX ERROR"),
            ErrorCode::ValenceError => f.write_str("VALENCE ERROR"),
            ErrorCode::RankError => f.write_str("RANK ERROR"),
            ErrorCode::LengthError => f.write_str("LENGTH ERROR"),
            ErrorCode::AxisError => f.write_str("AXIS ERROR"),
            ErrorCode::IndexError => f.write_str("INDEX ERROR"),
            ErrorCode::DomainError => f.write_str("DOMAIN ERROR"),
            ErrorCode::ValueError => f.write_str("VALUE ERROR"),
            ErrorCode::WsFull => f.write_str("WS FULL"),
            ErrorCode::Interrupt => f.write_str("INTERRUPT"),
            ErrorCode::MoreError(code, msg) => write!(f, "{code}: {msg}"),
        }
    }
}

impl std::error::Error for ErrorCode {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ErrorCode>;
