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

//! [`Token`]: the tagged carrier every primitive and operator returns.
//!
//! A closed Rust enum over a scalar result, a pointer, or a suspended
//! computation, consistent with [`crate::cell::Cell`]'s design: a tagged
//! union rather than a handle into a virtual-dispatch hierarchy.

use crate::error::ErrorCode;
use crate::value::Value;

/// What a primitive, operator, or the (external) parser hands back.
///
/// `Function` carries an opaque handle rather than a concrete function
/// pointer type: this core evaluates primitives and operators that are
/// already resolved, and has no notion of a user-defined-function object
/// of its own. Hosts that add user-defined functions supply their own
/// `Function` payload through [`crate::bridge::MacroBridge`].
pub enum Token {
    /// An ordinary result value.
    Value(Value),
    /// A function or operator reference, opaque to this core.
    Function(FunctionRef),
    /// A raised error, not yet unwound to a `Result`. Distinct from
    /// `Result<Token, ErrorCode>` at the Rust level because an error can
    /// travel through the same token channel as an ordinary value
    /// wherever the dispatch contract needs to hand back a token
    /// uniformly, rather than always unwinding through `?` immediately.
    Error(ErrorCode),
    /// No result (e.g. a niladic function called for effect only).
    Void,
    /// Evaluation suspended: the primitive needs to invoke external,
    /// user-defined code before it can continue. The host resumes via
    /// [`crate::bridge::MacroBridge`].
    SiPushed(Suspension),
}

impl Token {
    pub fn is_error(&self) -> bool {
        matches!(self, Token::Error(_))
    }

    /// Unwrap into a `Result`, treating `Error` as the error and
    /// everything else as `Ok`. Callers that can't sensibly continue past
    /// `Void`/`Function`/`SiPushed` should match those variants explicitly
    /// instead of using this helper.
    pub fn into_value(self) -> crate::error::Result<Value> {
        match self {
            Token::Value(v) => Ok(v),
            Token::Error(e) => Err(e),
            _ => Err(ErrorCode::ValueError),
        }
    }
}

/// Opaque reference to a function or operator, resolved by the host.
#[derive(Clone)]
pub struct FunctionRef {
    /// Host-assigned identifier (e.g. an index into the host's symbol
    /// table). This core never interprets it.
    pub id: u64,
}

/// A suspended evaluation, carrying enough state for the host to resume
/// or cancel it.
pub struct Suspension {
    /// Host-defined resumption token, opaque to this core.
    pub resume_id: u64,
    /// The left argument already evaluated before suspension, if any.
    pub pending_left: Option<Value>,
    /// The right argument already evaluated before suspension.
    pub pending_right: Value,
}
