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

//! The host collaboration boundary: everything this core deliberately
//! does not own — parsing, `⎕SI`, the command processor, workspace
//! persistence, `⎕FIO`/`⎕DLX`/`⎕SQL`/`⎕RE` — is represented only as a
//! trait the host implements.
//!
//! A host context owns whatever heap and symbol table it needs and is
//! passed by reference into every evaluation entry point rather than
//! reached for as ambient global state.

use crate::error::Result;
use crate::token::{FunctionRef, Suspension};
use crate::value::Value;

/// Callback surface a host implements to resume suspended evaluation and
/// to resolve the function/operator references this core treats as
/// opaque.
pub trait MacroBridge {
    /// Invoke the user-defined function referenced by `f` with the given
    /// arguments, returning its result once it completes synchronously.
    /// Hosts whose user-defined functions can themselves suspend should
    /// return `Err` from the call site and re-enter through
    /// [`MacroBridge::resume`] once the nested evaluation settles.
    fn invoke(&mut self, f: &FunctionRef, left: Option<&Value>, right: &Value) -> Result<Value>;

    /// Resume a suspension previously returned as `Token::SiPushed`, now
    /// that the host has a result for the evaluation that caused it.
    fn resume(&mut self, suspension: Suspension, result: Value) -> Result<Value>;

    /// Poll whether the user requested cancellation. Checked by this core
    /// between cells of long-running primitives; hosts with no
    /// interactive cancellation source can always return `false`.
    fn interrupted(&self) -> bool {
        false
    }
}

/// A [`MacroBridge`] that never suspends and never cancels, for embedding
/// this core in a host with no user-defined functions (e.g. a pure
/// array-processing pipeline), where a minimal default context is
/// enough for non-interactive use.
#[derive(Default)]
pub struct NullBridge;

impl MacroBridge for NullBridge {
    fn invoke(&mut self, _f: &FunctionRef, _left: Option<&Value>, _right: &Value) -> Result<Value> {
        Err(crate::error::ErrorCode::ValenceError)
    }

    fn resume(&mut self, _suspension: Suspension, result: Value) -> Result<Value> {
        Ok(result)
    }
}
