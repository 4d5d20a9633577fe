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

//! Evaluation core for an ISO/IEC 13751 Extended APL interpreter.
//!
//! This crate implements the data model (arrays of polymorphic cells),
//! the primitive-function kernel, the operator kernel, and the
//! structured-representation codecs. Parsing, `⎕SI` management, the
//! command processor, workspace persistence, and the CLI/`⎕FIO`/`⎕DLX`/
//! `⎕SQL`/`⎕RE` surfaces are a host's responsibility, reached only
//! through [`bridge::MacroBridge`].
//!
//! The data model is a closed sum type over cell variants rather than a
//! class hierarchy or an FFI-bound union, with RAII handle discipline, a
//! hand-written `Error` enum, and a `Result<T>` alias used throughout.

pub mod bridge;
pub mod cell;
pub mod codec;
pub mod config;
pub mod error;
pub mod operator;
#[cfg(feature = "parallel")]
pub mod pool;
pub mod primitive;
pub mod shape;
pub mod token;
pub mod value;

pub use cell::Cell;
pub use config::Config;
pub use error::{ErrorCode, Result};
pub use shape::{Shape, Shape3, MAX_RANK};
pub use token::Token;
pub use value::Value;
