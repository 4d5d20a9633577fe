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

//! Worker-pool fast path for scalar primitives.
//!
//! Uses `std::thread::scope` to fork a fixed set of worker threads per
//! call and join on them before returning, giving a plain fork/join
//! shape without unsafe thread lifetime management.
//!
//! Only compiled under the `parallel` feature — a purely sequential
//! evaluator is a conforming implementation.

use std::sync::atomic::{AtomicBool, Ordering};

/// Splits `len` elements into `parts` contiguous chunks and runs `work` on
/// each chunk concurrently, joining before returning. `work` receives the
/// chunk's starting offset and its length.
///
/// Chunk count is `min(parts, len)`, so a `len` below `parts` runs fewer,
/// exactly-fitting chunks rather than spawning empty ones.
pub fn fork_join<F>(len: usize, parts: usize, work: F)
where
    F: Fn(usize, usize) + Sync,
{
    if len == 0 {
        return;
    }
    let parts = parts.max(1).min(len);
    let base = len / parts;
    let extra = len % parts;

    std::thread::scope(|scope| {
        let mut offset = 0usize;
        for i in 0..parts {
            let this_len = base + usize::from(i < extra);
            let this_offset = offset;
            offset += this_len;
            let work = &work;
            scope.spawn(move || work(this_offset, this_len));
        }
    });
}

/// Number of worker threads to use given a configured `worker_count`
/// (`0` means auto-detect from `std::thread::available_parallelism`).
pub fn effective_worker_count(worker_count: usize) -> usize {
    if worker_count > 0 {
        return worker_count;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A cooperative cancellation flag shared between the calling thread and
/// any spawned workers, polled the same way `MacroBridge::interrupted`
/// is polled at the single-threaded call sites. Workers check it between
/// chunks rather than cells, since a chunk is already the unit of
/// parallel work.
#[derive(Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag(AtomicBool::new(false))
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn fork_join_covers_every_element_exactly_once() {
        let seen = Mutex::new(vec![false; 37]);
        fork_join(37, 4, |offset, len| {
            let mut seen = seen.lock().unwrap();
            for i in offset..offset + len {
                assert!(!seen[i], "index {i} visited twice");
                seen[i] = true;
            }
        });
        assert!(seen.into_inner().unwrap().into_iter().all(|b| b));
    }

    #[test]
    fn fork_join_handles_fewer_elements_than_parts() {
        let seen = Mutex::new(vec![false; 2]);
        fork_join(2, 8, |offset, len| {
            let mut seen = seen.lock().unwrap();
            for i in offset..offset + len {
                seen[i] = true;
            }
        });
        assert!(seen.into_inner().unwrap().into_iter().all(|b| b));
    }

    #[test]
    fn cancel_flag_round_trips() {
        let flag = CancelFlag::new();
        assert!(!flag.is_set());
        flag.set();
        assert!(flag.is_set());
    }
}
