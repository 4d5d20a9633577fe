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

//! [`Value`]: a shaped array of [`Cell`]s.
//!
//! A cheap-to-clone handle (`Rc`, since this core is single-threaded by
//! construction) wrapping an inner struct that owns the actual storage,
//! with construction going through a checked builder rather than public
//! field access.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::Cell;
use crate::error::{ErrorCode, Result};
use crate::shape::Shape;

/// The data behind a [`Value`] handle.
///
/// `ravel` is a `RefCell` rather than a plain `Vec` for two reasons:
/// the construction cursor ([`ValueBuilder`]) needs to write cells one at
/// a time into an otherwise-shared handle, and selective assignment
/// through a `Cell::CellRef` needs to mutate a single cell of an
/// otherwise-immutable array. Both are narrow, well-scoped uses of
/// interior mutability, not a general mutable-array design.
struct ValueInner {
    shape: Shape,
    ravel: RefCell<Vec<Cell>>,
    /// Computed lazily the first time it's asked for; nothing requires
    /// the prototype to be precomputed eagerly.
    prototype: RefCell<Option<Cell>>,
}

/// A reference-counted handle to a shaped array of cells.
///
/// Cloning a `Value` is a refcount bump over a shared handle, not a
/// deep copy of its storage.
#[derive(Clone)]
pub struct Value(Rc<ValueInner>);

impl Value {
    /// Access the underlying `Rc` for identity comparisons, used by
    /// `Cell::CellRef` equality and `Cell::equal`'s pointer-identity tie.
    pub(crate) fn inner(&self) -> &Rc<ValueInner> {
        &self.0
    }

    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    pub fn rank(&self) -> usize {
        self.0.shape.rank()
    }

    /// Number of cells in the ravel; equals `shape().volume_usize()`.
    pub fn len(&self) -> usize {
        self.0.ravel.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the cell at flat index `i`.
    ///
    /// # Errors
    /// `IndexError` if `i` is out of bounds.
    pub fn ravel_at(&self, i: usize) -> Result<Cell> {
        self.0
            .ravel
            .borrow()
            .get(i)
            .cloned()
            .ok_or(ErrorCode::IndexError)
    }

    /// Snapshot the whole ravel as an owned `Vec`, for primitives that need
    /// to scan the full array (e.g. grade, CDR encoding).
    pub fn ravel_to_vec(&self) -> Vec<Cell> {
        self.0.ravel.borrow().clone()
    }

    /// Overwrite the cell at flat index `i` with `cell`. This is the only
    /// mutation path after construction, used by selective assignment
    /// through a `Cell::CellRef`.
    ///
    /// # Errors
    /// `IndexError` if `i` is out of bounds.
    pub fn set_at(&self, i: usize, cell: Cell) -> Result<()> {
        let mut ravel = self.0.ravel.borrow_mut();
        if i >= ravel.len() {
            return Err(ErrorCode::IndexError);
        }
        ravel[i] = cell;
        *self.0.prototype.borrow_mut() = None;
        Ok(())
    }

    /// The fill cell used when extending this value (take past its
    /// length, reshape with too few cells, etc). For an empty
    /// pointer-typed array the prototype recurses into the element type
    /// of the (empty) nested values; for everything else it's the
    /// type's own zero/blank.
    pub fn prototype(&self) -> Cell {
        if let Some(c) = self.0.prototype.borrow().as_ref() {
            return c.clone();
        }
        let ravel = self.0.ravel.borrow();
        let proto = match ravel.first() {
            Some(c) => c.zero_like(),
            None => Cell::Int(0),
        };
        *self.0.prototype.borrow_mut() = Some(proto.clone());
        proto
    }

    /// Build an empty value of the same cell-kind as `self`, used by
    /// `Cell::zero_like` for nested (pointer) prototypes.
    pub fn prototype_value(&self) -> Value {
        let proto = self.prototype();
        Value::scalar(proto)
    }

    /// A rank-0 value wrapping a single cell.
    pub fn scalar(cell: Cell) -> Value {
        Value(Rc::new(ValueInner {
            shape: Shape::SCALAR,
            ravel: RefCell::new(vec![cell]),
            prototype: RefCell::new(None),
        }))
    }

    /// Build a value from a shape and a ravel, checking the invariant that
    /// `ravel.len() == shape.volume()`.
    ///
    /// # Errors
    /// `LengthError` if the ravel length doesn't match the shape's volume.
    pub fn from_ravel(shape: Shape, ravel: Vec<Cell>) -> Result<Value> {
        if ravel.len() != shape.volume_usize() {
            return Err(ErrorCode::LengthError);
        }
        Ok(Value(Rc::new(ValueInner {
            shape,
            ravel: RefCell::new(ravel),
            prototype: RefCell::new(None),
        })))
    }

    /// A vector value built from an iterator of cells.
    pub fn vector(cells: impl IntoIterator<Item = Cell>) -> Value {
        let ravel: Vec<Cell> = cells.into_iter().collect();
        let shape = Shape::vector(ravel.len() as i64);
        Value(Rc::new(ValueInner {
            shape,
            ravel: RefCell::new(ravel),
            prototype: RefCell::new(None),
        }))
    }

    /// Structural equality at comparison tolerance `ct`: same shape, and
    /// every cell equal pairwise (`Cell::equal` lifted to whole values).
    pub fn equal(&self, other: &Value, ct: f64) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        if self.shape() != other.shape() {
            return false;
        }
        let a = self.0.ravel.borrow();
        let b = other.0.ravel.borrow();
        a.iter().zip(b.iter()).all(|(x, y)| x.equal(y, ct))
    }

    /// Reshape into a `char`-cell vector holding the UTF-8 bytes of `s`,
    /// one byte per cell (used by codecs that need a raw byte vector).
    pub fn from_bytes(bytes: &[u8]) -> Value {
        Value::vector(bytes.iter().map(|&b| Cell::Char(b as i32)))
    }

    /// Build a character vector from a `&str`, one Unicode scalar value
    /// per cell.
    pub fn from_str(s: &str) -> Value {
        Value::vector(s.chars().map(|c| Cell::Char(c as i32)))
    }

    /// Render a character vector back to a Rust `String`.
    ///
    /// # Errors
    /// `DomainError` if any cell is not a `CT_CHAR` cell holding a valid
    /// Unicode scalar value.
    pub fn to_rust_string(&self) -> Result<String> {
        let ravel = self.0.ravel.borrow();
        let mut s = String::with_capacity(ravel.len());
        for cell in ravel.iter() {
            match cell {
                Cell::Char(c) => {
                    let ch = char::from_u32(*c as u32).ok_or(ErrorCode::DomainError)?;
                    s.push(ch);
                }
                _ => return Err(ErrorCode::DomainError),
            }
        }
        Ok(s)
    }

    /// Collect this value's cells as raw bytes, truncating/validating each
    /// cell through [`Cell::get_byte_value`].
    ///
    /// # Errors
    /// `DomainError` if any cell doesn't fit in a byte.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.0
            .ravel
            .borrow()
            .iter()
            .map(Cell::get_byte_value)
            .collect()
    }
}

/// A monotonic write cursor over a not-yet-shared value under
/// construction, used by primitives that build a result cell by cell
/// (catenate, reshape, take/drop) rather than all at once from a `Vec`.
pub struct ValueBuilder {
    shape: Shape,
    ravel: Vec<Cell>,
}

impl ValueBuilder {
    pub fn new(shape: Shape) -> Self {
        ValueBuilder {
            ravel: Vec::with_capacity(shape.volume_usize()),
            shape,
        }
    }

    /// Push the next cell. Panics if more cells are pushed than the target
    /// shape's volume — a programmer error in the calling primitive, not a
    /// recoverable user-facing condition.
    pub fn push(&mut self, cell: Cell) {
        assert!(
            self.ravel.len() < self.shape.volume_usize(),
            "ValueBuilder overfilled"
        );
        self.ravel.push(cell);
    }

    pub fn remaining(&self) -> usize {
        self.shape.volume_usize() - self.ravel.len()
    }

    /// Finish construction.
    ///
    /// # Errors
    /// `LengthError` if fewer cells were pushed than the shape's volume.
    pub fn finish(self) -> Result<Value> {
        Value::from_ravel(self.shape, self.ravel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_has_volume_one() {
        let v = Value::scalar(Cell::Int(42));
        assert_eq!(v.len(), 1);
        assert!(v.shape().is_scalar());
    }

    #[test]
    fn from_ravel_checks_length() {
        let shape = Shape::new(&[2, 2]).unwrap();
        assert_eq!(
            Value::from_ravel(shape, vec![Cell::Int(1)]).unwrap_err(),
            ErrorCode::LengthError
        );
    }

    #[test]
    fn string_round_trips() {
        let v = Value::from_str("hello");
        assert_eq!(v.to_rust_string().unwrap(), "hello");
    }

    #[test]
    fn prototype_of_int_vector_is_zero() {
        let v = Value::vector([Cell::Int(5), Cell::Int(6)]);
        assert!(matches!(v.prototype(), Cell::Int(0)));
    }

    #[test]
    fn set_at_mutates_in_place() {
        let v = Value::vector([Cell::Int(1), Cell::Int(2)]);
        v.set_at(0, Cell::Int(99)).unwrap();
        assert!(matches!(v.ravel_at(0).unwrap(), Cell::Int(99)));
    }

    #[test]
    fn builder_rejects_overfill() {
        let shape = Shape::vector(1);
        let mut b = ValueBuilder::new(shape);
        b.push(Cell::Int(1));
        assert_eq!(b.remaining(), 0);
    }
}
