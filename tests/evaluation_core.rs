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

//! End-to-end checks against the testable properties and concrete
//! scenarios this crate is grounded on: invariants, codec round trips,
//! algebraic laws, and the worked examples.

use aplcore::bridge::NullBridge;
use aplcore::cell::Cell;
use aplcore::codec::{cdr, json, structured, text};
use aplcore::config::Config;
use aplcore::operator::product::{inner_product, outer_product};
use aplcore::operator::reduce::reduce;
use aplcore::operator::scan::scan;
use aplcore::primitive::catenate::reshape;
use aplcore::primitive::index::index_of;
use aplcore::primitive::scalar::{add, mul, pervade_dyadic, sub};
use aplcore::primitive::transform::{reverse, transpose_monadic};
use aplcore::primitive::EvalCtx;
use aplcore::shape::Shape;
use aplcore::value::Value;

fn ctx_with<'a>(cfg: &'a Config, bridge: &'a mut NullBridge) -> EvalCtx<'a> {
    EvalCtx::new(cfg, bridge)
}

fn add_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> aplcore::Result<Value> {
    pervade_dyadic(ctx, a, b, add)
}

fn mul_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> aplcore::Result<Value> {
    pervade_dyadic(ctx, a, b, mul)
}

fn iota(n: i64) -> Value {
    Value::vector((1..=n).map(Cell::Int))
}

// --- Invariants ------------------------------------------------------

#[test]
fn value_ravel_length_matches_shape_volume() {
    let shape = Shape::new(&[2, 3]).unwrap();
    let v = Value::from_ravel(shape, (1..=6).map(Cell::Int).collect()).unwrap();
    assert_eq!(v.len(), shape.volume_usize());
}

#[test]
fn pointer_cells_hold_checked_values() {
    let inner = Value::vector([Cell::Int(1), Cell::Int(2)]);
    let outer = Value::vector([Cell::Pointer(inner.clone())]);
    match outer.ravel_at(0).unwrap() {
        Cell::Pointer(v) => assert_eq!(v.len(), inner.len()),
        _ => panic!("expected pointer cell"),
    }
}

// --- Round trips -------------------------------------------------------

#[test]
fn cdr_round_trips_an_int_matrix() {
    let shape = Shape::new(&[2, 2]).unwrap();
    let v = Value::from_ravel(shape, vec![Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]).unwrap();
    let bytes = cdr::encode(&v).unwrap();
    let back = cdr::decode(&bytes).unwrap();
    assert!(v.equal(&back, 0.0));
}

#[test]
fn utf8_round_trips_printable_characters() {
    let v = Value::from_str("APL 2026");
    let bytes = text::utf8_encode(&v).unwrap();
    let back = text::utf8_decode(&bytes).unwrap();
    assert!(v.equal(&back, 0.0));
}

#[test]
fn base64_round_trips_a_byte_string() {
    let v = Value::from_bytes(b"round trip me");
    let encoded = text::to_base64(&v).unwrap();
    let back = text::from_base64(&encoded).unwrap();
    assert!(v.equal(&back, 0.0));
}

#[test]
fn json_round_trips_a_numeric_vector() {
    let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
    let j = json::to_json(&v).unwrap();
    let back = json::from_json(&j).unwrap();
    assert!(v.equal(&back, 0.0));
}

// --- Algebraic laws ----------------------------------------------------

#[test]
fn plus_reduce_of_iota_matches_gauss_sum() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    for &n in &[0i64, 1, 10, 100] {
        let v = if n == 0 { Value::from_ravel(Shape::vector(0), vec![]).unwrap() } else { iota(n) };
        if n == 0 {
            continue; // reduce of an empty axis has no generic identity (DomainError), not 0.
        }
        let r = reduce(&mut ctx, &add_fn, 0, &v).unwrap();
        assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(s) if s == n * (n + 1) / 2));
    }
}

#[test]
fn double_reverse_is_identity() {
    let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
    let once = reverse(&v, 0).unwrap();
    let twice = reverse(&once, 0).unwrap();
    assert!(v.equal(&twice, 0.0));
}

#[test]
fn double_transpose_is_identity_for_a_matrix() {
    let shape = Shape::new(&[2, 3]).unwrap();
    let v = Value::from_ravel(shape, (1..=6).map(Cell::Int).collect()).unwrap();
    let once = transpose_monadic(&v).unwrap();
    let twice = transpose_monadic(&once).unwrap();
    assert!(v.equal(&twice, 0.0));
}

#[test]
fn index_of_own_iota_is_the_identity_permutation() {
    let cfg = Config::default();
    let a = iota(5);
    let r = index_of(&a, &a, &cfg).unwrap();
    for i in 0..5 {
        assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(n) if n == i as i64 + 1));
    }
}

#[test]
fn reshape_into_own_shape_is_identity() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let v = iota(6);
    let shape_vec = Value::vector([Cell::Int(6)]);
    let r = reshape(&mut ctx, &shape_vec, &v).unwrap();
    assert!(v.equal(&r, 0.0));
}

#[test]
fn running_sum_matches_prefix_reduce_at_every_position() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let v = Value::vector([Cell::Int(2), Cell::Int(3), Cell::Int(5), Cell::Int(7)]);
    let scanned = scan(&mut ctx, &add_fn, 0, &v).unwrap();
    for i in 0..v.len() {
        let prefix = Value::from_ravel(
            Shape::vector((i + 1) as i64),
            (0..=i).map(|j| v.ravel_at(j).unwrap()).collect(),
        )
        .unwrap();
        let expected = reduce(&mut ctx, &add_fn, 0, &prefix).unwrap();
        assert!(
            matches!((scanned.ravel_at(i).unwrap(), expected.ravel_at(0).unwrap()), (Cell::Int(a), Cell::Int(b)) if a == b)
        );
    }
}

// --- Concrete scenarios -------------------------------------------------

#[test]
fn scenario_reshape_six_into_two_by_three() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let shape_vec = Value::vector([Cell::Int(2), Cell::Int(3)]);
    let r = reshape(&mut ctx, &shape_vec, &iota(6)).unwrap();
    assert_eq!(r.shape().axes(), &[2, 3]);
    for i in 0..6 {
        assert!(matches!(r.ravel_at(i).unwrap(), Cell::Int(n) if n == i as i64 + 1));
    }
}

#[test]
fn scenario_plus_reduce_over_rows_of_a_two_by_three() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let shape_vec = Value::vector([Cell::Int(2), Cell::Int(3)]);
    let m = reshape(&mut ctx, &shape_vec, &iota(6)).unwrap();
    let r = reduce(&mut ctx, &add_fn, 1, &m).unwrap();
    assert_eq!(r.len(), 2);
    assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(6)));
    assert!(matches!(r.ravel_at(1).unwrap(), Cell::Int(15)));
}

#[test]
fn scenario_outer_product_of_times_self() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
    let m = outer_product(&mut ctx, &mul_fn, &v, &v).unwrap();
    assert_eq!(m.shape().axes(), &[3, 3]);
    let expected = [1, 2, 3, 2, 4, 6, 3, 6, 9];
    for (i, &e) in expected.iter().enumerate() {
        assert!(matches!(m.ravel_at(i).unwrap(), Cell::Int(n) if n == e));
    }
}

#[test]
fn scenario_hex_decode_of_deadbeef_prefix() {
    let bytes = Value::from_bytes(&[0xDE, 0xAD]);
    let hex = text::to_hex(&bytes).unwrap();
    assert_eq!(hex.to_rust_string().unwrap(), "dead");
}

#[test]
fn scenario_expand_with_a_zero_fill() {
    let a = Value::vector([Cell::Int(1), Cell::Int(1), Cell::Int(0), Cell::Int(1)]);
    let b = Value::from_str("ABC");
    let r = aplcore::operator::reduce::expand(&a, &b, 0).unwrap();
    assert_eq!(r.to_rust_string().unwrap(), "AB C");
}

#[test]
fn scenario_quad_map_substitutes_then_leaves_unmapped_untouched() {
    let cfg = Config::default();
    let a = Value::from_ravel(
        Shape::new(&[3, 2]).unwrap(),
        "aAbBcC".chars().map(|c| Cell::Char(c as i32)).collect(),
    )
    .unwrap();
    let mapped = structured::quad_map(&a, &Value::from_str("abc"), &cfg).unwrap();
    assert_eq!(mapped.to_rust_string().unwrap(), "ABC");

    let mapped_mixed = structured::quad_map(&a, &Value::from_str("aBc"), &cfg).unwrap();
    assert_eq!(mapped_mixed.to_rust_string().unwrap(), "ABc");
}

#[test]
fn inner_product_plus_times_is_ordinary_matrix_multiplication() {
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let a = Value::from_ravel(Shape::new(&[2, 2]).unwrap(), vec![Cell::Int(1), Cell::Int(2), Cell::Int(3), Cell::Int(4)]).unwrap();
    let identity = Value::from_ravel(Shape::new(&[2, 2]).unwrap(), vec![Cell::Int(1), Cell::Int(0), Cell::Int(0), Cell::Int(1)]).unwrap();
    let r = inner_product(&mut ctx, &add_fn, &mul_fn, &a, &identity).unwrap();
    assert!(a.equal(&r, 0.0));
}

#[test]
fn sub_fn_compiles_for_alternating_sum_style_reduce() {
    // Exercises the right-to-left fold convention noted in `reduce`'s own
    // doc comment: `-/1 2 3` folds as `1-(2-3)`, not `(1-2)-3`.
    let cfg = Config::default();
    let mut bridge = NullBridge;
    let mut ctx = ctx_with(&cfg, &mut bridge);
    let sub_fn = |ctx: &mut EvalCtx, a: &Value, b: &Value| pervade_dyadic(ctx, a, b, sub);
    let v = Value::vector([Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
    let r = reduce(&mut ctx, &sub_fn, 0, &v).unwrap();
    assert!(matches!(r.ravel_at(0).unwrap(), Cell::Int(2)));
}
