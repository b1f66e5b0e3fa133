use crate::test_fixture::SCALAR_18;
use soroban_fixed_point_math::FixedPoint;

pub fn assert_approx_eq_abs(a: i128, b: i128, delta: i128) {
    assert!(
        a > b - delta && a < b + delta,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        delta
    );
}

/// Assert `a` is within `delta` of `b`, where `delta` is a fraction of `b`
/// with 18 decimals
pub fn assert_approx_eq_rel(a: i128, b: i128, delta: i128) {
    let bound = b.fixed_mul_floor(delta, SCALAR_18).unwrap();
    assert!(
        a > b - bound && a < b + bound,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        delta
    );
}
