use crate::utils::Float;
use std::cmp::Ordering;

/// Compares floating point numbers, NaN is considered as the greatest value.
#[inline]
pub fn compare_floats(a: Float, b: Float) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Compares two points lexicographically by (y, x). This is the sweep order of the
/// Voronoi engine and the tie-break order of its event queue.
#[inline]
pub fn compare_sweep_order(a: (Float, Float), b: (Float, Float)) -> Ordering {
    compare_floats(a.1, b.1).then_with(|| compare_floats(a.0, b.0))
}
