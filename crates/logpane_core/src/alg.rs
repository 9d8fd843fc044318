//! Monotonic search and clamping helpers shared by wrapping and hit testing.

/// Find the largest index in `0..=size` whose metric is less than or equal to
/// `target`.
///
/// `metric` must be non-decreasing over `0..=size`. Targets below `metric(0)`
/// return index 0 and targets at or beyond `metric(size)` return `size`; the
/// metric value at the returned index is returned alongside it.
pub fn binary_search<T, F>(size: usize, target: T, mut metric: F) -> (usize, T)
where
    T: PartialOrd + Copy,
    F: FnMut(usize) -> T,
{
    let (mut first, mut first_metric) = (0, metric(0));
    if target < first_metric {
        return (first, first_metric);
    }
    let last_metric = metric(size);
    if last_metric <= target {
        return (size, last_metric);
    }

    let mut last = size;
    while last - first > 1 {
        let mid = first + (last - first) / 2;
        let mid_metric = metric(mid);
        if mid_metric <= target {
            (first, first_metric) = (mid, mid_metric);
        } else {
            last = mid;
        }
    }

    (first, first_metric)
}

/// Limit `value` to the inclusive `[min, max]` interval.
///
/// # Panics
/// Panics when `min > max`; that is a caller bug, not a runtime condition.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    assert!(min <= max, "alg::clamp: want min <= max");
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
