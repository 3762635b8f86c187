//! Visual reading-order comparison and the search/sort helpers built on it.

use std::cmp::Ordering;

use lectern_common::Rect;

/// Reading-order comparison of two boxes: top to bottom, then left to right
/// for boxes sharing a row.
///
/// Boxes with zero area sort after everything else. Two boxes share a row
/// when each one's vertical midpoint lies inside the other's vertical span.
/// Not a total order for pathological overlaps.
pub fn visual_compare(a: &Rect, b: &Rect) -> Ordering {
    match (a.is_zero_area(), b.is_zero_area()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    if b.spans_y(a.mid_y()) && a.spans_y(b.mid_y()) {
        a.center_x().total_cmp(&b.center_x())
    } else {
        a.mid_y().total_cmp(&b.mid_y())
    }
}

/// Index of the first item for which `predicate` holds, or `items.len()`.
///
/// `items` must be partitioned: every item failing the predicate precedes
/// every item satisfying it.
pub fn binary_search_first_item<T>(items: &[T], mut predicate: impl FnMut(&T) -> bool) -> usize {
    items.partition_point(|item| !predicate(item))
}

/// Stable bottom-up merge sort.
///
/// Unlike `slice::sort_by` this never panics when `compare` is not a total
/// order; the result is merely unspecified for the inconsistent pairs.
pub fn stable_sort_by<T: Clone>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut buf = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buf[start..end], &mut compare);
            start = end;
        }
        items.clone_from_slice(&buf);
        width *= 2;
    }
}

fn merge<T: Clone, F: FnMut(&T, &T) -> Ordering>(
    left: &[T],
    right: &[T],
    out: &mut [T],
    compare: &mut F,
) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Ties go left to keep the sort stable.
        let take_left =
            j >= right.len() || (i < left.len() && compare(&right[j], &left[i]) != Ordering::Less);
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}
