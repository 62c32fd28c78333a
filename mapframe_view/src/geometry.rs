// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateless geometry helpers shared by the engine and the fit calculator.

use kurbo::{Affine, Point, Rect, Size};

/// Returns `true` if `size` has a finite, strictly positive width and height.
#[must_use]
pub fn is_usable_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Returns `true` if `rect` has non-finite coordinates or zero area.
#[must_use]
pub fn is_degenerate(rect: Rect) -> bool {
    let finite =
        rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite();
    !finite || rect.width().abs() <= 0.0 || rect.height().abs() <= 0.0
}

/// Union of all rectangles, or `None` if the iterator is empty.
///
/// Inputs are normalized with [`Rect::abs`] first, so boxes with swapped
/// corners still contribute their true extent.
#[must_use]
pub fn union_bounds<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects
        .into_iter()
        .map(|r| r.abs())
        .reduce(|acc, r| acc.union(r))
}

/// Transforms `rect` by `affine` and returns the axis-aligned bounds of the result.
///
/// All four corners are mapped, so the result is also correct for rotated or
/// skewed local-to-content matrices.
#[must_use]
pub fn transform_rect_bounds(affine: Affine, rect: Rect) -> Rect {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
    .map(|p| affine * p);
    let mut min_x = corners[0].x;
    let mut min_y = corners[0].y;
    let mut max_x = corners[0].x;
    let mut max_y = corners[0].y;
    for q in &corners[1..] {
        min_x = min_x.min(q.x);
        min_y = min_y.min(q.y);
        max_x = max_x.max(q.x);
        max_y = max_y.max(q.y);
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Clamps `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this does not panic when the range is inverted; it
/// returns the midpoint instead, which centers content that is smaller than
/// the range it must cover.
#[must_use]
pub fn clamp_to_range(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.max(lo).min(hi)
    }
}

/// Grows `rect` outward by independent amounts on each edge.
#[must_use]
pub fn expand_edges(rect: Rect, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    Rect::new(rect.x0 - left, rect.y0 - top, rect.x1 + right, rect.y1 + bottom)
}
