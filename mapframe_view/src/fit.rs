// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds fitting: compute a transform that frames one or more shapes.
//!
//! The calculator works purely in content space and returns an *unclamped*
//! transform. [`ViewportEngine::animate_to`](crate::ViewportEngine::animate_to)
//! clamps it against the current extents before animating.

use kurbo::{Point, Rect, Size};

use crate::geometry::{expand_edges, is_degenerate, is_usable_size, union_bounds};
use crate::transform::ViewTransform;

/// How the symmetric fit padding is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum FitPadding {
    /// `ratio * min(viewport width, viewport height)` on every edge.
    #[default]
    ViewportRelative,
    /// `ratio * union width` on the left/right edges and `ratio * union height`
    /// on the top/bottom edges.
    BoundsRelative,
}

/// Parameters for [`fit_bounds`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// Padding ratio, interpreted according to [`FitOptions::padding`].
    pub padding_ratio: f64,
    /// How the padding ratio is measured.
    pub padding: FitPadding,
    /// Extra padding added to the top edge only, in content units.
    pub vertical_offset: f64,
    /// Upper bound on the fitted scale, independent of the engine's max zoom.
    pub max_fit_scale: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
            padding: FitPadding::ViewportRelative,
            vertical_offset: 0.0,
            max_fit_scale: 4.0,
        }
    }
}

/// Reasons a fit cannot be computed. Callers should skip the reframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// No boxes were supplied.
    #[error("no bounds to fit")]
    NoBounds,
    /// The box at `index` has zero area or non-finite coordinates.
    #[error("bounds at index {index} are degenerate")]
    Degenerate {
        /// Position of the offending box in the input slice.
        index: usize,
    },
    /// The viewport has no usable area.
    #[error("viewport has no usable area")]
    EmptyViewport,
}

/// Padded content-space rectangle that [`fit_bounds`] frames.
///
/// # Errors
///
/// See [`FitError`].
pub fn padded_bounds(
    boxes: &[Rect],
    viewport: Size,
    options: &FitOptions,
) -> Result<Rect, FitError> {
    if let Some(index) = boxes.iter().position(|r| is_degenerate(*r)) {
        return Err(FitError::Degenerate { index });
    }
    let union = union_bounds(boxes.iter().copied()).ok_or(FitError::NoBounds)?;
    if !is_usable_size(viewport) {
        return Err(FitError::EmptyViewport);
    }

    let ratio = options.padding_ratio.max(0.0);
    let (pad_x, pad_y) = match options.padding {
        FitPadding::ViewportRelative => {
            let pad = ratio * viewport.width.min(viewport.height);
            (pad, pad)
        }
        FitPadding::BoundsRelative => (ratio * union.width(), ratio * union.height()),
    };
    let top = pad_y + options.vertical_offset.max(0.0);
    Ok(expand_edges(union, pad_x, top, pad_x, pad_y))
}

/// Computes a transform that centers and scales the given content-space boxes
/// into a viewport of size `viewport`.
///
/// The scale is `min(vw / padded_w, vh / padded_h, max_fit_scale)`, and the
/// padded center lands on the viewport center. The result is not clamped to
/// any engine extents.
///
/// # Errors
///
/// Returns a [`FitError`] for empty or degenerate input, or an unusable viewport.
pub fn fit_bounds(
    boxes: &[Rect],
    viewport: Size,
    options: &FitOptions,
) -> Result<ViewTransform, FitError> {
    let padded = padded_bounds(boxes, viewport, options)?;
    let mut scale = (viewport.width / padded.width()).min(viewport.height / padded.height());
    if options.max_fit_scale.is_finite() && options.max_fit_scale > 0.0 {
        scale = scale.min(options.max_fit_scale);
    }
    let view_center = Point::new(viewport.width * 0.5, viewport.height * 0.5);
    Ok(ViewTransform::anchored(scale, padded.center(), view_center))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{FitError, FitOptions, FitPadding, fit_bounds, padded_bounds};

    fn opts(padding: FitPadding) -> FitOptions {
        FitOptions {
            padding,
            ..FitOptions::default()
        }
    }

    #[test]
    fn bounds_relative_padding_matches_reference_numbers() {
        let boxes = [Rect::new(0.0, 0.0, 100.0, 50.0)];
        let viewport = Size::new(400.0, 400.0);
        let t = fit_bounds(&boxes, viewport, &opts(FitPadding::BoundsRelative)).unwrap();

        let expected = (400.0_f64 / 110.0).min(400.0 / 55.0).min(4.0);
        assert!((t.scale - expected).abs() < 1e-12);
        let c = t.apply(Point::new(50.0, 25.0));
        assert!((c.x - 200.0).abs() < 1e-9);
        assert!((c.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn viewport_relative_padding_uses_short_side() {
        let boxes = [Rect::new(0.0, 0.0, 100.0, 50.0)];
        let viewport = Size::new(400.0, 300.0);
        let padded = padded_bounds(&boxes, viewport, &opts(FitPadding::ViewportRelative)).unwrap();
        // 5% of 300 on each edge.
        assert_eq!(padded, Rect::new(-15.0, -15.0, 115.0, 65.0));

        let t = fit_bounds(&boxes, viewport, &opts(FitPadding::ViewportRelative)).unwrap();
        let expected = (400.0_f64 / 130.0).min(300.0 / 80.0).min(4.0);
        assert!((t.scale - expected).abs() < 1e-12);
    }

    #[test]
    fn vertical_offset_only_grows_top_edge() {
        let options = FitOptions {
            vertical_offset: 30.0,
            padding_ratio: 0.0,
            ..FitOptions::default()
        };
        let padded =
            padded_bounds(&[Rect::new(10.0, 10.0, 20.0, 20.0)], Size::new(100.0, 100.0), &options)
                .unwrap();
        assert_eq!(padded, Rect::new(10.0, -20.0, 20.0, 20.0));
    }

    #[test]
    fn small_shapes_hit_the_fit_cap() {
        let t = fit_bounds(
            &[Rect::new(0.0, 0.0, 1.0, 1.0)],
            Size::new(800.0, 600.0),
            &FitOptions::default(),
        )
        .unwrap();
        assert_eq!(t.scale, 4.0);
    }

    #[test]
    fn multiple_boxes_are_unioned() {
        let boxes = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(90.0, 40.0, 100.0, 50.0),
        ];
        let a = fit_bounds(&boxes, Size::new(400.0, 400.0), &opts(FitPadding::BoundsRelative))
            .unwrap();
        let b = fit_bounds(
            &[Rect::new(0.0, 0.0, 100.0, 50.0)],
            Size::new(400.0, 400.0),
            &opts(FitPadding::BoundsRelative),
        )
        .unwrap();
        assert!(a.approx_eq(b, 1e-12));
    }

    #[test]
    fn degenerate_inputs_report_errors() {
        let viewport = Size::new(100.0, 100.0);
        let options = FitOptions::default();
        assert_eq!(fit_bounds(&[], viewport, &options), Err(FitError::NoBounds));
        assert_eq!(
            fit_bounds(
                &[Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(3.0, 3.0, 3.0, 9.0)],
                viewport,
                &options
            ),
            Err(FitError::Degenerate { index: 1 })
        );
        assert_eq!(
            fit_bounds(&[Rect::new(0.0, 0.0, 5.0, 5.0)], Size::ZERO, &options),
            Err(FitError::EmptyViewport)
        );
    }
}
