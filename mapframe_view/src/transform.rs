// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::geometry::{clamp_to_range, is_usable_size};

/// Uniform-scale transform from content space into viewport space.
///
/// A content point `c` maps to `scale * c + translate` in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Offset in viewport pixels, applied after scaling.
    pub translate: Vec2,
}

impl ViewTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    /// Creates a transform from a scale and a translation.
    #[must_use]
    pub const fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Returns the equivalent affine matrix.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Maps a content-space point into the viewport.
    #[must_use]
    pub fn apply(self, content_pt: Point) -> Point {
        (content_pt.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Maps a viewport point back into content space.
    #[must_use]
    pub fn invert(self, view_pt: Point) -> Point {
        ((view_pt.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Viewport-space rectangle covered by content of the given size.
    #[must_use]
    pub fn content_rect_in_view(self, content: Size) -> Rect {
        Rect::from_origin_size(self.translate.to_point(), content * self.scale)
    }

    /// Returns a transform that places `content_pt` at `view_pt` with the given scale.
    #[must_use]
    pub fn anchored(scale: f64, content_pt: Point, view_pt: Point) -> Self {
        Self::new(scale, view_pt.to_vec2() - content_pt.to_vec2() * scale)
    }

    /// Linear interpolation of scale and translation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            translate: self.translate.lerp(other.translate, t),
        }
    }

    /// Returns `true` if both transforms agree within `eps`.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.scale - other.scale).abs() <= eps
            && (self.translate.x - other.translate.x).abs() <= eps
            && (self.translate.y - other.translate.y).abs() <= eps
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Formats as an SVG `transform` attribute value.
impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// Scale and translate limits derived from content size vs viewport size.
///
/// The minimum scale is the smallest zoom at which the content still covers
/// the whole viewport; translation is limited so that the viewport never looks
/// past the content edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    content: Size,
    viewport: Size,
    min_scale: f64,
    max_scale: f64,
}

impl Extents {
    /// Computes extents, or `None` if either size is empty or non-finite.
    ///
    /// `min_zoom_multiplier` scales the fit-to-viewport minimum (values below
    /// `1.0` are treated as `1.0`, since zooming out further would expose empty
    /// margins). `max_zoom` is an absolute scale; if it is below the minimum
    /// the extent collapses to the minimum.
    #[must_use]
    pub fn new(
        content: Size,
        viewport: Size,
        min_zoom_multiplier: f64,
        max_zoom: f64,
    ) -> Option<Self> {
        if !is_usable_size(content) || !is_usable_size(viewport) {
            return None;
        }
        let cover = (viewport.width / content.width).max(viewport.height / content.height);
        let min_scale = cover * min_zoom_multiplier.max(1.0);
        let max_scale = if max_zoom.is_finite() {
            max_zoom.max(min_scale)
        } else {
            min_scale
        };
        Some(Self {
            content,
            viewport,
            min_scale,
            max_scale,
        })
    }

    /// Content size these extents were computed for.
    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Viewport size these extents were computed for.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Smallest permitted scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest permitted scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Center of the viewport in viewport coordinates.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5)
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Clamps a transform so that the content covers the viewport.
    #[must_use]
    pub fn clamp(&self, t: ViewTransform) -> ViewTransform {
        let scale = self.clamp_scale(t.scale);
        let lo_x = self.viewport.width - self.content.width * scale;
        let lo_y = self.viewport.height - self.content.height * scale;
        let tx = if t.translate.x.is_finite() {
            t.translate.x
        } else {
            lo_x * 0.5
        };
        let ty = if t.translate.y.is_finite() {
            t.translate.y
        } else {
            lo_y * 0.5
        };
        ViewTransform::new(
            scale,
            Vec2::new(clamp_to_range(tx, lo_x, 0.0), clamp_to_range(ty, lo_y, 0.0)),
        )
    }

    /// The fit transform: minimum scale with the content centered.
    #[must_use]
    pub fn fit_transform(&self) -> ViewTransform {
        let scale = self.min_scale;
        let centered = Vec2::new(
            (self.viewport.width - self.content.width * scale) * 0.5,
            (self.viewport.height - self.content.height * scale) * 0.5,
        );
        self.clamp(ViewTransform::new(scale, centered))
    }

    /// Returns `true` if `t` is within the scale extent and its content rect
    /// covers the whole viewport (within a small tolerance).
    #[must_use]
    pub fn contains(&self, t: ViewTransform) -> bool {
        let extent = 1.0 + self.content.width.max(self.content.height);
        let eps = 1e-9 * (1.0 + self.max_scale) * extent;
        if t.scale < self.min_scale - eps || t.scale > self.max_scale + eps {
            return false;
        }
        let r = t.content_rect_in_view(self.content);
        r.x0 <= eps
            && r.y0 <= eps
            && r.x1 >= self.viewport.width - eps
            && r.y1 >= self.viewport.height - eps
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::{Point, Size, Vec2};

    use super::{Extents, ViewTransform};

    #[test]
    fn apply_and_invert_roundtrip() {
        let t = ViewTransform::new(2.5, Vec2::new(-30.0, 12.0));
        let p = Point::new(7.0, -3.0);
        let back = t.invert(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
        let via_affine = t.to_affine() * p;
        assert!((via_affine.x - t.apply(p).x).abs() < 1e-12);
    }

    #[test]
    fn display_matches_svg_transform_syntax() {
        let t = ViewTransform::new(2.0, Vec2::new(-10.0, 5.5));
        assert_eq!(t.to_string(), "translate(-10,5.5) scale(2)");
    }

    #[test]
    fn min_scale_is_cover_ratio() {
        let e = Extents::new(Size::new(1000.0, 500.0), Size::new(400.0, 300.0), 1.0, 8.0).unwrap();
        // max(400/1000, 300/500) = 0.6
        assert!((e.min_scale() - 0.6).abs() < 1e-12);
        assert_eq!(e.max_scale(), 8.0);
    }

    #[test]
    fn unusable_sizes_yield_no_extents() {
        assert!(Extents::new(Size::ZERO, Size::new(10.0, 10.0), 1.0, 8.0).is_none());
        assert!(Extents::new(Size::new(10.0, 10.0), Size::new(0.0, 10.0), 1.0, 8.0).is_none());
    }

    #[test]
    fn max_zoom_below_cover_collapses_to_min() {
        let e = Extents::new(Size::new(10.0, 10.0), Size::new(200.0, 100.0), 1.0, 8.0).unwrap();
        assert_eq!(e.min_scale(), 20.0);
        assert_eq!(e.max_scale(), 20.0);
    }

    #[test]
    fn clamp_pulls_translate_back_inside() {
        let e = Extents::new(Size::new(1000.0, 1000.0), Size::new(200.0, 100.0), 1.0, 8.0).unwrap();
        let wild = ViewTransform::new(1.0, Vec2::new(500.0, -5000.0));
        let c = e.clamp(wild);
        assert_eq!(c.translate, Vec2::new(0.0, -900.0));
        assert!(e.contains(c));
        assert!(!e.contains(wild));
    }

    #[test]
    fn fit_transform_centers_overflowing_axis() {
        let e = Extents::new(Size::new(1000.0, 500.0), Size::new(400.0, 400.0), 1.0, 8.0).unwrap();
        let fit = e.fit_transform();
        assert!((fit.scale - 0.8).abs() < 1e-12);
        // Height fits exactly, width overflows by 400 and is centered.
        assert!((fit.translate.x + 200.0).abs() < 1e-9);
        assert!(fit.translate.y.abs() < 1e-9);
        assert!(e.contains(fit));
    }

    #[test]
    fn multiplier_below_one_is_ignored() {
        let e = Extents::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0), 0.25, 8.0).unwrap();
        assert_eq!(e.min_scale(), 1.0);
        let e2 = Extents::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0), 2.0, 8.0).unwrap();
        assert_eq!(e2.min_scale(), 2.0);
    }
}
