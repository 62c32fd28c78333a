// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectable shapes of a content layer and their content-space bounds.
//!
//! A manifest is built once when content loads. Each element contributes its
//! local bounding box and the matrix that maps its local coordinates into
//! content space; the manifest stores the transformed bounds so fitting never
//! has to touch the source image again.

use core::borrow::Borrow;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Affine, Rect, Size};
use mapframe_selection::codec;
use mapframe_view::geometry::{is_degenerate, transform_rect_bounds};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a selectable region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Wraps an element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShapeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One element of the source image, before filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeElement {
    /// Element id.
    pub id: String,
    /// Bounding box in the element's local coordinates.
    pub local_bbox: Rect,
    /// Maps local coordinates into content space.
    pub local_to_content: Affine,
}

impl ShapeElement {
    /// Creates an element description.
    pub fn new(id: impl Into<String>, local_bbox: Rect, local_to_content: Affine) -> Self {
        Self {
            id: id.into(),
            local_bbox,
            local_to_content,
        }
    }
}

/// A selectable shape with its content-space bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeEntry {
    id: ShapeId,
    local_bbox: Rect,
    local_to_content: Affine,
    bounds: Rect,
}

impl ShapeEntry {
    /// The shape id.
    #[must_use]
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// Bounding box in local coordinates.
    #[must_use]
    pub fn local_bbox(&self) -> Rect {
        self.local_bbox
    }

    /// Local-to-content matrix.
    #[must_use]
    pub fn local_to_content(&self) -> Affine {
        self.local_to_content
    }

    /// Axis-aligned bounds in content space (all four local corners mapped).
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Selectable shapes of one content layer, in document order.
#[derive(Clone, Debug, Default)]
pub struct ShapeManifest {
    entries: Vec<ShapeEntry>,
    index: HashMap<ShapeId, usize>,
}

impl ShapeManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manifest from the elements whose id contains `marker`.
    ///
    /// An empty marker accepts every element. Elements are skipped when their
    /// id cannot be persisted (empty, or containing the share-link delimiter),
    /// when their bounds are degenerate, or when the id was already seen.
    pub fn from_elements<I>(elements: I, marker: &str) -> Self
    where
        I: IntoIterator<Item = ShapeElement>,
    {
        let mut manifest = Self::new();
        for element in elements {
            if !element.id.contains(marker) {
                continue;
            }
            manifest.insert(element);
        }
        tracing::debug!(shapes = manifest.len(), marker, "shape manifest built");
        manifest
    }

    /// Adds one element. Returns `true` if it was accepted.
    pub fn insert(&mut self, element: ShapeElement) -> bool {
        let ShapeElement {
            id,
            local_bbox,
            local_to_content,
        } = element;
        if !codec::is_valid_token(&id) {
            tracing::warn!(id = %id, "skipping shape: id cannot be persisted");
            return false;
        }
        if self.index.contains_key(id.as_str()) {
            tracing::debug!(id = %id, "skipping shape: duplicate id");
            return false;
        }
        let bounds = transform_rect_bounds(local_to_content, local_bbox);
        if is_degenerate(bounds) {
            tracing::debug!(id = %id, ?bounds, "skipping shape: degenerate bounds");
            return false;
        }
        let id = ShapeId(id);
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(ShapeEntry {
            id,
            local_bbox,
            local_to_content,
            bounds,
        });
        true
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` names a shape.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up a shape.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ShapeEntry> {
        self.index.get(id).map(|&idx| &self.entries[idx])
    }

    /// Content-space bounds of a shape.
    #[must_use]
    pub fn content_bounds(&self, id: &str) -> Option<Rect> {
        self.get(id).map(ShapeEntry::bounds)
    }

    /// Shapes in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, ShapeEntry> {
        self.entries.iter()
    }
}

/// A content layer: its measured size and selectable shapes.
#[derive(Clone, Debug)]
pub struct MapContent {
    /// Width and height of the whole content.
    pub size: Size,
    /// Selectable shapes.
    pub manifest: ShapeManifest,
}

impl MapContent {
    /// Pairs a content size with its manifest.
    #[must_use]
    pub fn new(size: Size, manifest: ShapeManifest) -> Self {
        Self { size, manifest }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Rect, Vec2};

    use super::{ShapeElement, ShapeManifest};

    fn element(id: &str, bbox: Rect) -> ShapeElement {
        ShapeElement::new(id, bbox, Affine::IDENTITY)
    }

    #[test]
    fn marker_filters_elements() {
        let manifest = ShapeManifest::from_elements(
            [
                element("click-a", Rect::new(0.0, 0.0, 10.0, 10.0)),
                element("background", Rect::new(0.0, 0.0, 100.0, 100.0)),
                element("shop-b", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ],
            "click",
        );
        assert_eq!(manifest.len(), 1);
        assert!(manifest.contains("click-a"));
        assert!(!manifest.contains("background"));

        let all = ShapeManifest::from_elements([element("x", Rect::new(0.0, 0.0, 1.0, 1.0))], "");
        assert!(all.contains("x"));
    }

    #[test]
    fn bounds_are_mapped_into_content_space() {
        let affine = Affine::translate(Vec2::new(100.0, 50.0)) * Affine::scale(2.0);
        let manifest = ShapeManifest::from_elements(
            [ShapeElement::new(
                "click-1",
                Rect::new(1.0, 2.0, 3.0, 4.0),
                affine,
            )],
            "click",
        );
        assert_eq!(
            manifest.content_bounds("click-1"),
            Some(Rect::new(102.0, 54.0, 106.0, 58.0))
        );
        let entry = manifest.get("click-1").unwrap();
        assert_eq!(entry.local_bbox(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(entry.local_to_content(), affine);
    }

    #[test]
    fn rotated_bounds_cover_all_corners() {
        let affine = Affine::rotate(core::f64::consts::FRAC_PI_2);
        let manifest = ShapeManifest::from_elements(
            [ShapeElement::new("click-r", Rect::new(0.0, 0.0, 4.0, 2.0), affine)],
            "click",
        );
        let b = manifest.content_bounds("click-r").unwrap();
        assert!((b.x0 + 2.0).abs() < 1e-9 && b.x1.abs() < 1e-9);
        assert!(b.y0.abs() < 1e-9 && (b.y1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn unusable_elements_are_skipped() {
        let manifest = ShapeManifest::from_elements(
            [
                element("click-a,b", Rect::new(0.0, 0.0, 1.0, 1.0)),
                element("click-flat", Rect::new(0.0, 0.0, 5.0, 0.0)),
                element("click-ok", Rect::new(0.0, 0.0, 1.0, 1.0)),
                element("click-ok", Rect::new(0.0, 0.0, 9.0, 9.0)),
            ],
            "click",
        );
        assert_eq!(manifest.len(), 1);
        assert_eq!(
            manifest.content_bounds("click-ok"),
            Some(Rect::new(0.0, 0.0, 1.0, 1.0))
        );
        let ids: Vec<_> = manifest.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, ["click-ok"]);
    }
}
