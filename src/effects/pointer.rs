//! Pointer-driven effects: 3D hover tilt and the cursor-following category image.
//!
//! Both are inert under a compact policy.

use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::animation::tween::{PropertySet, TweenHandle, TweenOptions, Tweener};
use crate::dom::Document;
use crate::foundation::core::{ElementId, Point, Viewport};
use crate::policy::ResponsivePolicy;

/// Degrees of rotation at the viewport edge.
pub const TILT_DEGREES: f64 = 20.0;

/// Per-item rotations of the hover image, cycled when there are more items.
pub const HOVER_ROTATIONS: [f64; 5] = [5.0, -8.0, 12.0, -6.0, 10.0];

/// Half the hover image's side, so the image centers on the cursor.
pub const HOVER_IMAGE_OFFSET: f64 = 125.0;

/// Tilts its targets toward the pointer.
#[derive(Clone, Debug)]
pub struct HoverTilt {
    targets: SmallVec<[ElementId; 4]>,
    enabled: bool,
}

impl HoverTilt {
    /// Tilt for `targets`, enabled only when the policy allows pointer effects.
    pub fn new(targets: &[ElementId], policy: ResponsivePolicy) -> Self {
        Self {
            targets: targets.iter().copied().collect(),
            enabled: policy.pointer_effects_enabled(),
        }
    }

    /// `false` under a compact policy.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rotation pair for a pointer at `position`: `(rotationX, rotationY)` in degrees.
    pub fn rotation_for(position: Point, viewport: Viewport) -> (f64, f64) {
        let n = viewport.normalized(position);
        (-n.y * TILT_DEGREES, n.x * TILT_DEGREES)
    }

    /// Start a short tween toward the rotation for `position`.
    ///
    /// Each call overwrites the previous tilt tween.
    pub fn on_pointer_move(
        &self,
        position: Point,
        viewport: Viewport,
        tweens: &mut dyn Tweener,
    ) -> Option<TweenHandle> {
        if !self.enabled || self.targets.is_empty() {
            return None;
        }
        let (rx, ry) = Self::rotation_for(position, viewport);
        let to: PropertySet = [("rotationX".to_owned(), rx), ("rotationY".to_owned(), ry)]
            .into_iter()
            .collect();
        Some(tweens.animate(&self.targets, to, TweenOptions {
            duration: 0.5,
            ease: Ease::OutCubic,
            overwrite: true,
            ..TweenOptions::default()
        }))
    }
}

/// Image that follows the cursor over a list of items, showing each item's picture.
#[derive(Clone, Debug)]
pub struct HoverImage {
    container: ElementId,
    image: ElementId,
    items: Vec<ElementId>,
    hovering: Option<ElementId>,
    enabled: bool,
}

impl HoverImage {
    /// `container` is moved and rotated; `image` receives the `src` of the hovered item's
    /// `data-image` attribute.
    pub fn new(
        container: ElementId,
        image: ElementId,
        items: Vec<ElementId>,
        policy: ResponsivePolicy,
    ) -> Self {
        Self {
            container,
            image,
            items,
            hovering: None,
            enabled: policy.pointer_effects_enabled(),
        }
    }

    /// Item currently under the pointer.
    pub fn hovering(&self) -> Option<ElementId> {
        self.hovering
    }

    /// Rotation for the item at `index`.
    pub fn rotation(index: usize) -> f64 {
        HOVER_ROTATIONS[index % HOVER_ROTATIONS.len()]
    }

    /// Pointer entered `item`; returns `false` for elements this effect does not track.
    pub fn on_enter(&mut self, item: ElementId, doc: &mut dyn Document) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(index) = self.items.iter().position(|&i| i == item) else {
            return false;
        };
        self.hovering = Some(item);
        if let Some(src) = doc.attr(item, "data-image") {
            doc.set_attr(self.image, "src", &src);
        }
        doc.set_style(self.container, "rotation", Self::rotation(index));
        doc.set_style(self.container, "opacity", 1.0);
        true
    }

    /// Pointer left `item`.
    pub fn on_leave(&mut self, item: ElementId, doc: &mut dyn Document) -> bool {
        if !self.enabled || self.hovering != Some(item) {
            return false;
        }
        self.hovering = None;
        doc.set_style(self.container, "opacity", 0.0);
        true
    }

    /// Follow the pointer while an item is hovered.
    pub fn on_move(&mut self, position: Point, doc: &mut dyn Document) -> bool {
        if !self.enabled || self.hovering.is_none() {
            return false;
        }
        doc.set_style(self.container, "left", position.x - HOVER_IMAGE_OFFSET);
        doc.set_style(self.container, "top", position.y - HOVER_IMAGE_OFFSET);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pointer.rs"]
mod tests;
