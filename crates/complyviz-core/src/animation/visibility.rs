//! Viewport visibility detection
//!
//! A detector is attached to one laid-out element. The host reports the
//! element's rectangle and the viewport on every layout pass; the detector
//! latches to visible the first time the on-screen fraction of the element
//! reaches the threshold and stays visible for the rest of its life.

use crate::config::AnimationConfig;
use crate::{Error, Result};

/// Axis-aligned rectangle in page coordinates (cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LayoutRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Grow by `margin` on every side; a negative margin shrinks
    pub fn expand(&self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    pub fn intersection(&self, other: &LayoutRect) -> Option<LayoutRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(LayoutRect::new(left, top, right - left, bottom - top))
    }
}

/// Fraction of `element` inside `viewport`, in [0, 1]
///
/// A zero-area element counts as fully visible when it touches the viewport.
pub fn intersection_ratio(element: &LayoutRect, viewport: &LayoutRect) -> f64 {
    let Some(overlap) = element.intersection(viewport) else {
        return 0.0;
    };
    let area = element.area();
    if area == 0 {
        return 1.0;
    }
    overlap.area() as f64 / area as f64
}

/// One-shot "has been seen" latch for a single element
#[derive(Debug, Clone)]
pub struct VisibilityDetector {
    threshold: f64,
    root_margin: i32,
    visible: bool,
    last_ratio: f64,
}

impl VisibilityDetector {
    pub fn new(threshold: f64, root_margin: i32) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "visibility threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            root_margin,
            visible: false,
            last_ratio: 0.0,
        })
    }

    pub fn from_config(config: &AnimationConfig) -> Result<Self> {
        Self::new(config.visibility_threshold, config.root_margin)
    }

    /// Report the current layout; returns true only on the observation that
    /// flips the signal to visible
    ///
    /// `element` is `None` while the element has not been laid out, which
    /// leaves the signal untouched.
    pub fn observe(&mut self, element: Option<LayoutRect>, viewport: LayoutRect) -> bool {
        let Some(element) = element else {
            return false;
        };
        let root = viewport.expand(self.root_margin);
        self.last_ratio = intersection_ratio(&element, &root);
        if self.visible {
            return false;
        }
        // A zero threshold still needs the element to touch the viewport
        let touching = element.intersection(&root).is_some();
        if touching && self.last_ratio >= self.threshold {
            self.visible = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn root_margin(&self) -> i32 {
        self.root_margin
    }

    /// Ratio computed by the latest observation
    pub fn last_ratio(&self) -> f64 {
        self.last_ratio
    }
}
