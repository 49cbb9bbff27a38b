//! Viewport geometry snapshots

use crate::error::{PlatformError, Result};
use easenote_core::{EdgeInsets, Rect, Size};

/// Device orientation derived from the viewport aspect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Immutable viewport + safe-area snapshot
///
/// Produced by the host whenever the window is resized, rotated or its safe
/// area changes. Construction validates the snapshot, so every `Geometry` in
/// the program has a positive, finite viewport and finite non-negative insets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    viewport: Size,
    insets: EdgeInsets,
}

impl Geometry {
    /// Create a validated snapshot
    ///
    /// Returns [`PlatformError::InvalidGeometry`] for a non-positive or
    /// non-finite viewport, or for negative or non-finite insets.
    pub fn new(viewport_width: f32, viewport_height: f32, insets: EdgeInsets) -> Result<Self> {
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            return Err(PlatformError::InvalidGeometry(format!(
                "viewport width must be positive, got {viewport_width}"
            )));
        }
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return Err(PlatformError::InvalidGeometry(format!(
                "viewport height must be positive, got {viewport_height}"
            )));
        }
        for (edge, value) in [
            ("top", insets.top),
            ("bottom", insets.bottom),
            ("left", insets.left),
            ("right", insets.right),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PlatformError::InvalidGeometry(format!(
                    "{edge} inset must be non-negative, got {value}"
                )));
            }
        }

        Ok(Self {
            viewport: Size::new(viewport_width, viewport_height),
            insets,
        })
    }

    /// Snapshot with no safe-area insets
    pub fn without_insets(viewport_width: f32, viewport_height: f32) -> Result<Self> {
        Self::new(viewport_width, viewport_height, EdgeInsets::ZERO)
    }

    /// Same insets, new viewport size (rotation, split-screen resize)
    pub fn with_viewport(&self, viewport_width: f32, viewport_height: f32) -> Result<Self> {
        Self::new(viewport_width, viewport_height, self.insets)
    }

    /// Same viewport, new insets
    pub fn with_insets(&self, insets: EdgeInsets) -> Result<Self> {
        Self::new(self.viewport.width, self.viewport.height, insets)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport.width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport.height
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    pub fn inset_top(&self) -> f32 {
        self.insets.top
    }

    pub fn inset_bottom(&self) -> f32 {
        self.insets.bottom
    }

    pub fn inset_left(&self) -> f32 {
        self.insets.left
    }

    pub fn inset_right(&self) -> f32 {
        self.insets.right
    }

    /// The full viewport as a rect at the origin
    pub fn bounds(&self) -> Rect {
        self.viewport.to_rect()
    }

    /// The region not covered by notches, bars or indicators
    pub fn safe_area(&self) -> Rect {
        self.bounds().inset_by(self.insets)
    }

    /// Size of [`safe_area`](Self::safe_area)
    pub fn safe_size(&self) -> Size {
        self.safe_area().size
    }

    /// Portrait when the viewport is at least as tall as it is wide
    pub fn orientation(&self) -> Orientation {
        if self.viewport.height >= self.viewport.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    pub fn is_portrait(&self) -> bool {
        self.orientation() == Orientation::Portrait
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation() == Orientation::Landscape
    }
}
