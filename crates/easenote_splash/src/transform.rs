//! Transform function
//!
//! Maps the current viewport and title measurement to the end state of the
//! splash collapse. Pure and total over validated [`Geometry`].
//!
//! # Layout model
//!
//! The header layer covers the whole viewport. In the splash state the logo
//! is centered exactly in the viewport (matching the native launch image) and
//! the title hangs [`LOGO_TITLE_GAP`] below it. In the docked state the
//! header layer is pulled up until only a band of [`DOCKED_HEADER_HEIGHT`]
//! remains visible under the top inset; the scaled logo sits at the right
//! edge of that band and the scaled title in its middle, both centered on the
//! band's horizontal center line.
//!
//! With `W`/`H` the viewport, `B` the docked band height and `h` the title
//! height:
//!
//! ```text
//! headerOffsetY  = min(0, -H + insetTop + B)
//! logoOffset.x   = max(0, W/2 - (DOCKED_LOGO_HALF_WIDTH + insetRight))
//! bandY          = clamp(insetTop + B/2, 0, H)
//! logoOffset.y   = bandY - headerOffsetY - H/2
//! titleOffsetY   = bandY - headerOffsetY - H/2 - LOGO_SIZE/2 - LOGO_TITLE_GAP - h/2
//! contentOffsetY = 0
//! ```
//!
//! When the header is not clamped, `logoOffset.y` reduces to `H/2 - B/2`.

use crate::measurement::MeasuredContent;
use easenote_animation::Interpolate;
use easenote_core::Vec2;
use easenote_platform::Geometry;

/// Rendered logo edge length in the splash state
pub const LOGO_SIZE: f32 = 150.0;

/// Space between the bottom of the logo and the top of the title
pub const LOGO_TITLE_GAP: f32 = 10.0;

/// Height of the docked header band below the top inset
pub const DOCKED_HEADER_HEIGHT: f32 = 80.5;

/// Logo scale once docked
pub const DOCKED_LOGO_SCALE: f32 = 0.3;

/// Title scale once docked
pub const DOCKED_TITLE_SCALE: f32 = 0.8;

/// Title height used until the rendered title reports its own
pub const FALLBACK_TITLE_HEIGHT: f32 = 30.0;

/// Distance from the right edge of the safe area to the docked logo center
///
/// Half of the scaled logo (22.5) plus a 12.5 margin.
pub const DOCKED_LOGO_HALF_WIDTH: f32 = 35.0;

/// The animated quantities of the splash transition
///
/// Doubles as the live animation value: the driver interpolates all fields
/// from one clock, so they always move in lockstep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformTarget {
    /// Vertical translation of the whole header layer
    pub header_offset_y: f32,
    /// Logo scale about its own center
    pub logo_scale: f32,
    /// Logo translation within the header layer
    pub logo_offset: Vec2,
    /// Title scale about its own center
    pub title_scale: f32,
    /// Title vertical translation within the header layer
    pub title_offset_y: f32,
    /// Vertical translation of the content layer
    pub content_offset_y: f32,
}

impl TransformTarget {
    /// Mount-time state: full-size centered splash, content below the fold
    pub fn initial(geometry: &Geometry) -> Self {
        Self {
            header_offset_y: 0.0,
            logo_scale: 1.0,
            logo_offset: Vec2::ZERO,
            title_scale: 1.0,
            title_offset_y: 0.0,
            content_offset_y: geometry.viewport_height(),
        }
    }
}

impl Interpolate for TransformTarget {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            header_offset_y: self.header_offset_y.lerp(&other.header_offset_y, t),
            logo_scale: self.logo_scale.lerp(&other.logo_scale, t),
            logo_offset: self.logo_offset.lerp(&other.logo_offset, t),
            title_scale: self.title_scale.lerp(&other.title_scale, t),
            title_offset_y: self.title_offset_y.lerp(&other.title_offset_y, t),
            content_offset_y: self.content_offset_y.lerp(&other.content_offset_y, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.header_offset_y.approx_eq(&other.header_offset_y, epsilon)
            && self.logo_scale.approx_eq(&other.logo_scale, epsilon)
            && self.logo_offset.approx_eq(&other.logo_offset, epsilon)
            && self.title_scale.approx_eq(&other.title_scale, epsilon)
            && self.title_offset_y.approx_eq(&other.title_offset_y, epsilon)
            && self.content_offset_y.approx_eq(&other.content_offset_y, epsilon)
    }
}

/// Compute the docked end state for `geometry` and `measured`
pub fn compute_target(geometry: &Geometry, measured: &MeasuredContent) -> TransformTarget {
    let width = geometry.viewport_width();
    let height = geometry.viewport_height();
    let title_height = measured.title_height_or_fallback();

    // Viewports shorter than the band keep the header where it is
    let header_offset_y = (-height + geometry.inset_top() + DOCKED_HEADER_HEIGHT).min(0.0);

    // Narrow viewports keep the logo centered instead of pushing it left
    let logo_offset_x =
        (width / 2.0 - (DOCKED_LOGO_HALF_WIDTH + geometry.inset_right())).max(0.0);

    // Band center line on screen, kept inside the viewport, expressed in
    // header-layer coordinates relative to the splash center
    let band_center_y = (geometry.inset_top() + DOCKED_HEADER_HEIGHT / 2.0).clamp(0.0, height);
    let band_center = band_center_y - header_offset_y - height / 2.0;

    TransformTarget {
        header_offset_y,
        logo_scale: DOCKED_LOGO_SCALE,
        logo_offset: Vec2::new(logo_offset_x, band_center),
        title_scale: DOCKED_TITLE_SCALE,
        title_offset_y: band_center - LOGO_SIZE / 2.0 - LOGO_TITLE_GAP - title_height / 2.0,
        content_offset_y: 0.0,
    }
}
