//! Window abstraction

use crate::error::Result;
use crate::geometry::Geometry;
use easenote_core::EdgeInsets;

/// Window abstraction trait
///
/// Implemented by platform-specific window types. The window is the
/// geometry source: size and safe area are read from it on demand.
pub trait Window: Send {
    /// Get window size in logical units
    fn logical_size(&self) -> (f32, f32);

    /// Get the safe-area insets in logical units
    fn safe_area_insets(&self) -> EdgeInsets;

    /// Current geometry snapshot
    ///
    /// Fails if the host reports a degenerate viewport.
    fn geometry(&self) -> Result<Geometry> {
        let (width, height) = self.logical_size();
        Geometry::new(width, height, self.safe_area_insets())
    }
}
