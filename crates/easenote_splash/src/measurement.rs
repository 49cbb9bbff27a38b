//! Content measurement feedback
//!
//! The rendered title reports its height once, after its first layout pass.
//! Until then the transform uses [`FALLBACK_TITLE_HEIGHT`].

use crate::transform::FALLBACK_TITLE_HEIGHT;

/// Result of [`MeasuredContent::report`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// First valid report; the transform must be re-evaluated
    Accepted,
    /// A height was already recorded for this mount
    AlreadyMeasured,
    /// Negative or non-finite height
    Invalid,
}

/// Title measurement for one mount
///
/// Single assignment: `unknown -> known` happens at most once. Later reports
/// are ignored, so the render/measure feedback loop cannot cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasuredContent {
    title_height: Option<f32>,
}

impl MeasuredContent {
    /// Nothing measured yet
    pub const fn unknown() -> Self {
        Self { title_height: None }
    }

    /// A measurement that already has a (valid) title height
    pub fn with_title_height(height: f32) -> Self {
        let mut measured = Self::unknown();
        measured.report(height);
        measured
    }

    /// Record the rendered title height
    pub fn report(&mut self, height: f32) -> ReportOutcome {
        if let Some(existing) = self.title_height {
            tracing::debug!(existing, ignored = height, "title already measured");
            return ReportOutcome::AlreadyMeasured;
        }
        if !(height.is_finite() && height >= 0.0) {
            tracing::warn!("ignoring invalid title height {}", height);
            return ReportOutcome::Invalid;
        }
        self.title_height = Some(height);
        ReportOutcome::Accepted
    }

    pub fn title_height(&self) -> Option<f32> {
        self.title_height
    }

    pub fn is_known(&self) -> bool {
        self.title_height.is_some()
    }

    /// The measured height, or the nominal one before the first report
    pub fn title_height_or_fallback(&self) -> f32 {
        self.title_height.unwrap_or(FALLBACK_TITLE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shot() {
        let mut measured = MeasuredContent::unknown();
        assert!(!measured.is_known());
        assert_eq!(measured.title_height_or_fallback(), FALLBACK_TITLE_HEIGHT);

        assert_eq!(measured.report(28.0), ReportOutcome::Accepted);
        assert_eq!(measured.title_height(), Some(28.0));

        assert_eq!(measured.report(40.0), ReportOutcome::AlreadyMeasured);
        assert_eq!(measured.title_height_or_fallback(), 28.0);
    }

    #[test]
    fn test_invalid_report_leaves_unknown() {
        let mut measured = MeasuredContent::unknown();
        assert_eq!(measured.report(f32::NAN), ReportOutcome::Invalid);
        assert_eq!(measured.report(-1.0), ReportOutcome::Invalid);
        assert!(!measured.is_known());

        // A later valid report is still accepted
        assert_eq!(measured.report(0.0), ReportOutcome::Accepted);
    }
}
