//! Log-backed presenter for headless runs

use easenote_splash::{Composition, Element, LayerKind, Presenter};

/// Logs a one-line summary of every presented frame
#[derive(Debug, Default)]
pub struct TracingPresenter {
    frames: u64,
    last: Option<Composition>,
}

impl TracingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recently presented frame
    pub fn last(&self) -> Option<&Composition> {
        self.last.as_ref()
    }
}

impl Presenter for TracingPresenter {
    fn present(&mut self, composition: &Composition) {
        self.frames += 1;

        let logo = composition.screen_bounds(Element::Logo);
        let content_y = composition
            .layer(LayerKind::Content)
            .map(|layer| layer.transform.elements[5]);
        tracing::debug!(
            frame = self.frames,
            logo = ?logo.map(|r| (r.center().x, r.center().y, r.width())),
            content_y = ?content_y,
            "present"
        );

        self.last = Some(composition.clone());
    }
}
