//! Presentation composer
//!
//! Turns live animation values into a two-layer render description. The
//! composer knows where each element sits before any transform is applied
//! and how the animated values move it; drawing is up to the [`Presenter`].

use crate::measurement::MeasuredContent;
use crate::transform::{TransformTarget, LOGO_SIZE, LOGO_TITLE_GAP};
use easenote_core::{Affine2D, Point, Rect, Size};
use easenote_platform::Geometry;

/// Top margin of the home surface below the top inset
pub const HOME_TOP_MARGIN: f32 = 60.0;

/// Stacking order of the header layer during the transition
pub const HEADER_Z_INDEX: i32 = 1;

/// Stacking order of the content layer
pub const CONTENT_Z_INDEX: i32 = 0;

/// Which of the two layers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// Branded layer holding the logo and title
    Header,
    /// The screen's own content
    Content,
}

/// Leaf elements placed by the composer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Logo,
    Title,
    /// Authenticated content, drawn by the home screen
    HomeSurface,
    /// Sign-in form, drawn by the onboarding screen
    SignInSurface,
}

/// An element with its untransformed bounds and its transform
///
/// Both are in the owning layer's coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementNode {
    pub element: Element,
    pub bounds: Rect,
    pub transform: Affine2D,
}

impl ElementNode {
    pub fn new(element: Element, bounds: Rect) -> Self {
        Self {
            element,
            bounds,
            transform: Affine2D::IDENTITY,
        }
    }

    /// Translate by `(dx, dy)` after scaling by `scale` about the bounds' center
    pub fn with_motion(mut self, dx: f32, dy: f32, scale: f32) -> Self {
        self.transform = Affine2D::translation(dx, dy)
            .then(&Affine2D::scale_about(scale, self.bounds.center()));
        self
    }

    /// Bounds after the node transform, in layer coordinates
    pub fn transformed_bounds(&self) -> Rect {
        self.transform.transform_rect(self.bounds)
    }
}

/// One composited layer
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub z_index: i32,
    /// Layer rect before `transform`, in screen coordinates
    pub bounds: Rect,
    pub transform: Affine2D,
    pub opacity: f32,
    pub nodes: Vec<ElementNode>,
}

impl Layer {
    pub fn node(&self, element: Element) -> Option<&ElementNode> {
        self.nodes.iter().find(|n| n.element == element)
    }
}

/// A full frame: layers ordered back to front
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub viewport: Size,
    pub layers: Vec<Layer>,
}

impl Composition {
    /// Build from unordered layers
    pub fn new(viewport: Size, mut layers: Vec<Layer>) -> Self {
        layers.sort_by_key(|l| l.z_index);
        Self { viewport, layers }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Layer kinds back to front
    pub fn stacking_order(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }

    /// Where `element` lands on screen after every transform
    pub fn screen_bounds(&self, element: Element) -> Option<Rect> {
        self.layers.iter().find_map(|layer| {
            layer.node(element).map(|node| {
                layer
                    .transform
                    .then(&node.transform)
                    .transform_rect(node.bounds)
            })
        })
    }
}

/// Receives composed frames
pub trait Presenter {
    fn present(&mut self, composition: &Composition);
}

/// Records every frame (useful for tests and replay)
impl Presenter for Vec<Composition> {
    fn present(&mut self, composition: &Composition) {
        self.push(composition.clone());
    }
}

/// Untransformed logo bounds for a logo centered on `center`
pub(crate) fn logo_bounds(center: Point) -> Rect {
    Rect::from_center(center, Size::new(LOGO_SIZE, LOGO_SIZE))
}

/// Untransformed title bounds: a centered text line `title_height` tall
/// starting at `top`
pub(crate) fn title_bounds(width: f32, top: f32, title_height: f32) -> Rect {
    Rect::new(0.0, top, width, title_height)
}

/// Compose the splash / docked header frame for the current values
pub fn compose(geometry: &Geometry, values: &TransformTarget, measured: &MeasuredContent) -> Composition {
    let width = geometry.viewport_width();
    let height = geometry.viewport_height();
    let title_height = measured.title_height_or_fallback();

    let logo_center = Point::new(width / 2.0, height / 2.0);
    let logo = ElementNode::new(Element::Logo, logo_bounds(logo_center)).with_motion(
        values.logo_offset.x,
        values.logo_offset.y,
        values.logo_scale,
    );

    let title_top = logo_center.y + LOGO_SIZE / 2.0 + LOGO_TITLE_GAP;
    let title = ElementNode::new(Element::Title, title_bounds(width, title_top, title_height))
        .with_motion(0.0, values.title_offset_y, values.title_scale);

    let header = Layer {
        kind: LayerKind::Header,
        z_index: HEADER_Z_INDEX,
        bounds: geometry.bounds(),
        transform: Affine2D::translation(0.0, values.header_offset_y),
        opacity: 1.0,
        nodes: vec![logo, title],
    };

    let home_top = geometry.inset_top() + HOME_TOP_MARGIN;
    let home = ElementNode::new(
        Element::HomeSurface,
        Rect::new(0.0, home_top, width, (height - home_top).max(0.0)),
    );

    let content = Layer {
        kind: LayerKind::Content,
        z_index: CONTENT_Z_INDEX,
        bounds: geometry.bounds(),
        transform: Affine2D::translation(0.0, values.content_offset_y),
        opacity: 1.0,
        nodes: vec![home],
    };

    Composition::new(geometry.viewport(), vec![header, content])
}
