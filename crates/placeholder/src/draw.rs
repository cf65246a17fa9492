//! Per-frame compositing of content and placeholder.
//!
//! Each of the two layers is drawn directly when (almost) opaque, inside an
//! alpha layer when partially transparent, and skipped when (almost) invisible.

use placeholder_paint::{Brush, Color, LayoutDirection, Outline, Size};
use tracing::trace;

use crate::highlight::Highlight;
use crate::node::AnimationState;
use crate::shape::Shape;

/// At or below this alpha a layer is not drawn at all.
pub const ALPHA_SKIP_THRESHOLD: f32 = 0.01;
/// At or above this alpha a layer is drawn without an offscreen pass.
pub const ALPHA_OPAQUE_THRESHOLD: f32 = 0.99;

/// Drawing surface the placeholder paints into.
pub trait DrawScope {
    fn size(&self) -> Size;
    fn layout_direction(&self) -> LayoutDirection;
    /// Fill the whole drawing area.
    fn fill_rect(&mut self, brush: &Brush, alpha: f32);
    fn fill_outline(&mut self, outline: &Outline, brush: &Brush, alpha: f32);
    /// Start an offscreen layer composited back with `alpha` on `pop_layer`.
    fn push_layer(&mut self, alpha: f32);
    fn pop_layer(&mut self);
}

/// A draw scope that can also draw the content being decorated.
pub trait ContentDrawScope: DrawScope {
    fn draw_content(&mut self);
}

/// How a layer at a given alpha is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerMode {
    Skip,
    Layered(f32),
    Direct,
}

impl LayerMode {
    pub fn for_alpha(alpha: f32) -> Self {
        if alpha >= ALPHA_OPAQUE_THRESHOLD {
            LayerMode::Direct
        } else if alpha > ALPHA_SKIP_THRESHOLD {
            LayerMode::Layered(alpha)
        } else {
            LayerMode::Skip
        }
    }
}

/// Geometry cache kept between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawCache {
    last_size: Option<Size>,
    last_layout_direction: Option<LayoutDirection>,
    last_outline: Option<Outline>,
    outlines_created: u64,
}

impl DrawCache {
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }

    pub fn last_layout_direction(&self) -> Option<LayoutDirection> {
        self.last_layout_direction
    }

    pub fn last_outline(&self) -> Option<&Outline> {
        self.last_outline.as_ref()
    }

    /// How many outlines have been generated from a shape so far.
    pub fn outlines_created(&self) -> u64 {
        self.outlines_created
    }

    pub fn invalidate_outline(&mut self) {
        self.last_outline = None;
    }

    fn matches(&self, size: Size, layout_direction: LayoutDirection) -> bool {
        self.last_size == Some(size) && self.last_layout_direction == Some(layout_direction)
    }

    fn record_keys(&mut self, size: Size, layout_direction: LayoutDirection) {
        self.last_size = Some(size);
        self.last_layout_direction = Some(layout_direction);
    }
}

/// What the placeholder looks like this frame.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderLook<'a> {
    pub shape: &'a Shape,
    pub color: Color,
    pub highlight: Option<&'a Highlight>,
    pub highlight_progress: f32,
}

/// Draw content, then the placeholder on top, for one frame.
pub fn draw_frame<S>(
    scope: &mut S,
    look: &PlaceholderLook<'_>,
    state: &AnimationState,
    cache: &mut DrawCache,
) where
    S: ContentDrawScope + ?Sized,
{
    let size = scope.size();
    let layout_direction = scope.layout_direction();

    match LayerMode::for_alpha(state.content_alpha) {
        LayerMode::Direct => scope.draw_content(),
        LayerMode::Layered(alpha) => {
            scope.push_layer(alpha);
            scope.draw_content();
            scope.pop_layer();
        }
        LayerMode::Skip => {}
    }

    match LayerMode::for_alpha(state.placeholder_alpha) {
        LayerMode::Direct => {
            cache.last_outline = draw_placeholder(scope, look, size, layout_direction, cache);
        }
        LayerMode::Layered(alpha) => {
            scope.push_layer(alpha);
            cache.last_outline = draw_placeholder(scope, look, size, layout_direction, cache);
            scope.pop_layer();
        }
        LayerMode::Skip if !cache.matches(size, layout_direction) => {
            // The cached outline belongs to the old keys.
            cache.invalidate_outline();
        }
        LayerMode::Skip => {}
    }

    cache.record_keys(size, layout_direction);
}

/// Fill the placeholder and its highlight. Returns the outline to cache;
/// rectangles fill the whole area and need none.
fn draw_placeholder<S>(
    scope: &mut S,
    look: &PlaceholderLook<'_>,
    size: Size,
    layout_direction: LayoutDirection,
    cache: &mut DrawCache,
) -> Option<Outline>
where
    S: DrawScope + ?Sized,
{
    let highlight = look
        .highlight
        .map(|h| (h.brush(look.highlight_progress, size), h.alpha(look.highlight_progress)));

    if look.shape.is_rectangle() {
        scope.fill_rect(&Brush::Solid(look.color), 1.0);
        if let Some((brush, alpha)) = &highlight {
            scope.fill_rect(brush, *alpha);
        }
        return None;
    }

    let outline = match cache.last_outline.take() {
        Some(outline) if cache.matches(size, layout_direction) => outline,
        _ => {
            cache.outlines_created += 1;
            trace!(?size, ?layout_direction, "placeholder outline recomputed");
            look.shape.create_outline(size, layout_direction)
        }
    };

    scope.fill_outline(&outline, &Brush::Solid(look.color), 1.0);
    if let Some((brush, alpha)) = &highlight {
        scope.fill_outline(&outline, brush, *alpha);
    }
    Some(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Content,
        Rect(Brush, f32),
        Outline(Outline, Brush, f32),
        Push(f32),
        Pop,
    }

    struct Recorder {
        size: Size,
        direction: LayoutDirection,
        ops: Vec<Op>,
    }

    impl Recorder {
        fn new(width: f32, height: f32) -> Self {
            Self {
                size: Size::new(width, height),
                direction: LayoutDirection::Ltr,
                ops: Vec::new(),
            }
        }
    }

    impl DrawScope for Recorder {
        fn size(&self) -> Size {
            self.size
        }
        fn layout_direction(&self) -> LayoutDirection {
            self.direction
        }
        fn fill_rect(&mut self, brush: &Brush, alpha: f32) {
            self.ops.push(Op::Rect(brush.clone(), alpha));
        }
        fn fill_outline(&mut self, outline: &Outline, brush: &Brush, alpha: f32) {
            self.ops.push(Op::Outline(outline.clone(), brush.clone(), alpha));
        }
        fn push_layer(&mut self, alpha: f32) {
            self.ops.push(Op::Push(alpha));
        }
        fn pop_layer(&mut self) {
            self.ops.push(Op::Pop);
        }
    }

    impl ContentDrawScope for Recorder {
        fn draw_content(&mut self) {
            self.ops.push(Op::Content);
        }
    }

    fn state(content_alpha: f32, placeholder_alpha: f32) -> AnimationState {
        AnimationState {
            content_alpha,
            placeholder_alpha,
            ..AnimationState::default()
        }
    }

    fn look(shape: &Shape) -> PlaceholderLook<'_> {
        PlaceholderLook {
            shape,
            color: Color::RED,
            highlight: None,
            highlight_progress: 0.0,
        }
    }

    #[test]
    fn layer_mode_thresholds() {
        assert_eq!(LayerMode::for_alpha(1.0), LayerMode::Direct);
        assert_eq!(LayerMode::for_alpha(0.99), LayerMode::Direct);
        assert_eq!(LayerMode::for_alpha(0.5), LayerMode::Layered(0.5));
        assert_eq!(LayerMode::for_alpha(0.01), LayerMode::Skip);
        assert_eq!(LayerMode::for_alpha(0.0), LayerMode::Skip);
    }

    #[test]
    fn invisible_content_is_skipped() {
        let mut scope = Recorder::new(10.0, 10.0);
        let mut cache = DrawCache::default();
        draw_frame(&mut scope, &look(&Shape::Rectangle), &state(0.0, 1.0), &mut cache);
        assert_eq!(scope.ops, vec![Op::Rect(Brush::Solid(Color::RED), 1.0)]);
        assert!(cache.last_outline().is_none());
        assert_eq!(cache.last_size(), Some(Size::new(10.0, 10.0)));
    }

    #[test]
    fn mid_transition_draws_both_in_layers() {
        let mut scope = Recorder::new(10.0, 10.0);
        let mut cache = DrawCache::default();
        draw_frame(&mut scope, &look(&Shape::Rectangle), &state(0.4, 0.6), &mut cache);
        assert_eq!(
            scope.ops,
            vec![
                Op::Push(0.4),
                Op::Content,
                Op::Pop,
                Op::Push(0.6),
                Op::Rect(Brush::Solid(Color::RED), 1.0),
                Op::Pop,
            ]
        );
    }

    #[test]
    fn outline_is_reused_until_keys_change() {
        let shape = Shape::Circle;
        let mut scope = Recorder::new(10.0, 10.0);
        let mut cache = DrawCache::default();

        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);
        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);
        assert_eq!(cache.outlines_created(), 1);
        assert!(cache.last_outline().is_some());

        scope.direction = LayoutDirection::Rtl;
        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);
        assert_eq!(cache.outlines_created(), 2);

        scope.size = Size::new(20.0, 10.0);
        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);
        assert_eq!(cache.outlines_created(), 3);
        assert_eq!(cache.last_outline().map(|o| o.bounds().w), Some(20.0));
    }

    #[test]
    fn keys_recorded_while_skipped_drop_the_outline() {
        let shape = Shape::Circle;
        let mut scope = Recorder::new(10.0, 10.0);
        let mut cache = DrawCache::default();
        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);

        scope.size = Size::new(30.0, 30.0);
        draw_frame(&mut scope, &look(&shape), &state(1.0, 0.0), &mut cache);
        assert!(cache.last_outline().is_none());
        assert_eq!(cache.last_size(), Some(Size::new(30.0, 30.0)));

        draw_frame(&mut scope, &look(&shape), &state(0.0, 1.0), &mut cache);
        assert_eq!(cache.last_outline().map(|o| o.bounds().w), Some(30.0));
    }

    #[test]
    fn highlight_overlays_the_fill() {
        let highlight = Highlight::fade(Color::WHITE);
        let shape = Shape::Rectangle;
        let look = PlaceholderLook {
            highlight: Some(&highlight),
            highlight_progress: 0.5,
            ..look(&shape)
        };
        let mut scope = Recorder::new(10.0, 10.0);
        draw_frame(&mut scope, &look, &state(0.0, 1.0), &mut DrawCache::default());
        assert_eq!(scope.ops.len(), 2);
        assert_eq!(scope.ops[1], Op::Rect(Brush::Solid(Color::WHITE), 0.5));
    }
}
