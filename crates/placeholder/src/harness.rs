//! A frame-clock driven host for exercising placeholders end to end.
//!
//! `TestSurface` plays the part of the toolkit: it owns one placeholder node,
//! draws a background, the decorated content and the placeholder into a
//! [`Painter`], advances the node's animations in fixed frames and rasterizes
//! the result into a [`Capture`].

use std::cell::Cell;
use std::rc::Rc;

use placeholder_paint::{
    Brush, Capture, CaptureError, Color, DisplayList, LayoutDirection, Outline, Painter, Rect,
    Size, Viewport, rasterize,
};
use tracing::debug;

use crate::draw::{ContentDrawScope, DrawScope};
use crate::modifier::PlaceholderConfig;
use crate::node::{InvalidateDraw, PlaceholderNode};

/// Length of one simulated frame.
pub const FRAME_MS: f32 = 16.0;
/// How long [`TestSurface::wait_for_idle`] advances frames before giving up.
pub const SETTLE_TIMEOUT_MS: u64 = 5_000;

/// Counts redraw requests.
#[derive(Debug, Default)]
pub struct RedrawCounter(Cell<u64>);

impl RedrawCounter {
    pub fn count(&self) -> u64 {
        self.0.get()
    }
}

impl InvalidateDraw for RedrawCounter {
    fn invalidate_draw(&self) {
        self.0.set(self.0.get() + 1);
    }
}

type ContentFn = Box<dyn FnMut(&mut Painter, Size)>;

pub struct TestSurface {
    viewport: Viewport,
    layout_direction: LayoutDirection,
    background: Color,
    content: Option<ContentFn>,
    node: Option<PlaceholderNode>,
    redraws: Rc<RedrawCounter>,
    elapsed_ms: f64,
}

impl TestSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport { width, height },
            layout_direction: LayoutDirection::Ltr,
            background: Color::TRANSPARENT,
            content: None,
            node: None,
            redraws: Rc::new(RedrawCounter::default()),
            elapsed_ms: 0.0,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_layout_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    /// Content drawn underneath the placeholder.
    pub fn with_content(mut self, content: impl FnMut(&mut Painter, Size) + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Apply a configuration. The first call creates and attaches the node
    /// and runs one frame; later calls update the existing node.
    pub fn set_content(&mut self, config: PlaceholderConfig) {
        match self.node.as_mut() {
            Some(node) => {
                config.update(node);
            }
            None => {
                let mut node = config.create();
                node.on_attach(self.redraws.clone());
                self.node = Some(node);
                self.advance_frame();
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
    }

    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.layout_direction = layout_direction;
    }

    pub fn node(&self) -> Option<&PlaceholderNode> {
        self.node.as_ref()
    }

    pub fn node_mut(&mut self) -> Option<&mut PlaceholderNode> {
        self.node.as_mut()
    }

    pub fn redraw_requests(&self) -> u64 {
        self.redraws.count()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn advance_frame(&mut self) {
        self.elapsed_ms += f64::from(FRAME_MS);
        if let Some(node) = self.node.as_mut() {
            node.on_frame(FRAME_MS);
        }
    }

    /// Advance whole frames covering at least `ms`.
    pub fn advance_by(&mut self, ms: f32) {
        let frames = (ms / FRAME_MS).ceil().max(0.0) as u32;
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Advance frames until no cross-fade is running. The highlight loop
    /// never ends and is not waited for.
    pub fn wait_for_idle(&mut self) -> Result<(), CaptureError> {
        let mut waited_ms = 0.0_f32;
        while self.node.as_ref().is_some_and(PlaceholderNode::is_fading) {
            if waited_ms >= SETTLE_TIMEOUT_MS as f32 {
                debug!(waited_ms, "surface did not settle");
                return Err(CaptureError::Timeout {
                    waited_ms: waited_ms as u64,
                });
            }
            self.advance_frame();
            waited_ms += FRAME_MS;
        }
        Ok(())
    }

    /// Record the current frame: background, then content and placeholder.
    pub fn draw_frame(&mut self) -> DisplayList {
        let size = self.viewport.size();
        let mut painter = Painter::begin_frame(self.viewport);
        painter.rect(Rect::from_size(size), Brush::Solid(self.background));

        let mut scope = SurfaceScope {
            painter: &mut painter,
            size,
            layout_direction: self.layout_direction,
            content: self.content.as_deref_mut(),
        };
        match self.node.as_mut() {
            Some(node) => node.draw(&mut scope),
            None => scope.draw_content(),
        }
        painter.finish()
    }

    /// Pixels of the current frame without waiting for animations.
    pub fn capture_now(&mut self) -> Result<Capture, CaptureError> {
        let list = self.draw_frame();
        rasterize(&list, None)
    }

    /// Settle the cross-fades, then capture.
    pub fn capture(&mut self) -> Result<Capture, CaptureError> {
        self.wait_for_idle()?;
        self.capture_now()
    }

    /// Remove the node, cancelling its animations.
    pub fn detach(&mut self) -> Option<PlaceholderNode> {
        let mut node = self.node.take()?;
        node.on_detach();
        Some(node)
    }
}

struct SurfaceScope<'a> {
    painter: &'a mut Painter,
    size: Size,
    layout_direction: LayoutDirection,
    content: Option<&'a mut (dyn FnMut(&mut Painter, Size) + 'static)>,
}

impl DrawScope for SurfaceScope<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    fn fill_rect(&mut self, brush: &Brush, alpha: f32) {
        self.painter.rect(Rect::from_size(self.size), brush.with_alpha(alpha));
    }

    fn fill_outline(&mut self, outline: &Outline, brush: &Brush, alpha: f32) {
        self.painter.outline(outline, brush.with_alpha(alpha));
    }

    fn push_layer(&mut self, alpha: f32) {
        self.painter.push_layer(Rect::from_size(self.size), alpha);
    }

    fn pop_layer(&mut self) {
        self.painter.pop_layer();
    }
}

impl ContentDrawScope for SurfaceScope<'_> {
    fn draw_content(&mut self) {
        if let Some(content) = self.content.as_deref_mut() {
            content(&mut *self.painter, self.size);
        }
    }
}
