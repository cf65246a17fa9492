//! The placeholder node: animation state for one decorated element.
//!
//! A node coordinates three animation channels inside its own
//! [`AnimationScope`]:
//!
//! - content fade: content alpha towards 0 (placeholder shown) or 1
//! - placeholder fade: placeholder alpha towards 1 (shown) or 0
//! - highlight loop: progress cycling 0..1 while the placeholder is effectively visible
//!
//! The host calls [`PlaceholderNode::on_attach`] once, then
//! [`PlaceholderNode::on_frame`] every frame and [`PlaceholderNode::draw`]
//! whenever it redraws. Every applied progress update requests a redraw
//! through the [`InvalidateDraw`] handle supplied on attach.

use std::fmt;
use std::rc::Rc;

use placeholder_paint::Color;
use tracing::{debug, trace};

use crate::animation::{
    AnimationScope, AnimationSpec, JobFrame, JobHandle, RepeatingMotion, TargetMotion,
};
use crate::draw::{ContentDrawScope, DrawCache, PlaceholderLook, draw_frame};
use crate::highlight::Highlight;
use crate::modifier::PlaceholderConfig;
use crate::shape::Shape;

/// Placeholder alpha from which the highlight is worth animating.
pub const HIGHLIGHT_VISIBILITY_THRESHOLD: f32 = 0.01;

/// Redraw request primitive provided by the host.
pub trait InvalidateDraw {
    fn invalidate_draw(&self);
}

/// Animated values read by the draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub content_alpha: f32,
    pub placeholder_alpha: f32,
    pub highlight_progress: f32,
    pub content_velocity: f32,
    pub placeholder_velocity: f32,
}

impl AnimationState {
    /// Resting state for a visibility before any animation has run.
    pub fn new(visible: bool) -> Self {
        let placeholder_alpha = if visible { 1.0 } else { 0.0 };
        Self {
            content_alpha: 1.0 - placeholder_alpha,
            placeholder_alpha,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    ContentFade,
    PlaceholderFade,
    Highlight,
}

/// Live job per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelJobs {
    pub content_fade: Option<JobHandle>,
    pub placeholder_fade: Option<JobHandle>,
    pub highlight: Option<JobHandle>,
}

impl ChannelJobs {
    /// Which channel `job` currently drives, if it is still current.
    pub fn channel_of(&self, job: JobHandle) -> Option<Channel> {
        if self.content_fade == Some(job) {
            Some(Channel::ContentFade)
        } else if self.placeholder_fade == Some(job) {
            Some(Channel::PlaceholderFade)
        } else if self.highlight == Some(job) {
            Some(Channel::Highlight)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = JobHandle> {
        [self.content_fade, self.placeholder_fade, self.highlight]
            .into_iter()
            .flatten()
    }
}

struct Attachment {
    scope: AnimationScope,
    invalidator: Rc<dyn InvalidateDraw>,
}

pub struct PlaceholderNode {
    visible: bool,
    color: Color,
    shape: Shape,
    highlight: Option<Highlight>,
    placeholder_fade_spec: AnimationSpec,
    content_fade_spec: AnimationSpec,
    state: AnimationState,
    cache: DrawCache,
    jobs: ChannelJobs,
    attachment: Option<Attachment>,
}

impl fmt::Debug for PlaceholderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderNode")
            .field("visible", &self.visible)
            .field("color", &self.color)
            .field("shape", &self.shape)
            .field("highlight", &self.highlight)
            .field("state", &self.state)
            .field("jobs", &self.jobs)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl PlaceholderNode {
    pub fn new(config: &PlaceholderConfig) -> Self {
        Self {
            visible: config.visible,
            color: config.color,
            shape: config.shape.clone(),
            highlight: config.highlight.clone(),
            placeholder_fade_spec: config.placeholder_fade_animation_spec,
            content_fade_spec: config.content_fade_animation_spec,
            state: AnimationState::new(config.visible),
            cache: DrawCache::default(),
            jobs: ChannelJobs::default(),
            attachment: None,
        }
    }

    /// Snapshot of the node's current configuration.
    pub fn config(&self) -> PlaceholderConfig {
        PlaceholderConfig {
            visible: self.visible,
            color: self.color,
            shape: self.shape.clone(),
            highlight: self.highlight.clone(),
            placeholder_fade_animation_spec: self.placeholder_fade_spec,
            content_fade_animation_spec: self.content_fade_spec,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn placeholder_fade_spec(&self) -> AnimationSpec {
        self.placeholder_fade_spec
    }

    pub fn content_fade_spec(&self) -> AnimationSpec {
        self.content_fade_spec
    }

    pub fn animation_state(&self) -> &AnimationState {
        &self.state
    }

    pub fn draw_cache(&self) -> &DrawCache {
        &self.cache
    }

    pub fn jobs(&self) -> ChannelJobs {
        self.jobs
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_highlight_running(&self) -> bool {
        self.jobs.highlight.is_some()
    }

    /// Whether either cross-fade is still moving.
    pub fn is_fading(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(|a| a.scope.has_finite_jobs())
    }

    /// Start animating. Calling this on an attached node does nothing.
    pub fn on_attach(&mut self, invalidator: Rc<dyn InvalidateDraw>) {
        if self.attachment.is_some() {
            return;
        }
        debug!(visible = self.visible, "placeholder attached");
        self.attachment = Some(Attachment {
            scope: AnimationScope::new(),
            invalidator,
        });
        self.run_alpha_animations();
        self.run_highlight_animation();
    }

    /// Cancel every job and drop the redraw handle.
    pub fn on_detach(&mut self) {
        if let Some(mut attachment) = self.attachment.take() {
            let cancelled = attachment.scope.cancel_all();
            debug!(cancelled, "placeholder detached");
        }
        self.jobs = ChannelJobs::default();
    }

    /// Advance the node's jobs by one frame and apply their progress.
    pub fn on_frame(&mut self, delta_ms: f32) {
        let frames = match self.attachment.as_mut() {
            Some(attachment) => attachment.scope.tick(delta_ms),
            None => return,
        };
        for frame in frames {
            self.apply_frame(frame);
        }
    }

    pub fn update_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        debug!(visible, "placeholder visibility changed");
        self.visible = visible;
        self.run_alpha_animations();
        self.run_highlight_animation();
    }

    pub fn update_highlight(&mut self, highlight: Option<Highlight>) {
        if self.highlight == highlight {
            return;
        }
        self.highlight = highlight;
        self.run_highlight_animation();
    }

    pub fn update_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn update_shape(&mut self, shape: Shape) {
        if self.shape != shape {
            self.shape = shape;
            self.cache.invalidate_outline();
        }
    }

    /// Takes effect at the next visibility change.
    pub fn update_placeholder_fade_spec(&mut self, spec: AnimationSpec) {
        self.placeholder_fade_spec = spec;
    }

    /// Takes effect at the next visibility change.
    pub fn update_content_fade_spec(&mut self, spec: AnimationSpec) {
        self.content_fade_spec = spec;
    }

    /// Draw content and placeholder for the current frame.
    pub fn draw(&mut self, scope: &mut dyn ContentDrawScope) {
        let look = PlaceholderLook {
            shape: &self.shape,
            color: self.color,
            highlight: self.highlight.as_ref(),
            highlight_progress: self.state.highlight_progress,
        };
        draw_frame(scope, &look, &self.state, &mut self.cache);
    }

    fn run_alpha_animations(&mut self) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };
        for job in [self.jobs.placeholder_fade.take(), self.jobs.content_fade.take()]
            .into_iter()
            .flatten()
        {
            attachment.scope.cancel(job);
        }

        let placeholder_target = if self.visible { 1.0 } else { 0.0 };
        let state = &self.state;
        self.jobs.placeholder_fade = Some(attachment.scope.launch(TargetMotion::new(
            state.placeholder_alpha,
            placeholder_target,
            state.placeholder_velocity,
            self.placeholder_fade_spec,
        )));
        self.jobs.content_fade = Some(attachment.scope.launch(TargetMotion::new(
            state.content_alpha,
            1.0 - placeholder_target,
            state.content_velocity,
            self.content_fade_spec,
        )));
        trace!(placeholder_target, "cross-fade started");
    }

    fn run_highlight_animation(&mut self) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };
        if let Some(job) = self.jobs.highlight.take() {
            attachment.scope.cancel(job);
        }

        let effectively_visible =
            self.visible || self.state.placeholder_alpha >= HIGHLIGHT_VISIBILITY_THRESHOLD;
        let Some(highlight) = self.highlight.as_ref().filter(|_| effectively_visible) else {
            return;
        };

        self.state.highlight_progress = 0.0;
        let spec = *highlight.animation_spec();
        self.jobs.highlight = Some(attachment.scope.launch(RepeatingMotion::new(spec)));
        trace!("highlight loop started");
    }

    fn apply_frame(&mut self, frame: JobFrame) {
        // Frames from jobs replaced earlier in this tick are stale.
        let Some(channel) = self.jobs.channel_of(frame.job) else {
            return;
        };
        let value = frame.value.clamp(0.0, 1.0);
        let velocity = if frame.finished { 0.0 } else { frame.velocity };

        match channel {
            Channel::ContentFade => {
                self.state.content_alpha = value;
                self.state.content_velocity = velocity;
                if frame.finished {
                    self.jobs.content_fade = None;
                }
            }
            Channel::PlaceholderFade => {
                let previous = self.state.placeholder_alpha;
                self.state.placeholder_alpha = value;
                self.state.placeholder_velocity = velocity;
                if frame.finished {
                    self.jobs.placeholder_fade = None;
                }
                if previous < HIGHLIGHT_VISIBILITY_THRESHOLD
                    && value >= HIGHLIGHT_VISIBILITY_THRESHOLD
                    && !self.is_highlight_running()
                {
                    self.run_highlight_animation();
                }
            }
            Channel::Highlight => {
                self.state.highlight_progress = value;
            }
        }

        if let Some(attachment) = &self.attachment {
            attachment.invalidator.invalidate_draw();
        }
    }

    /// Live jobs as seen by the scope; used to check channel bookkeeping.
    #[cfg(test)]
    fn live_jobs(&self) -> Vec<JobHandle> {
        self.jobs
            .iter()
            .filter(|job| {
                self.attachment
                    .as_ref()
                    .is_some_and(|a| a.scope.is_active(*job))
            })
            .collect()
    }
}
