//! Default specs and material-style colors, derived from [`PlaceholderSettings`].

use placeholder_config::PlaceholderSettings;
use placeholder_paint::Color;

use crate::animation::{AnimationSpec, InfiniteRepeatableSpec, RepeatMode, SpringSpec, TweenSpec};
use crate::highlight::{Fade, Highlight, Shimmer};
use crate::modifier::{PlaceholderConfig, placeholder};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceholderDefaults {
    settings: PlaceholderSettings,
}

impl PlaceholderDefaults {
    pub fn new(settings: PlaceholderSettings) -> Self {
        Self { settings }
    }

    /// Defaults from `placeholder.toml` and environment overrides.
    pub fn load() -> Self {
        Self::new(PlaceholderSettings::load())
    }

    pub fn settings(&self) -> &PlaceholderSettings {
        &self.settings
    }

    /// Pulse used by [`Highlight::fade`]: plays forward then backward.
    pub fn fade_animation_spec(&self) -> InfiniteRepeatableSpec {
        let timing = &self.settings.fade;
        InfiniteRepeatableSpec::new(
            TweenSpec::new(timing.duration_ms).with_delay(timing.delay_ms),
            RepeatMode::Reverse,
        )
    }

    /// Sweep used by [`Highlight::shimmer`]: always restarts from the left.
    pub fn shimmer_animation_spec(&self) -> InfiniteRepeatableSpec {
        let timing = &self.settings.shimmer;
        InfiniteRepeatableSpec::new(
            TweenSpec::new(timing.duration_ms).with_delay(timing.delay_ms),
            RepeatMode::Restart,
        )
    }

    pub fn shimmer_band_fraction(&self) -> f32 {
        self.settings.shimmer.band_fraction
    }

    /// Spring used by both cross-fade channels.
    pub fn crossfade_spec(&self) -> AnimationSpec {
        let crossfade = &self.settings.crossfade;
        AnimationSpec::Spring(SpringSpec::new(crossfade.damping_ratio, crossfade.stiffness))
    }

    /// Placeholder fill: `content` at a low alpha composited over `background`.
    pub fn color(&self, background: Color, content: Color) -> Color {
        content
            .with_alpha(self.settings.material.content_alpha)
            .composite_over(background)
    }

    pub fn fade_highlight_color(&self, background: Color) -> Color {
        background.with_alpha(self.settings.material.fade_highlight_alpha)
    }

    pub fn shimmer_highlight_color(&self, background: Color) -> Color {
        background.with_alpha(self.settings.material.shimmer_highlight_alpha)
    }

    /// [`placeholder`](crate::placeholder) with both cross-fades using
    /// [`crossfade_spec`](Self::crossfade_spec).
    pub fn placeholder(&self, visible: bool, color: Color) -> PlaceholderConfig {
        let crossfade = self.crossfade_spec();
        placeholder(visible, color)
            .placeholder_fade_animation_spec(crossfade)
            .content_fade_animation_spec(crossfade)
    }

    pub fn fade(&self, highlight_color: Color) -> Highlight {
        Highlight::new(Fade::new(highlight_color, self.fade_animation_spec()))
    }

    pub fn shimmer(&self, highlight_color: Color) -> Highlight {
        Highlight::new(
            Shimmer::new(highlight_color, self.shimmer_animation_spec())
                .with_band_fraction(self.shimmer_band_fraction()),
        )
    }
}
