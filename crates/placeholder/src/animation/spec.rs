//! Animation specifications: how a value travels from its start to its target.
//!
//! - `TweenSpec`: fixed duration with an easing curve and optional delay
//! - `SpringSpec`: physics based, duration emerges from stiffness and damping
//! - `AnimationSpec`: the spec accepted by the cross-fade channels
//! - `InfiniteRepeatableSpec`: a tween repeated forever, used by highlights

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;

/// Duration used by `TweenSpec::default()`.
pub const DEFAULT_DURATION_MS: f32 = 300.0;

/// Duration based animation curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenSpec {
    /// Duration of the animation in milliseconds, excluding the delay.
    pub duration_ms: f32,
    /// Delay before the animation starts in milliseconds.
    pub delay_ms: f32,
    /// Easing function applied to the linear fraction.
    pub easing: EasingFunction,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0.0,
            easing: EasingFunction::FastOutSlowIn,
        }
    }
}

impl TweenSpec {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration.
    pub fn total_ms(&self) -> f32 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }

    /// Eased fraction (0 at start, 1 at end) at `play_ms` since launch.
    pub fn fraction_at(&self, play_ms: f32) -> f32 {
        let active = play_ms - self.delay_ms.max(0.0);
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.easing.evaluate((active / self.duration_ms).min(1.0))
    }
}

/// Damped spring parameters. Mass is fixed at 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below 1.0 oscillates, above 1.0 is sluggish.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Distance from the target considered "arrived".
    pub visibility_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.01;

    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            visibility_threshold: Self::DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM)
    }
}

/// Spec for a one-shot animation towards a target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationSpec {
    Tween(TweenSpec),
    Spring(SpringSpec),
    /// Jump straight to the target once the delay has elapsed.
    Snap { delay_ms: f32 },
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::Spring(SpringSpec::default())
    }
}

impl AnimationSpec {
    pub fn tween(duration_ms: f32) -> Self {
        Self::Tween(TweenSpec::new(duration_ms))
    }

    pub fn spring() -> Self {
        Self::default()
    }

    pub fn snap() -> Self {
        Self::Snap { delay_ms: 0.0 }
    }
}

impl From<TweenSpec> for AnimationSpec {
    fn from(spec: TweenSpec) -> Self {
        Self::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        Self::Spring(spec)
    }
}

/// How each new iteration of a repeating animation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Jump back to the start value.
    #[default]
    Restart,
    /// Play every other iteration backwards.
    Reverse,
}

/// A tween repeated until cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InfiniteRepeatableSpec {
    pub animation: TweenSpec,
    pub repeat_mode: RepeatMode,
}

impl InfiniteRepeatableSpec {
    pub fn new(animation: TweenSpec, repeat_mode: RepeatMode) -> Self {
        Self {
            animation,
            repeat_mode,
        }
    }

    /// Length of one iteration, delay included.
    pub fn iteration_ms(&self) -> f32 {
        self.animation.total_ms()
    }

    /// Fraction at `play_ms`; reversed iterations replay their timeline
    /// (delay included) backwards.
    pub fn fraction_at(&self, play_ms: f64) -> f32 {
        let iteration = f64::from(self.iteration_ms());
        if iteration <= 0.0 {
            return 1.0;
        }
        let play_ms = play_ms.max(0.0);
        let count = (play_ms / iteration).floor();
        let mut local = play_ms - count * iteration;
        if self.repeat_mode == RepeatMode::Reverse && (count as u64) % 2 == 1 {
            local = iteration - local;
        }
        self.animation.fraction_at(local as f32)
    }
}
