//! Animation primitives used by the placeholder node.
//!
//! - `easing`: timing curves
//! - `spec`: tween, spring, snap and infinite repeatable specs
//! - `motion`: pure time -> value curves built from specs
//! - `scope`: per-node job ownership driven by frame ticks

pub mod easing;
pub mod motion;
pub mod scope;
pub mod spec;

pub use easing::EasingFunction;
pub use motion::{Motion, MotionSample, RepeatingMotion, TargetMotion};
pub use scope::{AnimationScope, JobFrame, JobHandle};
pub use spec::{
    AnimationSpec, DEFAULT_DURATION_MS, InfiniteRepeatableSpec, RepeatMode, SpringSpec, TweenSpec,
};
