//! Time based motion curves.
//!
//! A `Motion` answers "where is the value after `play_ms` of playing". Motions
//! are pure: they hold their start/target/spec and are sampled by the
//! `AnimationScope` that owns them.

use std::fmt;

use super::spec::{AnimationSpec, InfiniteRepeatableSpec, SpringSpec, TweenSpec};

/// Spring velocity is considered settled below `threshold * this`.
const VELOCITY_THRESHOLD_MULTIPLIER: f64 = 1000.0 / 16.0;

/// Value of a motion at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub value: f32,
    /// Units per second.
    pub velocity: f32,
    /// The value has reached its target and will not change again.
    pub finished: bool,
}

/// Something that can be sampled over time by an `AnimationScope`.
pub trait Motion: fmt::Debug {
    /// `play_ms` is milliseconds since the first frame.
    fn sample(&self, play_ms: f64) -> MotionSample;

    /// Infinite motions never report `finished`.
    fn is_infinite(&self) -> bool {
        false
    }
}

/// Animates a single value from `from` to `to` following an `AnimationSpec`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMotion {
    from: f32,
    to: f32,
    initial_velocity: f32,
    spec: AnimationSpec,
}

impl TargetMotion {
    /// `initial_velocity` is only honoured by springs.
    pub fn new(from: f32, to: f32, initial_velocity: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            initial_velocity,
            spec,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    fn tween_value(&self, tween: &TweenSpec, play_ms: f32) -> f32 {
        let fraction = tween.fraction_at(play_ms);
        self.from + (self.to - self.from) * fraction
    }

    fn sample_tween(&self, tween: &TweenSpec, play_ms: f32) -> MotionSample {
        if play_ms >= tween.total_ms() {
            return self.settled();
        }
        let value = self.tween_value(tween, play_ms);
        let next = self.tween_value(tween, play_ms + 1.0);
        MotionSample {
            value,
            velocity: (next - value) * 1000.0,
            finished: false,
        }
    }

    fn sample_spring(&self, spring: &SpringSpec, play_ms: f64) -> MotionSample {
        let (displacement, velocity) = spring_state(
            spring,
            f64::from(self.from - self.to),
            f64::from(self.initial_velocity),
            play_ms.max(0.0) / 1000.0,
        );
        let threshold = f64::from(spring.visibility_threshold.abs());
        if displacement.abs() < threshold
            && velocity.abs() < threshold * VELOCITY_THRESHOLD_MULTIPLIER
        {
            return self.settled();
        }
        MotionSample {
            value: self.to + displacement as f32,
            velocity: velocity as f32,
            finished: false,
        }
    }

    fn settled(&self) -> MotionSample {
        MotionSample {
            value: self.to,
            velocity: 0.0,
            finished: true,
        }
    }
}

impl Motion for TargetMotion {
    fn sample(&self, play_ms: f64) -> MotionSample {
        match &self.spec {
            AnimationSpec::Tween(tween) => self.sample_tween(tween, play_ms as f32),
            AnimationSpec::Spring(spring) => self.sample_spring(spring, play_ms),
            AnimationSpec::Snap { delay_ms } if play_ms < f64::from(*delay_ms) => MotionSample {
                value: self.from,
                velocity: 0.0,
                finished: false,
            },
            AnimationSpec::Snap { .. } => self.settled(),
        }
    }
}

/// Closed-form damped harmonic oscillator with unit mass.
///
/// Returns (displacement from target, velocity) at `t` seconds.
fn spring_state(spec: &SpringSpec, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let stiffness = f64::from(spec.stiffness);
    if stiffness <= 0.0 {
        return (0.0, 0.0);
    }
    let omega = stiffness.sqrt();
    let zeta = f64::from(spec.damping_ratio.max(0.0));

    if (zeta - 1.0).abs() < 1e-6 {
        let b = v0 + omega * x0;
        let decay = (-omega * t).exp();
        let x = (x0 + b * t) * decay;
        let v = b * decay - omega * x;
        (x, v)
    } else if zeta < 1.0 {
        let a = zeta * omega;
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let c = x0;
        let d = (v0 + a * x0) / damped;
        let decay = (-a * t).exp();
        let (sin, cos) = (damped * t).sin_cos();
        let x = decay * (c * cos + d * sin);
        let v = decay * ((d * damped - a * c) * cos - (a * d + c * damped) * sin);
        (x, v)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        let c2 = (r1 * x0 - v0) / (r1 - r2);
        let c1 = x0 - c2;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

/// Plays 0 → 1 forever following an `InfiniteRepeatableSpec`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingMotion {
    spec: InfiniteRepeatableSpec,
}

impl RepeatingMotion {
    pub fn new(spec: InfiniteRepeatableSpec) -> Self {
        Self { spec }
    }
}

impl Motion for RepeatingMotion {
    fn sample(&self, play_ms: f64) -> MotionSample {
        MotionSample {
            value: self.spec.fraction_at(play_ms),
            velocity: 0.0,
            finished: false,
        }
    }

    fn is_infinite(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{EasingFunction, RepeatMode};

    fn run_until_finished(motion: &TargetMotion, step_ms: f64) -> (f64, f32) {
        let mut t = 0.0;
        loop {
            let sample = motion.sample(t);
            if sample.finished {
                return (t, sample.value);
            }
            assert!(t < 10_000.0, "motion never settled: {:?}", motion);
            t += step_ms;
        }
    }

    #[test]
    fn tween_moves_linearly_between_endpoints() {
        let spec = TweenSpec::new(100.0).with_easing(EasingFunction::Linear);
        let motion = TargetMotion::new(1.0, 0.0, 0.0, spec.into());
        let half = motion.sample(50.0);
        assert!((half.value - 0.5).abs() < 1e-4);
        assert!((half.velocity + 10.0).abs() < 0.1);
        assert_eq!(motion.sample(100.0).value, 0.0);
        assert!(motion.sample(100.0).finished);
    }

    #[test]
    fn default_spring_settles_quickly() {
        let motion = TargetMotion::new(0.0, 1.0, 0.0, AnimationSpec::default());
        let (t, value) = run_until_finished(&motion, 16.0);
        assert_eq!(value, 1.0);
        assert!(t > 100.0 && t < 400.0, "settled after {}ms", t);
    }

    #[test]
    fn critically_damped_spring_never_overshoots() {
        let motion = TargetMotion::new(0.0, 1.0, 0.0, AnimationSpec::default());
        for step in 0..40 {
            let value = motion.sample(f64::from(step) * 8.0).value;
            assert!(value <= 1.0 + 1e-6, "overshoot at step {}: {}", step, value);
        }
    }

    #[test]
    fn bouncy_spring_overshoots_then_settles() {
        let spec = SpringSpec::new(SpringSpec::DAMPING_RATIO_MEDIUM_BOUNCY, SpringSpec::STIFFNESS_LOW);
        let motion = TargetMotion::new(0.0, 1.0, 0.0, spec.into());
        let peak = (0..200)
            .map(|step| motion.sample(f64::from(step) * 5.0).value)
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        assert_eq!(run_until_finished(&motion, 16.0).1, 1.0);
    }

    #[test]
    fn overdamped_spring_settles() {
        let spec = SpringSpec::new(2.0, SpringSpec::STIFFNESS_MEDIUM);
        let motion = TargetMotion::new(1.0, 0.0, 0.0, spec.into());
        assert_eq!(run_until_finished(&motion, 16.0).1, 0.0);
    }

    #[test]
    fn spring_at_target_finishes_immediately() {
        let motion = TargetMotion::new(1.0, 1.0, 0.0, AnimationSpec::spring());
        assert!(motion.sample(0.0).finished);
    }

    #[test]
    fn snap_waits_for_delay() {
        let motion = TargetMotion::new(0.0, 1.0, 0.0, AnimationSpec::Snap { delay_ms: 32.0 });
        assert_eq!(motion.sample(16.0).value, 0.0);
        assert!(motion.sample(32.0).finished);
    }

    #[test]
    fn repeating_motion_is_infinite() {
        let spec = InfiniteRepeatableSpec::new(
            TweenSpec::new(100.0).with_easing(EasingFunction::Linear),
            RepeatMode::Restart,
        );
        let motion = RepeatingMotion::new(spec);
        assert!(motion.is_infinite());
        assert!(!motion.sample(1_000_000.0).finished);
        assert!((motion.sample(150.0).value - 0.5).abs() < 1e-4);
    }

    #[test]
    fn repeating_motion_keeps_moving_after_days() {
        let spec = InfiniteRepeatableSpec::new(
            TweenSpec::new(1000.0).with_easing(EasingFunction::Linear),
            RepeatMode::Restart,
        );
        let motion = RepeatingMotion::new(spec);
        // About 74 hours of frames: far past where f32 milliseconds step by 16.
        let start = 268_435_000.0;
        let a = motion.sample(start).value;
        let b = motion.sample(start + 16.0).value;
        assert!((b - a - 0.016).abs() < 1e-4, "{a} -> {b}");
    }
}
