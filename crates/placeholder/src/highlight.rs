//! Highlight strategies drawn on top of a placeholder.
//!
//! A highlight turns an animated `progress` in `[0, 1]` into a brush and an
//! opacity. The node owns the progress; highlights are stateless values.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use placeholder_paint::{Brush, Color, Size};

use crate::animation::InfiniteRepeatableSpec;
use crate::defaults::PlaceholderDefaults;

/// Object-safe equality for highlight implementations.
///
/// Implemented automatically for every `PartialEq` type.
pub trait DynEq {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
}

impl<T: PartialEq + 'static> DynEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// Contract for an animated highlight.
pub trait PlaceholderHighlight: DynEq + fmt::Debug {
    /// Timing of the progress loop.
    fn animation_spec(&self) -> &InfiniteRepeatableSpec;

    /// Brush to fill the placeholder outline with at `progress`.
    fn brush(&self, progress: f32, size: Size) -> Brush;

    /// Opacity to apply to [`brush`](Self::brush) at `progress`.
    fn alpha(&self, progress: f32) -> f32;
}

/// Shared, comparable handle to a highlight.
///
/// Two handles are equal when they wrap values of the same concrete type that
/// compare equal.
#[derive(Clone, Debug)]
pub struct Highlight(Rc<dyn PlaceholderHighlight>);

impl Highlight {
    pub fn new(highlight: impl PlaceholderHighlight + 'static) -> Self {
        Self(Rc::new(highlight))
    }

    /// Pulsing fade with the built-in timing. Use
    /// [`PlaceholderDefaults::fade`] for timing from `placeholder.toml`.
    pub fn fade(highlight_color: Color) -> Self {
        PlaceholderDefaults::default().fade(highlight_color)
    }

    /// Sweeping shimmer with the built-in timing. Use
    /// [`PlaceholderDefaults::shimmer`] for timing from `placeholder.toml`.
    pub fn shimmer(highlight_color: Color) -> Self {
        PlaceholderDefaults::default().shimmer(highlight_color)
    }
}

impl Deref for Highlight {
    type Target = dyn PlaceholderHighlight;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for Highlight {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs): (&dyn PlaceholderHighlight, &dyn PlaceholderHighlight) =
            (&*self.0, &*other.0);
        std::ptr::addr_eq(lhs, rhs) || lhs.dyn_eq(rhs.as_any())
    }
}

impl<T: PlaceholderHighlight + 'static> From<T> for Highlight {
    fn from(highlight: T) -> Self {
        Self::new(highlight)
    }
}

/// Solid color whose opacity pulses between `min_alpha` and `max_alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    pub highlight_color: Color,
    pub animation_spec: InfiniteRepeatableSpec,
    pub min_alpha: f32,
    pub max_alpha: f32,
}

impl Fade {
    pub fn new(highlight_color: Color, animation_spec: InfiniteRepeatableSpec) -> Self {
        Self {
            highlight_color,
            animation_spec,
            min_alpha: 0.0,
            max_alpha: 1.0,
        }
    }

    pub fn with_alpha_range(mut self, min_alpha: f32, max_alpha: f32) -> Self {
        self.min_alpha = min_alpha;
        self.max_alpha = max_alpha;
        self
    }
}

impl PlaceholderHighlight for Fade {
    fn animation_spec(&self) -> &InfiniteRepeatableSpec {
        &self.animation_spec
    }

    fn brush(&self, _progress: f32, _size: Size) -> Brush {
        Brush::Solid(self.highlight_color)
    }

    fn alpha(&self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        self.min_alpha + (self.max_alpha - self.min_alpha) * progress
    }
}

/// A bright band (transparent, color, transparent) sweeping left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Shimmer {
    pub highlight_color: Color,
    pub animation_spec: InfiniteRepeatableSpec,
    /// Band width relative to the larger dimension of the placeholder.
    pub band_fraction: f32,
    pub alpha: f32,
}

impl Shimmer {
    pub fn new(highlight_color: Color, animation_spec: InfiniteRepeatableSpec) -> Self {
        Self {
            highlight_color,
            animation_spec,
            band_fraction: 0.5,
            alpha: 1.0,
        }
    }

    pub fn with_band_fraction(mut self, band_fraction: f32) -> Self {
        self.band_fraction = band_fraction;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl PlaceholderHighlight for Shimmer {
    fn animation_spec(&self) -> &InfiniteRepeatableSpec {
        &self.animation_spec
    }

    // At progress 0 the band sits just left of the area, at 1 just right of it.
    fn brush(&self, progress: f32, size: Size) -> Brush {
        let band = (size.max_dimension() * self.band_fraction).max(1.0);
        let travel = size.width + band;
        let x0 = -band + travel * progress.clamp(0.0, 1.0);
        let y = size.height / 2.0;
        let clear = self.highlight_color.with_alpha(0.0);
        Brush::LinearGradient {
            start: [x0, y],
            end: [x0 + band, y],
            stops: vec![
                (0.0, clear),
                (0.5, self.highlight_color),
                (1.0, clear),
            ],
        }
    }

    fn alpha(&self, _progress: f32) -> f32 {
        self.alpha
    }
}
