//! placeholder: skeleton and shimmer loading effects.
//!
//! A placeholder is drawn over an element while its content loads and
//! cross-fades to the content once `visible` turns false. An optional
//! [`Highlight`] animates on top of the placeholder while it is shown.
//!
//! ```
//! use placeholder::{Color, Highlight, Shape, placeholder};
//!
//! let config = placeholder(true, Color::rgba(0xE0, 0xE0, 0xE0, 0xFF))
//!     .shape(Shape::rounded(8.0))
//!     .highlight(Highlight::shimmer(Color::WHITE));
//! let node = config.create();
//! assert!(node.visible());
//! ```

pub mod animation;
pub mod defaults;
pub mod draw;
pub mod harness;
pub mod highlight;
pub mod modifier;
pub mod node;
pub mod shape;

pub use animation::{AnimationSpec, InfiniteRepeatableSpec, RepeatMode, SpringSpec, TweenSpec};
pub use defaults::PlaceholderDefaults;
pub use draw::{ContentDrawScope, DrawCache, DrawScope};
pub use highlight::{Fade, Highlight, PlaceholderHighlight, Shimmer};
pub use modifier::{ConfigField, InspectableValue, InspectorInfo, PlaceholderConfig, placeholder};
pub use node::{AnimationState, InvalidateDraw, PlaceholderNode};
pub use shape::{CornerRadii, CornerSize, CustomShape, OutlineProvider, Shape};

pub use placeholder_config::PlaceholderSettings;
pub use placeholder_paint::{Brush, Color, LayoutDirection, Outline, Size};
