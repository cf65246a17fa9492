//! Shapes a placeholder can take, resolved to an [`Outline`] at draw time.

use std::fmt;
use std::rc::Rc;

use placeholder_paint::{LayoutDirection, Outline, Rect, RoundedRadii, RoundedRect, Size};

/// Corner size, absolute or relative to the smaller side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerSize {
    Px(f32),
    /// Percentage (0..=100) of the smaller dimension.
    Percent(f32),
}

impl CornerSize {
    pub fn to_px(&self, size: Size) -> f32 {
        let px = match *self {
            CornerSize::Px(px) => px,
            CornerSize::Percent(percent) => size.min_dimension() * percent / 100.0,
        };
        px.max(0.0)
    }
}

/// Per-corner sizes expressed relative to the reading direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    pub top_start: CornerSize,
    pub top_end: CornerSize,
    pub bottom_end: CornerSize,
    pub bottom_start: CornerSize,
}

impl CornerRadii {
    pub fn all(size: CornerSize) -> Self {
        Self {
            top_start: size,
            top_end: size,
            bottom_end: size,
            bottom_start: size,
        }
    }

    pub fn px(radius: f32) -> Self {
        Self::all(CornerSize::Px(radius))
    }

    pub fn percent(percent: f32) -> Self {
        Self::all(CornerSize::Percent(percent))
    }

    /// Resolve to physical corners. Each radius is capped at half the
    /// smaller dimension.
    pub fn resolve(&self, size: Size, layout_direction: LayoutDirection) -> RoundedRadii {
        let cap = size.min_dimension().max(0.0) / 2.0;
        let px = |corner: CornerSize| corner.to_px(size).min(cap);
        let (ts, te, be, bs) = (
            px(self.top_start),
            px(self.top_end),
            px(self.bottom_end),
            px(self.bottom_start),
        );
        match layout_direction {
            LayoutDirection::Ltr => RoundedRadii {
                tl: ts,
                tr: te,
                br: be,
                bl: bs,
            },
            LayoutDirection::Rtl => RoundedRadii {
                tl: te,
                tr: ts,
                br: bs,
                bl: be,
            },
        }
    }
}

/// Generator for custom outlines.
pub trait OutlineProvider: fmt::Debug {
    fn create_outline(&self, size: Size, layout_direction: LayoutDirection) -> Outline;
}

/// A user outline generator. Compares by identity.
#[derive(Clone, Debug)]
pub struct CustomShape(Rc<dyn OutlineProvider>);

impl CustomShape {
    pub fn new(provider: impl OutlineProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }
}

impl PartialEq for CustomShape {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    #[default]
    Rectangle,
    RoundedRect(CornerRadii),
    Circle,
    Custom(CustomShape),
}

impl Shape {
    pub fn rounded(radius_px: f32) -> Self {
        Shape::RoundedRect(CornerRadii::px(radius_px))
    }

    pub fn custom(provider: impl OutlineProvider + 'static) -> Self {
        Shape::Custom(CustomShape::new(provider))
    }

    /// Rectangles are drawn by filling the whole area; no outline is needed.
    pub fn is_rectangle(&self) -> bool {
        matches!(self, Shape::Rectangle)
    }

    pub fn create_outline(&self, size: Size, layout_direction: LayoutDirection) -> Outline {
        let rect = Rect::from_size(size);
        match self {
            Shape::Rectangle => Outline::Rectangle(rect),
            Shape::Circle => Outline::Rounded(RoundedRect {
                rect,
                radii: RoundedRadii::uniform(size.min_dimension().max(0.0) / 2.0),
            }),
            Shape::RoundedRect(corners) => {
                let radii = corners.resolve(size, layout_direction);
                if radii == RoundedRadii::default() {
                    Outline::Rectangle(rect)
                } else {
                    Outline::Rounded(RoundedRect { rect, radii })
                }
            }
            Shape::Custom(custom) => custom.0.create_outline(size, layout_direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placeholder_paint::Path;

    #[derive(Debug)]
    struct Diamond;

    impl OutlineProvider for Diamond {
        fn create_outline(&self, size: Size, _layout_direction: LayoutDirection) -> Outline {
            Outline::Generic(Path::oval(Rect::from_size(size)))
        }
    }

    #[test]
    fn circle_uses_half_the_smaller_side() {
        let outline = Shape::Circle.create_outline(Size::new(40.0, 20.0), LayoutDirection::Ltr);
        match outline {
            Outline::Rounded(rrect) => assert_eq!(rrect.radii, RoundedRadii::uniform(10.0)),
            other => panic!("unexpected outline {:?}", other),
        }
    }

    #[test]
    fn start_corners_follow_layout_direction() {
        let corners = CornerRadii {
            top_start: CornerSize::Px(4.0),
            top_end: CornerSize::Px(0.0),
            bottom_end: CornerSize::Px(0.0),
            bottom_start: CornerSize::Px(2.0),
        };
        let size = Size::new(20.0, 20.0);
        let ltr = corners.resolve(size, LayoutDirection::Ltr);
        let rtl = corners.resolve(size, LayoutDirection::Rtl);
        assert_eq!((ltr.tl, ltr.bl), (4.0, 2.0));
        assert_eq!((rtl.tr, rtl.br), (4.0, 2.0));
        assert_eq!((rtl.tl, rtl.bl), (0.0, 0.0));
    }

    #[test]
    fn oversized_corners_are_capped() {
        let radii = CornerRadii::px(100.0).resolve(Size::new(30.0, 10.0), LayoutDirection::Ltr);
        assert_eq!(radii, RoundedRadii::uniform(5.0));
        let radii = CornerRadii::percent(50.0).resolve(Size::new(30.0, 10.0), LayoutDirection::Ltr);
        assert_eq!(radii, RoundedRadii::uniform(5.0));
    }

    #[test]
    fn square_corners_degrade_to_rectangle() {
        let outline = Shape::rounded(0.0).create_outline(Size::new(8.0, 8.0), LayoutDirection::Ltr);
        assert!(matches!(outline, Outline::Rectangle(_)));
    }

    #[test]
    fn custom_shapes_compare_by_identity() {
        let a = Shape::custom(Diamond);
        let b = Shape::custom(Diamond);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(matches!(
            a.create_outline(Size::new(4.0, 4.0), LayoutDirection::Ltr),
            Outline::Generic(_)
        ));
    }
}
