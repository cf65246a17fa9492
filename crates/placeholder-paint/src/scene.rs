#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Alias for the premultiplied linear color type, for a friendlier name in APIs.
pub type Color = ColorLinPremul;

// Constructors for ColorLinPremul are defined in color.rs to keep scene.rs focused.
// Fully saturated channels are identical in sRGB and linear space, so these are exact.
impl ColorLinPremul {
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
}

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(ColorLinPremul),
    LinearGradient {
        start: [f32; 2],
        end: [f32; 2],
        stops: Vec<(f32, ColorLinPremul)>,
    },
    RadialGradient {
        center: [f32; 2],
        radius: f32,
        stops: Vec<(f32, ColorLinPremul)>,
    },
}

impl Brush {
    /// Returns this brush with every color scaled by `alpha`.
    pub fn with_alpha(&self, alpha: f32) -> Brush {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            return self.clone();
        }
        let scale_stops = |stops: &[(f32, ColorLinPremul)]| {
            stops
                .iter()
                .map(|(offset, color)| (*offset, color.multiply_alpha(alpha)))
                .collect()
        };
        match self {
            Brush::Solid(color) => Brush::Solid(color.multiply_alpha(alpha)),
            Brush::LinearGradient { start, end, stops } => Brush::LinearGradient {
                start: *start,
                end: *end,
                stops: scale_stops(stops),
            },
            Brush::RadialGradient {
                center,
                radius,
                stops,
            } => Brush::RadialGradient {
                center: *center,
                radius: *radius,
                stops: scale_stops(stops),
            },
        }
    }
}

impl From<ColorLinPremul> for Brush {
    fn from(color: ColorLinPremul) -> Self {
        Brush::Solid(color)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// A rect anchored at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: size.width,
            h: size.height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRadii {
    pub tl: f32,
    pub tr: f32,
    pub br: f32,
    pub bl: f32,
}

impl RoundedRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            tl: radius,
            tr: radius,
            br: radius,
            bl: radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radii: RoundedRadii,
}

/// Size of a drawing area in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// Horizontal reading direction, which decides where "start" corners live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

// --- Path geometry ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    QuadTo([f32; 2], [f32; 2]),
    CubicTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
    pub fill_rule: FillRule,
}

/// Control point distance for approximating a quarter circle with one cubic.
const KAPPA: f32 = 0.552_284_8;

impl Path {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            cmds: Vec::new(),
            fill_rule,
        }
    }

    pub fn rect(rect: Rect) -> Self {
        let Rect { x, y, w, h } = rect;
        Self {
            cmds: vec![
                PathCmd::MoveTo([x, y]),
                PathCmd::LineTo([x + w, y]),
                PathCmd::LineTo([x + w, y + h]),
                PathCmd::LineTo([x, y + h]),
                PathCmd::Close,
            ],
            fill_rule: FillRule::NonZero,
        }
    }

    /// Clockwise rounded rectangle; each corner is a single cubic segment.
    pub fn rounded_rect(rrect: RoundedRect) -> Self {
        let Rect { x, y, w, h } = rrect.rect;
        let RoundedRadii { tl, tr, br, bl } = rrect.radii;
        let (r, b) = (x + w, y + h);
        let k = KAPPA;
        Self {
            cmds: vec![
                PathCmd::MoveTo([x + tl, y]),
                PathCmd::LineTo([r - tr, y]),
                PathCmd::CubicTo([r - tr + tr * k, y], [r, y + tr - tr * k], [r, y + tr]),
                PathCmd::LineTo([r, b - br]),
                PathCmd::CubicTo([r, b - br + br * k], [r - br + br * k, b], [r - br, b]),
                PathCmd::LineTo([x + bl, b]),
                PathCmd::CubicTo([x + bl - bl * k, b], [x, b - bl + bl * k], [x, b - bl]),
                PathCmd::LineTo([x, y + tl]),
                PathCmd::CubicTo([x, y + tl - tl * k], [x + tl - tl * k, y], [x + tl, y]),
                PathCmd::Close,
            ],
            fill_rule: FillRule::NonZero,
        }
    }

    /// Ellipse inscribed in `rect`.
    pub fn oval(rect: Rect) -> Self {
        let Rect { x, y, w, h } = rect;
        let (rx, ry) = (w / 2.0, h / 2.0);
        let (cx, cy) = (x + rx, y + ry);
        let (ox, oy) = (rx * KAPPA, ry * KAPPA);
        Self {
            cmds: vec![
                PathCmd::MoveTo([cx, y]),
                PathCmd::CubicTo([cx + ox, y], [x + w, cy - oy], [x + w, cy]),
                PathCmd::CubicTo([x + w, cy + oy], [cx + ox, y + h], [cx, y + h]),
                PathCmd::CubicTo([cx - ox, y + h], [x, cy + oy], [x, cy]),
                PathCmd::CubicTo([x, cy - oy], [cx - ox, y], [cx, y]),
                PathCmd::Close,
            ],
            fill_rule: FillRule::NonZero,
        }
    }
}

/// The geometric boundary of a shape at a concrete size.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    Rectangle(Rect),
    Rounded(RoundedRect),
    Generic(Path),
}

impl Outline {
    pub fn bounds(&self) -> Rect {
        match self {
            Outline::Rectangle(rect) => *rect,
            Outline::Rounded(rrect) => rrect.rect,
            Outline::Generic(path) => path_bounds(path),
        }
    }
}

fn path_bounds(path: &Path) -> Rect {
    let mut min = [f32::INFINITY; 2];
    let mut max = [f32::NEG_INFINITY; 2];
    let mut include = |p: &[f32; 2]| {
        min = [min[0].min(p[0]), min[1].min(p[1])];
        max = [max[0].max(p[0]), max[1].max(p[1])];
    };
    for cmd in &path.cmds {
        match cmd {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => include(p),
            PathCmd::QuadTo(c, p) => {
                include(c);
                include(p);
            }
            PathCmd::CubicTo(c1, c2, p) => {
                include(c1);
                include(c2);
                include(p);
            }
            PathCmd::Close => {}
        }
    }
    if min[0] > max[0] {
        return Rect::default();
    }
    Rect {
        x: min[0],
        y: min[1],
        w: max[0] - min[0],
        h: max[1] - min[1],
    }
}
