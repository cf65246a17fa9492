//! CPU rasterization of a [`DisplayList`] with tiny-skia.
//!
//! This is the capture path used to verify frames pixel by pixel. Layers are
//! rendered into their own pixmap and composited back with their opacity, the
//! same way a GPU backend would resolve an offscreen pass.

use tiny_skia::{
    FillRule as SkFillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint,
    Point, RadialGradient, Shader, SpreadMode, Transform,
};

use crate::display_list::{Command, DisplayList, Viewport};
use crate::error::{CaptureError, Result};
use crate::scene::*;

/// Unpremultiplied sRGB pixels of a rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Capture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA of the pixel at (`x`, `y`). Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[(y * self.width + x) as usize]
    }

    /// True when the pixel at (`x`, `y`) is within `tolerance` of `expected` on every channel.
    pub fn pixel_matches(&self, x: u32, y: u32, expected: ColorLinPremul, tolerance: u8) -> bool {
        channels_match(self.pixel(x, y), expected.to_srgba_u8(), tolerance)
    }

    /// First pixel that differs from `expected` by more than `tolerance`, if any.
    pub fn first_mismatch(
        &self,
        expected: ColorLinPremul,
        tolerance: u8,
    ) -> Option<(u32, u32, [u8; 4])> {
        let want = expected.to_srgba_u8();
        self.pixels
            .iter()
            .enumerate()
            .find(|(_, px)| !channels_match(**px, want, tolerance))
            .map(|(i, px)| (i as u32 % self.width, i as u32 / self.width, *px))
    }

    /// The four corner coordinates, clockwise from the top-left.
    pub fn vertices(&self) -> [(u32, u32); 4] {
        let (r, b) = (self.width - 1, self.height - 1);
        [(0, 0), (r, 0), (r, b), (0, b)]
    }
}

fn channels_match(actual: [u8; 4], expected: [u8; 4], tolerance: u8) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= tolerance)
}

/// Rasterize `list` on top of an optional clear color.
pub fn rasterize(list: &DisplayList, clear: Option<ColorLinPremul>) -> Result<Capture> {
    let Viewport { width, height } = list.viewport;
    let mut base = new_pixmap(width, height)?;
    if let Some(color) = clear {
        base.fill(sk_color(color));
    }

    let mut layers: Vec<(Pixmap, f32)> = Vec::new();
    for cmd in &list.commands {
        match cmd {
            Command::PushLayer { alpha, .. } => {
                layers.push((new_pixmap(width, height)?, *alpha));
            }
            Command::PopLayer => {
                let (layer, alpha) = layers.pop().ok_or(CaptureError::UnbalancedLayers)?;
                let target = match layers.last_mut() {
                    Some((pixmap, _)) => pixmap,
                    None => &mut base,
                };
                let paint = PixmapPaint {
                    opacity: alpha.clamp(0.0, 1.0),
                    ..PixmapPaint::default()
                };
                target.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
            }
            Command::FillRect { rect, brush } => {
                let target = current_target(&mut layers, &mut base);
                fill(target, &Path::rect(*rect), brush);
            }
            Command::FillRoundedRect { rrect, brush } => {
                let target = current_target(&mut layers, &mut base);
                fill(target, &Path::rounded_rect(*rrect), brush);
            }
            Command::FillPath { path, brush } => {
                let target = current_target(&mut layers, &mut base);
                fill(target, path, brush);
            }
        }
    }
    if !layers.is_empty() {
        return Err(CaptureError::UnbalancedLayers);
    }

    let pixels = base
        .pixels()
        .iter()
        .map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(Capture {
        width,
        height,
        pixels,
    })
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(CaptureError::InvalidSize { width, height })
}

fn current_target<'a>(layers: &'a mut [(Pixmap, f32)], base: &'a mut Pixmap) -> &'a mut Pixmap {
    match layers.last_mut() {
        Some((pixmap, _)) => pixmap,
        None => base,
    }
}

fn fill(target: &mut Pixmap, path: &Path, brush: &Brush) {
    let Some(sk_path) = sk_path(path) else {
        return;
    };
    let paint = Paint {
        shader: shader(brush),
        anti_alias: true,
        ..Paint::default()
    };
    let rule = match path.fill_rule {
        FillRule::NonZero => SkFillRule::Winding,
        FillRule::EvenOdd => SkFillRule::EvenOdd,
    };
    target.fill_path(&sk_path, &paint, rule, Transform::identity(), None);
}

fn sk_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in &path.cmds {
        match cmd {
            PathCmd::MoveTo([x, y]) => pb.move_to(*x, *y),
            PathCmd::LineTo([x, y]) => pb.line_to(*x, *y),
            PathCmd::QuadTo([cx, cy], [x, y]) => pb.quad_to(*cx, *cy, *x, *y),
            PathCmd::CubicTo([c1x, c1y], [c2x, c2y], [x, y]) => {
                pb.cubic_to(*c1x, *c1y, *c2x, *c2y, *x, *y)
            }
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}

fn sk_color(color: ColorLinPremul) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_u8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn shader(brush: &Brush) -> Shader<'static> {
    match brush {
        Brush::Solid(color) => Shader::SolidColor(sk_color(*color)),
        Brush::LinearGradient { start, end, stops } => LinearGradient::new(
            Point::from_xy(start[0], start[1]),
            Point::from_xy(end[0], end[1]),
            sk_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or_else(|| fallback(stops)),
        Brush::RadialGradient {
            center,
            radius,
            stops,
        } => {
            let c = Point::from_xy(center[0], center[1]);
            RadialGradient::new(
                c,
                c,
                *radius,
                sk_stops(stops),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .unwrap_or_else(|| fallback(stops))
        }
    }
}

fn sk_stops(stops: &[(f32, ColorLinPremul)]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|(offset, color)| GradientStop::new(*offset, sk_color(*color)))
        .collect()
}

// Degenerate gradients (zero length or radius) paint their last stop.
fn fallback(stops: &[(f32, ColorLinPremul)]) -> Shader<'static> {
    let color = stops
        .last()
        .map(|(_, c)| *c)
        .unwrap_or(ColorLinPremul::TRANSPARENT);
    Shader::SolidColor(sk_color(color))
}
