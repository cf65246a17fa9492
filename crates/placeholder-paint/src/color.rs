use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::ColorLinPremul;

// sRGB → Linear premultiplied conversions, kept out of scene.rs for separation of concerns.
impl ColorLinPremul {
    /// Convenience alias matching Color::rgba(...) widely used in UI code.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from a packed `0xAARRGGBB` sRGB value.
    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        Self::from_srgba(c[0], c[1], c[2], c[3] as f32 / 255.0)
    }

    /// Create from sRGB u8 RGB with float alpha (CSS-like rgba).
    #[inline]
    pub fn from_srgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        let s = Srgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a);
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Create directly from linear RGBA floats and premultiply.
    #[inline]
    pub fn from_lin_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Same color with its alpha replaced by `alpha`.
    pub fn with_alpha(&self, alpha: f32) -> Self {
        let [r, g, b] = self.unpremultiplied();
        Self::from_lin_rgba(r, g, b, alpha.clamp(0.0, 1.0))
    }

    /// Scale the existing alpha (and the premultiplied channels) by `factor`.
    #[inline]
    pub fn multiply_alpha(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a * f,
        }
    }

    /// Source-over composite of `self` on top of `background`.
    pub fn composite_over(&self, background: ColorLinPremul) -> Self {
        let inv = 1.0 - self.a;
        Self {
            r: self.r + background.r * inv,
            g: self.g + background.g * inv,
            b: self.b + background.b * inv,
            a: self.a + background.a * inv,
        }
    }

    fn unpremultiplied(&self) -> [f32; 3] {
        if self.a > 0.0001 {
            [self.r / self.a, self.g / self.a, self.b / self.a]
        } else {
            [0.0, 0.0, 0.0]
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let [r, g, b] = self.unpremultiplied();

        // Convert linear to sRGB
        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_round_trip_is_stable() {
        let gray = ColorLinPremul::from_argb(0xFF88_8888);
        assert_eq!(gray.to_srgba_u8(), [0x88, 0x88, 0x88, 0xFF]);
        assert_eq!(ColorLinPremul::RED.to_srgba_u8(), [255, 0, 0, 255]);
    }

    #[test]
    fn with_alpha_keeps_hue() {
        let half_blue = ColorLinPremul::BLUE.with_alpha(0.5);
        assert_eq!(half_blue.to_srgba_u8(), [0, 0, 255, 128]);
    }

    #[test]
    fn opaque_source_covers_background() {
        let out = ColorLinPremul::RED.composite_over(ColorLinPremul::BLUE);
        assert_eq!(out, ColorLinPremul::RED);
    }

    #[test]
    fn translucent_source_blends_in_linear_space() {
        let out = ColorLinPremul::WHITE
            .with_alpha(0.5)
            .composite_over(ColorLinPremul::BLACK);
        assert!((out.r - 0.5).abs() < 1e-6);
        assert!((out.a - 1.0).abs() < 1e-6);
    }
}
