//! Rgba: Normalized floating-point color with alpha.
//!
//! Every channel lives in `[0.0, 1.0]`. Constructors clamp, so a value
//! that escapes into the rest of the crate is always finite and in range.

use crate::error::{Error, Result};

/// An immutable RGBA color with `f32` channels in `[0.0, 1.0]`.
///
/// Channels are private so the clamping invariant cannot be bypassed.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

// Channels are never NaN, so equality is total.
impl Eq for Rgba {}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::raw(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::raw(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::raw(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::raw(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::raw(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::raw(0.0, 0.0, 1.0, 1.0);

    /// Build from channels already known to be in range.
    const fn raw(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from normalized channels, clamping each to `[0, 1]`.
    ///
    /// Non-finite channels become `0.0`. Use [`Rgba::from_values`] when the
    /// input is untrusted and NaN should be reported instead.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::raw(sanitize(r), sanitize(g), sanitize(b), sanitize(a))
    }

    /// Create an opaque color from normalized channels.
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit style channels (`0..=255`).
    ///
    /// Finite values outside `0..=255` are clamped. Accepts any numeric type
    /// that widens to `f64`, so `u8`, `i32` and `f32` inputs all work.
    pub fn from_ints(
        r: impl Into<f64>,
        g: impl Into<f64>,
        b: impl Into<f64>,
        a: impl Into<f64>,
    ) -> Result<Self> {
        let channels = [('r', r.into()), ('g', g.into()), ('b', b.into()), ('a', a.into())];
        let mut out = [0.0f32; 4];
        for (slot, (channel, value)) in out.iter_mut().zip(channels) {
            if !value.is_finite() {
                return Err(Error::InvalidChannel { channel, value });
            }
            *slot = (value.clamp(0.0, 255.0) / 255.0) as f32;
        }
        Ok(Self::raw(out[0], out[1], out[2], out[3]))
    }

    /// Create an opaque color from 8-bit style channels.
    pub fn from_ints_opaque(
        r: impl Into<f64>,
        g: impl Into<f64>,
        b: impl Into<f64>,
    ) -> Result<Self> {
        Self::from_ints(r, g, b, 255.0)
    }

    /// Create a color from normalized channels, rejecting NaN and infinities.
    pub fn from_values(r: f32, g: f32, b: f32, a: f32) -> Result<Self> {
        for (channel, value) in [('r', r), ('g', g), ('b', b), ('a', a)] {
            if !value.is_finite() {
                return Err(Error::InvalidChannel {
                    channel,
                    value: f64::from(value),
                });
            }
        }
        Ok(Self::new(r, g, b, a))
    }

    /// Create an opaque color from normalized channels.
    pub fn from_values_opaque(r: f32, g: f32, b: f32) -> Result<Self> {
        Self::from_values(r, g, b, 1.0)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        let (r, g, b, a) = match hex.len() {
            3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
            4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
            6 => (byte(0)?, byte(2)?, byte(4)?, 255),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => return None,
        };
        Self::from_ints(r, g, b, a).ok()
    }

    /// Red channel.
    #[inline]
    pub const fn r(&self) -> f32 {
        self.r
    }

    /// Green channel.
    #[inline]
    pub const fn g(&self) -> f32 {
        self.g
    }

    /// Blue channel.
    #[inline]
    pub const fn b(&self) -> f32 {
        self.b
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(&self) -> f32 {
        self.a
    }

    /// Channels as an `[r, g, b, a]` array, the layout used by raw buffer views.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Rebuild from an `[r, g, b, a]` array, clamping like [`Rgba::new`].
    #[inline]
    pub fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Same color with a different alpha.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Whether alpha is exactly 1.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Whether alpha is exactly 0.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Composite `src` over `dst` with the "over" operator.
    ///
    /// `out.c = src.c * src.a + dst.c * (1 - src.a)` for each color channel
    /// and `out.a = src.a + dst.a * (1 - src.a)`. Colors are not
    /// premultiplied, so over a translucent `dst` the result is darker than
    /// the source; flatten layers onto an opaque base for exact output.
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }
        let inv = 1.0 - src.a;
        Self::new(
            src.r.mul_add(src.a, dst.r * inv),
            src.g.mul_add(src.a, dst.g * inv),
            src.b.mul_add(src.a, dst.b * inv),
            dst.a.mul_add(inv, src.a),
        )
    }

    /// Composite this color over `dst`.
    #[inline]
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        Self::blend(self, dst)
    }

    /// Quantize to 8-bit channels, ignoring alpha.
    ///
    /// Composite over an opaque base first if the color may be translucent.
    #[inline]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (quantize(self.r), quantize(self.g), quantize(self.b))
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rgba({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl From<(u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::raw(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::raw(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }
}
