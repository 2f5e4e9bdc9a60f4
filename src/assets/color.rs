use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Straight-alpha color with channels in `0..=1`, as written in scene JSON.
///
/// Accepts `"#RRGGBB"`, `"#RRGGBBAA"`, `{ "r", "g", "b", "a"? }` or `[r, g, b, a?]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Opaque white.
    pub const WHITE: ColorDef = ColorDef::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: ColorDef = ColorDef::rgba(0.0, 0.0, 0.0, 0.0);

    /// Construct from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Straight-alpha RGBA8, for text brushes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Premultiplied RGBA8, for fills.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let a = self.a.clamp(0.0, 1.0);
        Rgba8Premul {
            r: to_u8(self.r.clamp(0.0, 1.0) * a),
            g: to_u8(self.g.clamp(0.0, 1.0) * a),
            b: to_u8(self.b.clamp(0.0, 1.0) * a),
            a: to_u8(a),
        }
    }
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() || !(s.len() == 6 || s.len() == 8) {
        return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
    }
    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;
    let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };

    Ok(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
