//! RGBA colors (linear 0..1 components) and the named palette used by defaults.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.514, 0.757, 0.404);
    pub const RED: Color = Color::rgb(0.988, 0.384, 0.333);
    pub const BLUE: Color = Color::rgb(0.345, 0.769, 0.867);
    pub const ORANGE: Color = Color::rgb(1.0, 0.525, 0.184);
    pub const PURPLE: Color = Color::rgb(0.604, 0.447, 0.675);
    pub const GREY: Color = Color::rgb(0.533, 0.533, 0.533);
    pub const DARKER_GREY: Color = Color::rgb(0.133, 0.133, 0.133);
    pub const TRANSPARENT: Color = Color([0.0, 0.0, 0.0, 0.0]);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color([r, g, b, 1.0])
    }

    pub fn with_alpha(self, a: f32) -> Self {
        let [r, g, b, _] = self.0;
        Color([r, g, b, a.clamp(0.0, 1.0)])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(format!("invalid color '{s}': expected 6 or 8 hex digits"));
        }
        let mut out = [1.0f32; 4];
        for (i, slot) in out.iter_mut().enumerate().take(hex.len() / 2) {
            let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|e| format!("invalid color '{s}': {e}"))?;
            *slot = byte as f32 / 255.0;
        }
        Ok(Color(out))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
