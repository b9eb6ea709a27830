//! RGB display colours.

/// An 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `brightness`, clamped to [0, 1]
    pub fn shade(self, brightness: f64) -> Self {
        let k = brightness.clamp(0.0, 1.0);
        let channel = |c: u8| (c as f64 * k).round() as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Perceived brightness in [0, 1] (Rec. 601 weights)
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
