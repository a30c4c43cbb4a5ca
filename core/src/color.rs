//! 8-bit RGBA color with a small named palette.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(100, 149, 237);
    pub const DARK_BLUE: Self = Self::rgb(0, 82, 172);
    pub const LIGHT_GRAY: Self = Self::rgb(200, 200, 200);
    pub const GRAY: Self = Self::rgb(130, 130, 130);
    pub const DARK_GRAY: Self = Self::rgb(80, 80, 80);
    pub const YELLOW: Self = Self::rgb(253, 249, 0);
    pub const GOLD: Self = Self::rgb(255, 203, 0);
    pub const ORANGE: Self = Self::rgb(255, 161, 0);
    pub const PINK: Self = Self::rgb(255, 109, 194);
    pub const MAROON: Self = Self::rgb(190, 33, 55);
    pub const LIME: Self = Self::rgb(0, 158, 47);
    pub const DARK_GREEN: Self = Self::rgb(0, 117, 44);
    pub const SKY_BLUE: Self = Self::rgb(102, 191, 255);
    pub const PURPLE: Self = Self::rgb(200, 122, 255);
    pub const VIOLET: Self = Self::rgb(135, 60, 190);
    pub const DARK_PURPLE: Self = Self::rgb(112, 31, 126);
    pub const BEIGE: Self = Self::rgb(211, 176, 131);
    pub const BROWN: Self = Self::rgb(127, 106, 79);
    pub const DARK_BROWN: Self = Self::rgb(76, 63, 47);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Fully transparent.
    pub const BLANK: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized components in 0.0-1.0.
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Clear-color form for an sRGB surface: components are decoded to the
    /// linear values wgpu expects. Alpha is normalized but not decoded.
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a as f64 / 255.0,
        }
    }
}

/// Converts an sRGB component to linear space.
fn srgb_to_linear(byte: u8) -> f64 {
    let c = byte as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3), Color::rgba(1, 2, 3, 255));
        assert_eq!(Color::BLANK.a, 0);
    }

    #[test]
    fn test_to_array_normalizes() {
        let [r, g, b, a] = Color::WHITE.to_array();
        assert_eq!((r, g, b, a), (1.0, 1.0, 1.0, 1.0));

        let [r, ..] = Color::BLACK.to_array();
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_to_wgpu_decodes_srgb() {
        let c = Color::rgb(255, 0, 128).to_wgpu();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        // 128/255 in sRGB is roughly 0.2158 linear
        assert!((c.b - 0.2158).abs() < 1e-3);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_to_wgpu_low_end_is_linear_segment() {
        let c = Color::rgb(5, 0, 0).to_wgpu();
        assert!((c.r - (5.0 / 255.0 / 12.92)).abs() < 1e-9);
    }
}
