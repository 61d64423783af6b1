//! RGBA colors as supplied by physics debug callbacks, and their packed
//! GPU form.

/// RGBA color with float channels in [0, 1], the format 2D physics
/// engines hand to their debug-draw callbacks.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into four bytes, RGBA order with red in the low byte. Each
    /// channel is scaled by 255 and truncated; out-of-range input
    /// saturates.
    pub fn pack(self) -> u32 {
        let byte = |c: f32| (c * 255.0) as u8;
        u32::from_le_bytes([byte(self.r), byte(self.g), byte(self.b), byte(self.a)])
    }

    /// The translucent interior used under solid shape outlines: half of
    /// each RGB channel at 50% alpha, independent of the input alpha.
    pub fn fill(self) -> Self {
        Self {
            r: 0.5 * self.r,
            g: 0.5 * self.g,
            b: 0.5 * self.b,
            a: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_is_rgba_low_byte_first() {
        let packed = Color::rgba(1.0, 0.0, 0.0, 1.0).pack();
        assert_eq!(packed, 0xff00_00ff);

        let packed = Color::rgba(0.0, 1.0, 0.0, 0.0).pack();
        assert_eq!(packed, 0x0000_ff00);
    }

    #[test]
    fn pack_saturates_out_of_range() {
        let packed = Color::rgba(2.0, -1.0, 0.5, 1.0).pack();
        let bytes = packed.to_le_bytes();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 0);
        assert_eq!(bytes[2], 127);
    }

    #[test]
    fn fill_halves_rgb_and_fixes_alpha() {
        let fill = Color::rgba(1.0, 0.5, 0.0, 1.0).fill();
        assert_eq!(fill, Color::rgba(0.5, 0.25, 0.0, 0.5));
        // Input alpha does not influence the fill alpha.
        assert_eq!(Color::rgba(1.0, 1.0, 1.0, 0.1).fill().a, 0.5);
    }
}
