use crate::raster::Rgba16;

/// Base index of the 6x6x6 color cube inside the 256-color palette.
pub const CUBE_BASE: u8 = 16;

/// A terminal palette color for one destination cell. Indices stay inside
/// the color cube, [16, 231].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteColor {
    Indexed(u8),
    Transparent,
}

impl PaletteColor {
    /// Index for contexts that cannot express transparency; transparent
    /// collapses to cube black.
    pub fn opaque_index(self) -> u8 {
        match self {
            PaletteColor::Indexed(index) => index,
            PaletteColor::Transparent => CUBE_BASE,
        }
    }
}

/// Quantize a sampled color to the 216-entry xterm color cube. Alpha is
/// binary: only a fully zero alpha maps to `Transparent`, anything else is
/// treated as opaque. No nearest-color search, no dithering.
pub fn quantize(sample: Rgba16) -> PaletteColor {
    if sample.is_transparent() {
        return PaletteColor::Transparent;
    }

    let r = cube_level(sample.r);
    let g = cube_level(sample.g);
    let b = cube_level(sample.b);
    PaletteColor::Indexed(CUBE_BASE + 36 * r + 6 * g + b)
}

/// 16-bit channel to a 0..=5 cube coordinate, via the 8-bit value.
fn cube_level(channel: u16) -> u8 {
    let c8 = u32::from(channel >> 8);
    (c8 * 216 / (36 * 256)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(r: u16, g: u16, b: u16) -> Rgba16 {
        Rgba16 { r, g, b, a: 65535 }
    }

    #[test]
    fn full_red_maps_to_196() {
        assert_eq!(quantize(opaque(65535, 0, 0)), PaletteColor::Indexed(196));
    }

    #[test]
    fn cube_corners() {
        assert_eq!(quantize(opaque(0, 0, 0)), PaletteColor::Indexed(16));
        assert_eq!(quantize(opaque(65535, 65535, 65535)), PaletteColor::Indexed(231));
    }

    #[test]
    fn zero_alpha_is_transparent_nonzero_is_opaque() {
        assert_eq!(quantize(Rgba16::TRANSPARENT), PaletteColor::Transparent);
        let barely = Rgba16 { r: 0, g: 0, b: 0, a: 1 };
        assert_eq!(quantize(barely), PaletteColor::Indexed(16));
    }

    #[test]
    fn index_always_inside_cube() {
        for step in 0..=8u32 {
            let channel = (step * 8191) as u16;
            if let PaletteColor::Indexed(index) = quantize(opaque(channel, channel, channel)) {
                assert!((16..=231).contains(&index));
            } else {
                panic!("opaque input quantized to transparent");
            }
        }
    }

    #[test]
    fn cube_level_boundary() {
        // 8-bit 42 is the last level-0 value, 43 the first level-1
        assert_eq!(quantize(opaque(42 << 8, 0, 0)), PaletteColor::Indexed(16));
        assert_eq!(quantize(opaque(43 << 8, 0, 0)), PaletteColor::Indexed(52));
    }
}
