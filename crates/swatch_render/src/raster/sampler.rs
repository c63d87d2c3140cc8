use super::{Raster, Rgba16};

/// How a destination cell's source region collapses to one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleMode {
    /// Average every pixel in the region, truncating division.
    Average,
    /// Take the region's top-left pixel only.
    Point,
}

/// Collapse the half-open region `[x0, x1) × [y0, y1)` of `raster` to one
/// color. Coordinates are canvas coordinates; a region that is not fully
/// inside the raster's own sub-region resolves to transparent rather than an
/// error, so frames smaller than the canvas read as holes.
pub fn sample_region(
    raster: &Raster,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    mode: SampleMode,
) -> Rgba16 {
    if x1 <= x0 || y1 <= y0 {
        return Rgba16::TRANSPARENT;
    }

    if !raster.contains(x0, y0) || !raster.contains(x1 - 1, y1 - 1) {
        return Rgba16::TRANSPARENT;
    }

    match mode {
        SampleMode::Point => raster.pixel(x0, y0).unwrap_or(Rgba16::TRANSPARENT),
        SampleMode::Average => {
            let mut r_sum: u64 = 0;
            let mut g_sum: u64 = 0;
            let mut b_sum: u64 = 0;
            let mut a_sum: u64 = 0;
            for y in y0..y1 {
                for x in x0..x1 {
                    // contains() above covers the whole region
                    let pixel = raster.pixel(x, y).unwrap_or(Rgba16::TRANSPARENT);
                    r_sum += u64::from(pixel.r);
                    g_sum += u64::from(pixel.g);
                    b_sum += u64::from(pixel.b);
                    a_sum += u64::from(pixel.a);
                }
            }
            let count = u64::from(x1 - x0) * u64::from(y1 - y0);
            Rgba16 {
                r: (r_sum / count) as u16,
                g: (g_sum / count) as u16,
                b: (b_sum / count) as u16,
                a: (a_sum / count) as u16,
            }
        },
    }
}
