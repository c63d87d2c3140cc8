pub mod loader;
pub mod sampler;

/// One sampled color with 16 bits per channel, matching the precision the
/// decode collaborators report before quantization narrows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba16 {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Pixel extent of the logical animation canvas. Individual frame rasters may
/// cover only an offset sub-region of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A decoded RGBA pixel buffer positioned inside the canvas. All pixel
/// queries take canvas coordinates; anything outside the raster's own
/// sub-region reads as absent.
#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    left: u32,
    top: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::with_offset(width, height, 0, 0, data)
    }

    pub fn with_offset(width: u32, height: u32, left: u32, top: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), width as usize * height as usize * 4);
        Self { width, height, left, top, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && x < self.left + self.width
            && y < self.top + self.height
    }

    /// Pixel at canvas coordinates, widened to 16 bits per channel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba16> {
        if !self.contains(x, y) {
            return None;
        }

        let index = ((y - self.top) as usize * self.width as usize + (x - self.left) as usize) * 4;
        let widen = |c: u8| u16::from(c) * 0x101;
        Some(Rgba16 {
            r: widen(self.data[index]),
            g: widen(self.data[index + 1]),
            b: widen(self.data[index + 2]),
            a: widen(self.data[index + 3]),
        })
    }
}

/// How the screen region a frame occupied should be treated once its delay
/// has elapsed and the next frame is about to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Disposal {
    #[default]
    None,
    DoNotDispose,
    Background,
    Previous,
}

/// One animation frame: a raster, its display duration in 10 ms ticks, and
/// its disposal policy.
#[derive(Clone, Debug)]
pub struct Frame {
    pub raster: Raster,
    pub delay_ticks: u16,
    pub disposal: Disposal,
}

impl Frame {
    pub fn still(raster: Raster) -> Self {
        Self { raster, delay_ticks: 0, disposal: Disposal::None }
    }
}

/// An ordered frame list sharing one canvas. A still image is a one-frame
/// series with zero delay.
#[derive(Clone, Debug)]
pub struct FrameSeries {
    canvas: CanvasSize,
    frames: Vec<Frame>,
}

impl FrameSeries {
    pub fn new(canvas: CanvasSize) -> Self {
        Self { canvas, frames: Vec::new() }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}
