use image::{ImageBuffer, Pixel};

/// A pixel grid addressed bottom-up: `y = 0` is the last stored row, the
/// same orientation the samplers use for `v = 0`. Writes outside the grid
/// are dropped silently, so generators can draw thick strokes near edges
/// without bounds checks of their own.
pub struct Canvas<P: Pixel<Subpixel = u8>> {
    img: ImageBuffer<P, Vec<u8>>,
}

impl<P: Pixel<Subpixel = u8>> Canvas<P> {
    pub fn new(width: u32, height: u32, fill: P) -> Self {
        Self {
            img: ImageBuffer::from_pixel(width, height, fill),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    fn row(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        (x < self.width() && y < self.height()).then(|| (x, self.height() - 1 - y))
    }

    pub fn put(&mut self, x: i32, y: i32, px: P) {
        if let Some((x, row)) = self.row(x, y) {
            self.img.put_pixel(x, row, px);
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<P> {
        self.row(x, y).map(|(x, row)| *self.img.get_pixel(x, row))
    }

    /// Fills `[x, x + w) x [y, y + h)`, clipped to the grid.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, px: P) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, px);
            }
        }
    }

    pub fn into_image(self) -> ImageBuffer<P, Vec<u8>> {
        self.img
    }
}
