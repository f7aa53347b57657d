//! Legend images: a colormap drawn as a left-to-right swatch.

use std::mem::size_of;
use crate::{Color, Colormap, RGBColor, error::{Error, Result}};
use rgb::RGBA8;

/// A `width` × `height` raster of colors, stored row-major.  Columns
/// run from the first stop (left) to the last stop (right); all rows
/// are identical.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>, // Invariant: length = width * height
}

impl LegendImage {
    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    /// All pixels, row after row.
    pub fn pixels(&self) -> &[Color] { &self.pixels }

    /// The color at column `col` of row `row`.
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        if col >= self.width || row >= self.height { return None }
        Some(self.pixels[row * self.width + col])
    }

    /// Row `row`, left to right.
    pub fn row(&self, row: usize) -> Option<&[Color]> {
        let start = row.checked_mul(self.width)?;
        self.pixels.get(start .. start + self.width)
    }

    /// Convert every pixel to the color type `C`, row-major.
    pub fn to_pixels<C: RGBColor>(&self) -> Vec<C> {
        self.pixels.iter().map(|&c| C::from_rgba(c)).collect()
    }

    /// Pack the image as RGBA8 bytes, row-major, ready for a texture
    /// upload.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 * self.pixels.len());
        for &c in &self.pixels {
            let RGBA8 { r, g, b, a } = RGBA8::from_rgba(c);
            bytes.extend_from_slice(&[r, g, b, a]);
        }
        bytes
    }
}

/// Draw `colormap` as a `width` × `height` legend.  Fails with
/// [`Error::InvalidLegendSize`] if a dimension is 0 or the image would
/// not fit in memory.
///
/// Column `col` shows stop `⌊col · n / width⌋` where `n` is the number
/// of stops: stops are sampled, not interpolated, so a short colormap
/// shows as bands of equal width.  The result only depends on the
/// arguments, which makes it safe to cache.
///
/// # Example
///
/// ```
/// use colormap_legend::{generate, Colormap};
/// let bw = Colormap::parse("bw", "0 0 0\n255 255 255").unwrap();
/// let img = generate(&bw, 4, 2).unwrap();
/// assert_eq!(img.get(1, 1), Some(bw.first()));
/// assert_eq!(img.get(2, 0), Some(bw.last()));
/// ```
pub fn generate(colormap: &Colormap, width: usize, height: usize)
                -> Result<LegendImage> {
    let len = width.checked_mul(height)
        .filter(|&len| len > 0)
        .filter(|&len| len.checked_mul(size_of::<Color>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize));
    let Some(len) = len else {
        return Err(Error::InvalidLegendSize { width, height })
    };
    let n = colormap.len() as u128;
    let row: Vec<Color> = (0 .. width)
        .map(|col| {
            let i = (col as u128 * n / width as u128).min(n - 1);
            colormap.stops()[i as usize]
        })
        .collect();
    let mut pixels = Vec::with_capacity(len);
    for _ in 0 .. height {
        pixels.extend_from_slice(&row);
    }
    Ok(LegendImage { width, height, pixels })
}
