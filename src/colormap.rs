//! Color stop tables and the data range they are stretched over.

use std::path::PathBuf;
use rgb::RGBA;
use crate::{Color, RGBColor, error::{Error, Result}};

/// An ordered sequence of opaque color stops (aka colormap).
///
/// Index 0 is the color of the minimum of a mapped range and the last
/// index the color of its maximum.  A colormap is immutable once built;
/// reloading a store builds new ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<Color>, // Invariant: length ≥ 1, every alpha is 1.
}

impl Colormap {
    /// Build a colormap from explicit colors.  The alpha of each color
    /// is discarded (stops are always opaque).  Returns `None` if
    /// `stops` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use colormap_legend::Colormap;
    /// let bw = Colormap::from_stops("bw", [RGB8::new(0, 0, 0),
    ///                                      RGB8::new(255, 255, 255)]);
    /// assert_eq!(bw.map(|c| c.len()), Some(2));
    /// ```
    pub fn from_stops<C>(name: impl Into<String>,
                         stops: impl IntoIterator<Item = C>) -> Option<Self>
    where C: RGBColor {
        let stops: Vec<Color> = stops.into_iter()
            .map(|c| RGBA { a: 1., ..c.to_rgba() })
            .collect();
        if stops.is_empty() { return None }
        Some(Colormap { name: name.into(), stops })
    }

    /// Parse a colormap definition: one `R G B` line per stop, integers
    /// in 0..=255 separated by whitespace.  Blank lines are skipped;
    /// any other line that does not parse is an error (reported with
    /// `name` as the file).
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        parse_stops(text)
            .map(|stops| Colormap { name: name.to_owned(), stops })
            .map_err(|line| Error::MalformedColormap {
                file: PathBuf::from(name), line })
    }

    /// The name the colormap is registered under.
    pub fn name(&self) -> &str { &self.name }

    /// Number of stops, at least 1.
    pub fn len(&self) -> usize { self.stops.len() }

    /// All stops, in order.
    pub fn stops(&self) -> &[Color] { &self.stops }

    /// Stop `i`, if it exists.
    pub fn get(&self, i: usize) -> Option<Color> { self.stops.get(i).copied() }

    /// The color of the range minimum.
    pub fn first(&self) -> Color { self.stops[0] }

    /// The color of the range maximum.
    pub fn last(&self) -> Color { self.stops[self.stops.len() - 1] }

    /// Stop `i`, clamped into the valid index range.
    #[inline]
    pub(crate) fn clamped(&self, i: isize) -> Color {
        let last = self.stops.len() - 1;
        self.stops[i.clamp(0, last as isize) as usize]
    }
}

/// Parse the stops of a definition text.  On failure, returns the
/// 1-based number of the offending line, or 0 if there is no stop.
pub(crate) fn parse_stops(text: &str) -> std::result::Result<Vec<Color>, usize> {
    let mut stops = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() { continue }
        match parse_line(line) {
            Some(c) => stops.push(c),
            None => return Err(i + 1),
        }
    }
    if stops.is_empty() { Err(0) } else { Ok(stops) }
}

/// Convert `"128 128 255"` to the opaque color (128/255, 128/255, 1).
fn parse_line(line: &str) -> Option<Color> {
    let mut rgb = [0u8; 3];
    let mut fields = line.split_whitespace();
    for c in rgb.iter_mut() {
        *c = fields.next()?.parse().ok()?;
    }
    if fields.next().is_some() { return None }
    Some(RGBA { r: rgb[0] as f64 / 255., g: rgb[1] as f64 / 255.,
                b: rgb[2] as f64 / 255., a: 1. })
}

/// The data range `[min, max]` mapped onto the full extent of a
/// colormap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub min: f64,
    pub max: f64,
}

impl Dimensions {
    #[inline]
    pub fn new(min: f64, max: f64) -> Self { Dimensions { min, max } }

    /// Width of the range.
    #[inline]
    pub fn diff(&self) -> f64 { self.max - self.min }

    /// A range with `max <= min` has no usable width.
    #[inline]
    pub fn is_degenerate(&self) -> bool { self.max <= self.min }

    /// Both bounds are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Position of `value` in the range: 0 at `min`, 1 at `max`.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.diff()
    }
}
