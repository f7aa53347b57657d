//! Colormaps loaded from definition files, value-to-color mapping and
//! legend images.
//!
//! - [`Registry`] / [`ColormapStore`]: named [`Colormap`]s read from a
//!   directory of `R G B` definition files, reloadable atomically.
//! - [`color_for`]: the color of a sample value over a [`Dimensions`]
//!   range, with fading outside the range and a fill value for
//!   missing data.
//! - [`generate`]: a [`LegendImage`] swatch of a colormap.
//!
//! # Example
//!
//! ```
//! use colormap_legend::{Colormap, Dimensions, LoadOptions, Registry};
//! let ice = Colormap::parse("ice", "0 0 0\n128 128 255\n255 255 255")?;
//! let registry = Registry::from_colormaps([ice], &LoadOptions::default())?;
//! let c = registry.color_for("ice", Dimensions::new(-10., 10.), 0., None)?;
//! assert_eq!((c.b, c.a), (1., 1.));
//! # Ok::<(), colormap_legend::Error>(())
//! ```

use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod colormap;
mod error;
mod interpolate;
mod legend;
mod store;

pub use colormap::{Colormap, Dimensions};
pub use error::{Error, Result};
pub use interpolate::{color_for, FILL_EPSILON, FILL_VALUE_UNSET, NO_DATA};
pub use legend::{generate, LegendImage};
pub use store::{ColormapStore, LoadOptions, Registry};

/// A color with red, green, blue and alpha components in \[0, 1\].
pub type Color = RGBA<f64>;

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 1\]).
    fn to_rgba(&self) -> Color;

    /// Create a color from its RGBA components (in \[0, 1\]).
    /// Components outside this range are clamped.
    fn from_rgba(rgba: Color) -> Self;

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA{ r, g, b, a } = Self::to_rgba(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }
}

#[inline]
fn to_u8(x: f64) -> u8 { (x.clamp(0., 1.) * 255.).round() as u8 }

#[inline]
fn to_u16(x: f64) -> u16 { (x.clamp(0., 1.) * 65535.).round() as u16 }

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> Color { *self }

    #[inline]
    fn from_rgba(c: Color) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> Color {
        RGBA{ r: self.r as f64 / 255., g: self.g as f64 / 255.,
              b: self.b as f64 / 255., a: 1. }
    }

    #[inline]
    fn from_rgba(c: Color) -> Self {
        RGB8 { r: to_u8(c.r),  g: to_u8(c.g),  b: to_u8(c.b) }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> Color {
        RGBA{ r: self.r as f64 / 65535., g: self.g as f64 / 65535.,
              b: self.b as f64 / 65535., a: 1. }
    }

    #[inline]
    fn from_rgba(c: Color) -> Self {
        RGB16 { r: to_u16(c.r),  g: to_u16(c.g),  b: to_u16(c.b) }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> Color {
        RGBA{ r: self.r as f64 / 255., g: self.g as f64 / 255.,
              b: self.b as f64 / 255., a: self.a as f64 / 255. }
    }

    #[inline]
    fn from_rgba(c: Color) -> Self {
        RGBA8 { r: to_u8(c.r),  g: to_u8(c.g),  b: to_u8(c.b), a: to_u8(c.a) }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> Color {
        RGBA{ r: self.r as f64 / 65535., g: self.g as f64 / 65535.,
              b: self.b as f64 / 65535., a: self.a as f64 / 65535. }
    }

    #[inline]
    fn from_rgba(c: Color) -> Self {
        RGBA16 { r: to_u16(c.r),  g: to_u16(c.g),  b: to_u16(c.b),
                 a: to_u16(c.a) }
    }
}
