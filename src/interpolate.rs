//! Mapping of sample values to colors.

use rgb::RGBA;
use crate::{Color, Colormap, Dimensions, error::{Error, Result}};

/// Fill value used when the caller supplies none.  With it, any value
/// at or below this threshold counts as missing data.
pub const FILL_VALUE_UNSET: f64 = -1e33;

/// Absolute tolerance under which a value equals the fill value.
pub const FILL_EPSILON: f64 = 1e-6;

/// Color of missing data: opaque black.
pub const NO_DATA: Color = RGBA { r: 0., g: 0., b: 0., a: 1. };

/// Returns the color of `value` when `dims` is stretched over
/// `colormap`.
///
/// - Values equal (within [`FILL_EPSILON`]) to the fill value are
///   [`NO_DATA`].  When `fill_value` is `None` (or exactly
///   [`FILL_VALUE_UNSET`]), values below [`FILL_VALUE_UNSET`] are
///   [`NO_DATA`] too.
/// - A degenerate range (`max <= min`) gives the middle stop.
/// - Below `min`, the first stop fades out linearly, reaching full
///   transparency one range width below `min`.  Above `max`, the last
///   stop fades out symmetrically.
/// - In range, the two stops around the value are linearly
///   interpolated, `min` giving the first stop and `max` the last.
///
/// Fails with [`Error::InvalidValue`] if `value`, the fill value or a
/// bound of `dims` is NaN or infinite, or if the width of `dims`
/// overflows.
///
/// # Example
///
/// ```
/// use colormap_legend::{color_for, Colormap, Dimensions};
/// let ice = Colormap::parse("ice", "0 0 0\n128 128 255\n255 255 255").unwrap();
/// let c = color_for(&ice, Dimensions::new(-10., 10.), 0., None).unwrap();
/// assert_eq!(c, ice.stops()[1]);
/// ```
pub fn color_for(colormap: &Colormap, dims: Dimensions, value: f64,
                 fill_value: Option<f64>) -> Result<Color> {
    let fill = fill_value.unwrap_or(FILL_VALUE_UNSET);
    if !value.is_finite() || !fill.is_finite() {
        return Err(Error::InvalidValue)
    }
    // The two rules stay distinct: equality against any fill value,
    // threshold only for the unset sentinel.
    if (value - fill).abs() < FILL_EPSILON
        || (fill == FILL_VALUE_UNSET && value < FILL_VALUE_UNSET) {
        return Ok(NO_DATA)
    }
    if !dims.is_finite() || !dims.diff().is_finite() {
        return Err(Error::InvalidValue)
    }
    if dims.is_degenerate() {
        return Ok(colormap.stops()[colormap.len() / 2])
    }
    let normalized = dims.normalize(value);
    if !normalized.is_finite() { return Err(Error::InvalidValue) }
    if value < dims.min {
        Ok(fade(colormap.first(), 1. + normalized))
    } else if value > dims.max {
        Ok(fade(colormap.last(), 1. - (normalized - 1.)))
    } else {
        let raw_index = normalized * (colormap.len() - 1) as f64;
        let low = raw_index.floor();
        let c0 = colormap.clamped(low as isize);
        let c1 = colormap.clamped(raw_index.ceil() as isize);
        Ok(lerp(c0, c1, raw_index - low))
    }
}

/// A copy of `c` with alpha `alpha` clamped into \[0, 1\].
#[inline]
fn fade(c: Color, alpha: f64) -> Color {
    RGBA { a: alpha.clamp(0., 1.), ..c }
}

/// Opaque color at `t` ∈ \[0, 1\] from `c0` to `c1`; `t == 0.` gives
/// `c0` exactly.
#[inline]
fn lerp(c0: Color, c1: Color, t: f64) -> Color {
    RGBA { r: c0.r + (c1.r - c0.r) * t,
           g: c0.g + (c1.g - c0.g) * t,
           b: c0.b + (c1.b - c0.b) * t,
           a: 1. }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rgb::RGB8;

    fn rgb() -> Colormap {
        Colormap::from_stops("rgb", [RGB8::new(255, 0, 0), RGB8::new(0, 255, 0),
                                     RGB8::new(0, 0, 255)]).unwrap()
    }

    fn assert_color(c: Color, r: f64, g: f64, b: f64, a: f64) {
        assert_abs_diff_eq!(c.r, r, epsilon = 1e-12);
        assert_abs_diff_eq!(c.g, g, epsilon = 1e-12);
        assert_abs_diff_eq!(c.b, b, epsilon = 1e-12);
        assert_abs_diff_eq!(c.a, a, epsilon = 1e-12);
    }

    #[test]
    fn bounds_give_end_stops() {
        let cm = rgb();
        for dims in [Dimensions::new(0., 1.), Dimensions::new(-3.5, 12.25),
                     Dimensions::new(1e-3, 2e-3)] {
            assert_eq!(color_for(&cm, dims, dims.min, None).unwrap(), cm.first());
            assert_eq!(color_for(&cm, dims, dims.max, None).unwrap(), cm.last());
        }
    }

    #[test]
    fn midpoint_is_middle_stop() {
        let cm = rgb();
        let c = color_for(&cm, Dimensions::new(0., 1.), 0.5, Some(-1e33)).unwrap();
        assert_eq!(c, cm.stops()[1]);
    }

    #[test]
    fn interpolation_starts_from_lower_stop() {
        let cm = rgb();
        let dims = Dimensions::new(0., 1.);
        // raw index 0.5: halfway between red and green.
        assert_color(color_for(&cm, dims, 0.25, None).unwrap(), 0.5, 0.5, 0., 1.);
        // raw index 1.5: halfway between green and blue.
        assert_color(color_for(&cm, dims, 0.75, None).unwrap(), 0., 0.5, 0.5, 1.);
        // raw index 1.2: closer to green.
        assert_color(color_for(&cm, dims, 0.6, None).unwrap(), 0., 0.8, 0.2, 1.);
    }

    #[test]
    fn fade_below_range() {
        let cm = rgb();
        let dims = Dimensions::new(0., 10.);
        assert_color(color_for(&cm, dims, -5., None).unwrap(), 1., 0., 0., 0.5);
        assert_color(color_for(&cm, dims, -10., None).unwrap(), 1., 0., 0., 0.);
        assert_color(color_for(&cm, dims, -1e6, None).unwrap(), 1., 0., 0., 0.);
        let mut prev = 1.;
        for i in 1..40 {
            let c = color_for(&cm, dims, -0.5 * i as f64, None).unwrap();
            assert_eq!((c.r, c.g, c.b), (1., 0., 0.));
            assert!(c.a <= prev);
            prev = c.a;
        }
    }

    #[test]
    fn fade_above_range() {
        let cm = rgb();
        let dims = Dimensions::new(0., 10.);
        assert_color(color_for(&cm, dims, 12.5, None).unwrap(), 0., 0., 1., 0.75);
        assert_color(color_for(&cm, dims, 20., None).unwrap(), 0., 0., 1., 0.);
        assert_color(color_for(&cm, dims, 35., None).unwrap(), 0., 0., 1., 0.);
    }

    #[test]
    fn fade_leaves_stops_untouched() {
        let cm = rgb();
        let before = cm.clone();
        let _ = color_for(&cm, Dimensions::new(0., 1.), -0.5, None).unwrap();
        let _ = color_for(&cm, Dimensions::new(0., 1.), 1.5, None).unwrap();
        assert_eq!(cm, before);
        assert_eq!(cm.first().a, 1.);
    }

    #[test]
    fn explicit_fill_value_is_black() {
        let cm = rgb();
        for dims in [Dimensions::new(0., 1.), Dimensions::new(5., 5.),
                     Dimensions::new(-100., -50.)] {
            for fill in [0., 0.5, -9999., 1e20] {
                assert_eq!(color_for(&cm, dims, fill, Some(fill)).unwrap(), NO_DATA);
            }
        }
        let dims = Dimensions::new(0., 1.);
        assert_eq!(color_for(&cm, dims, 0.5 + 5e-7, Some(0.5)).unwrap(), NO_DATA);
        assert_ne!(color_for(&cm, dims, 0.5 + 1e-5, Some(0.5)).unwrap(), NO_DATA);
        // Not a threshold: values far below an explicit fill are colored.
        let c = color_for(&cm, dims, -2e33, Some(-9999.)).unwrap();
        assert_color(c, 1., 0., 0., 0.);
    }

    #[test]
    fn unset_fill_value_is_a_threshold() {
        let cm = rgb();
        let dims = Dimensions::new(0., 1.);
        assert_eq!(color_for(&cm, dims, -2e33, None).unwrap(), NO_DATA);
        assert_eq!(color_for(&cm, dims, FILL_VALUE_UNSET, None).unwrap(), NO_DATA);
        assert_eq!(color_for(&cm, dims, -2e33, Some(FILL_VALUE_UNSET)).unwrap(),
                   NO_DATA);
        // Just above the threshold: ordinary deep underflow.
        assert_color(color_for(&cm, dims, -1e32, None).unwrap(), 1., 0., 0., 0.);
    }

    #[test]
    fn degenerate_range_gives_middle_stop() {
        let cm = rgb();
        for v in [-1., 3., 3.000001, 10.] {
            assert_eq!(color_for(&cm, Dimensions::new(3., 3.), v, None).unwrap(),
                       cm.stops()[1]);
            assert_eq!(color_for(&cm, Dimensions::new(4., 3.), v, None).unwrap(),
                       cm.stops()[1]);
        }
        let two = Colormap::from_stops("two", [RGB8::new(0, 0, 0),
                                               RGB8::new(255, 255, 255)]).unwrap();
        assert_eq!(color_for(&two, Dimensions::new(0., 0.), 0.5, None).unwrap(),
                   two.last());
    }

    #[test]
    fn single_stop_is_constant() {
        let one = Colormap::from_stops("one", [RGB8::new(0, 255, 0)]).unwrap();
        let dims = Dimensions::new(0., 1.);
        for v in [0., 0.3, 1.] {
            assert_eq!(color_for(&one, dims, v, None).unwrap(), one.first());
        }
    }

    #[test]
    fn invalid_values() {
        let cm = rgb();
        let dims = Dimensions::new(0., 1.);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(color_for(&cm, dims, v, None), Err(Error::InvalidValue)));
            assert!(matches!(color_for(&cm, dims, 0.5, Some(v)),
                             Err(Error::InvalidValue)));
            assert!(matches!(color_for(&cm, Dimensions::new(v, 1.), 0.5, None),
                             Err(Error::InvalidValue)));
            assert!(matches!(color_for(&cm, Dimensions::new(0., v), 0.5, None),
                             Err(Error::InvalidValue)));
        }
        let huge = Dimensions::new(-f64::MAX, f64::MAX);
        for v in [0., 1e300, -0.5 * f64::MAX, f64::MAX] {
            assert!(matches!(color_for(&cm, huge, v, None), Err(Error::InvalidValue)),
                    "{v}");
        }
        // The fill value still wins over an unusable range.
        assert_eq!(color_for(&cm, huge, 0., Some(0.)).unwrap(), NO_DATA);
    }
}
