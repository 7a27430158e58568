//! Segmented colormaps and pooled sample statistics.
//!
//! - [`Colormap`]: per-channel piecewise-linear interpolation over
//!   control points, with optional clamping and normalization.  The
//!   predefined maps are [`RGBColor::jet`], [`RGBColor::spectral`],
//!   [`RGBColor::histogram_jet`], [`RGBColor::plate`] and the
//!   z-score map [`RGBColor::stdev_jet`].
//! - [`stats`]: mean, standard deviation, coefficient of variation and
//!   the mean and standard deviation of several groups known only by
//!   their summaries.
//!
//! ```
//! use rgb::RGB8;
//! use colorstat::{RGBColor, ColorRange};
//! let jet = RGB8::jet();
//! assert_eq!(jet.rgb(0.), RGB8::new(64, 128, 255));
//! // Outside the control points: white.
//! assert_eq!(jet.rgb(1.5), RGB8::new(255, 255, 255));
//! ```

use std::marker::PhantomData;
use rgb::{RGB, RGB8, RGB16, RGBA8, RGBA16};

mod error;
mod segments;
mod colormap;
pub mod stats;

pub use error::Error;
pub use segments::ty::{Channel, Segment, SegmentSet, SegmentTable};
pub use segments::{HISTOGRAM_JET, JET, SPECTRAL, histogram_jet_table,
                   plate_table};
pub use colormap::{Colormap, ColormapBuilder, Transfer, WHITE};

/// A range of colors parametrized by reals.
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `x`.
    fn rgb(&self, x: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with their colors.  It is not
    /// required that `a <= b`.  Handy to draw a legend.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Range { range: self,  color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self,  color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j + 1)
    j: usize, // last position to be consumed
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    /// Return the float of the position `k` (assuming it is in the
    /// range `0 ..= self.last`) and its color.
    fn rgb(&self, k: usize) -> (f64, Color) {
        let x = if k == 0 {
            self.a
        } else if k == self.last {
            self.b
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                let t = beta / self.flast;
                (1. - t) * self.a + t * self.b
            } else { x }
        };
        (x, R::rgb(&self.range, x))
    }

    #[inline]
    fn remaining(&self) -> usize { self.j + 1 - self.i }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize { self.remaining() }
}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

impl<Color: RGBColor> ColorRange<Color> for &Colormap<Color> {
    #[inline]
    fn rgb(&self, x: f64) -> Color {
        <Colormap<Color> as ColorRange<Color>>::rgb(*self, x)
    }
}

/// Scale `x` ∈ \[0, 1\] to \[0, `max`\] and round half up.
#[inline]
fn scale(x: f64, max: f64) -> f64 { (x * max + 0.5).floor().clamp(0., max) }

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Create a color from its red, green and blue components, each
    /// in \[0, 1\].
    fn from_unit(c: RGB<f64>) -> Self;

    /// Start building a colormap over `table`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use colorstat::{RGBColor, ColorRange, Segment, SegmentTable};
    /// let ramp = vec![Segment::flat(0., 0.), Segment::flat(1., 1.)];
    /// let grey = RGB8::colormap(SegmentTable::new(ramp.clone(),
    ///                                             ramp.clone(), ramp))
    ///     .min(0.).max(1.)
    ///     .build()?;
    /// assert_eq!(grey.rgb(2.), RGB8::new(255, 255, 255));
    /// # Ok::<(), colorstat::Error>(())
    /// ```
    fn colormap(table: SegmentTable) -> ColormapBuilder<Self> {
        ColormapBuilder::new(table)
    }

    /// Jet with lifted dark tones (see [`struct@JET`]).  Expects
    /// values already normalized to \[0, 1\].
    #[inline]
    fn jet() -> Colormap<Self> { Colormap::trusted(&JET) }

    /// Spectral, white at 0 (see [`struct@SPECTRAL`]).
    #[inline]
    fn spectral() -> Colormap<Self> { Colormap::trusted(&SPECTRAL) }

    /// Jet colored by z-score: use [`Colormap::rgb_with_statistics`]
    /// or pass z-scores to `rgb`.  Z-scores are clamped to
    /// \[-`bounds`, `bounds`\].
    fn stdev_jet(bounds: f64) -> Result<Colormap<Self>, Error> {
        Self::colormap(JET.clone()).stdev_bounds(bounds).build()
    }

    /// Jet for histograms of `bins` bins whose fullest bin holds
    /// `hmax` events, see [`histogram_jet_table`].
    fn histogram_jet(bins: usize, hmax: usize,
                     background: Option<RGB<f64>>)
                     -> Result<Colormap<Self>, Error> {
        Self::colormap(histogram_jet_table(bins, hmax, background))
            .build()
    }

    /// Per-well count colormap, see [`plate_table`].
    #[inline]
    fn plate(max_bin: usize) -> Colormap<Self> {
        Colormap::trusted(&plate_table(max_bin))
    }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn from_unit(c: RGB<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn from_unit(c: RGB<f64>) -> Self {
        RGB8 { r: scale(c.r, 255.) as u8,  g: scale(c.g, 255.) as u8,
               b: scale(c.b, 255.) as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn from_unit(c: RGB<f64>) -> Self {
        RGB16 { r: scale(c.r, 65535.) as u16,  g: scale(c.g, 65535.) as u16,
                b: scale(c.b, 65535.) as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn from_unit(c: RGB<f64>) -> Self {
        let RGB8 { r, g, b } = RGB8::from_unit(c);
        RGBA8 { r, g, b, a: 255 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn from_unit(c: RGB<f64>) -> Self {
        let RGB16 { r, g, b } = RGB16::from_unit(c);
        RGBA16 { r, g, b, a: 65535 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_range() {
        let jet = RGB8::jet();
        for (i, (x, c)) in (&jet).range(0., 1., 11).enumerate() {
            assert!((x - 0.1 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", x, 0.1 * i as f64);
            assert_eq!(jet.rgb(x), c);
        }
    }

    #[test]
    fn range_is_exact_size_and_double_ended() {
        let mut r = RGB8::stdev_jet(2.).unwrap().range(-2., 2., 5);
        assert_eq!(r.len(), 5);
        let (x, _) = r.next_back().unwrap();
        assert_eq!(x, 2.);
        let (x, _) = r.next().unwrap();
        assert_eq!(x, -2.);
        assert_eq!(r.len(), 3);
        let xs: Vec<_> = r.map(|(x, _)| x).collect();
        assert_eq!(xs, vec![-1., 0., 1.]);
        assert_eq!(RGB8::jet().range(0., 1., 0).count(), 0);
        let mut one = RGB8::jet().range(0.5, 0.7, 1);
        assert_eq!(one.len(), 1);
        assert!(one.next_back().is_some());
        assert!(one.next().is_none());
    }

    #[test]
    fn range_with_infinite_bounds() {
        let r: Vec<_> = RGB8::jet().range(f64::NEG_INFINITY, f64::INFINITY, 3)
            .map(|(x, _)| x).collect();
        assert_eq!(r, vec![f64::MIN, 0., f64::MAX]);
    }

    #[test]
    fn rounding_is_half_up() {
        let c = RGB8::from_unit(RGB { r: 0.5, g: 0.25, b: 1. });
        // 127.5 → 128, 63.75 → 64
        assert_eq!(c, RGB8::new(128, 64, 255));
        let c = RGB16::from_unit(RGB { r: 0., g: 0.5, b: 1. });
        assert_eq!(c, RGB16::new(0, 32768, 65535));
        assert_eq!(RGBA8::from_unit(WHITE), RGBA8::new(255, 255, 255, 255));
        assert_eq!(RGBA16::from_unit(RGB { r: 0., g: 0., b: 0. }).a, 65535);
    }

    #[test]
    fn predefined_maps() {
        let h = RGB8::histogram_jet(10, 10, None).unwrap();
        assert_eq!(h.rgb(0.), RGB8::new(255, 255, 255));
        assert_eq!(h.red().len(), 8);
        assert!(RGB8::histogram_jet(10, 10, Some(RGB { r: 2., g: 0., b: 0. }))
                .is_err());
        let p = RGB8::plate(1000);
        assert_eq!(p.rgb(0.), RGB8::new(255, 255, 255));
        assert_eq!(p.rgb(0.9 * (1. / 1001.)), RGB8::new(128, 128, 128));
        assert_eq!(p.rgb(1.), RGB8::new(255, 255, 255));
    }
}
