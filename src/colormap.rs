//! Linear segmented colormaps.

use std::marker::PhantomData;
use log::{debug, trace};
use rgb::RGB;
use crate::{ColorRange, Error, RGBColor};
use crate::segments::ty::{Channel, SegmentSet, SegmentTable};

/// Maps a (clamped) value to the normalized position looked up in
/// the segment tables.
#[derive(Clone, Copy, Debug, Default)]
pub enum Transfer {
    /// The value is already normalized.
    #[default]
    Identity,
    /// Send `low` to 0 and `high` to 1, linearly.  Values outside the
    /// window map outside \[0, 1\].
    Window { low: f64, high: f64 },
    /// Any other normalization.
    Custom(fn(f64) -> f64),
}

impl Transfer {
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Transfer::Identity => value,
            Transfer::Window { low, high } => (value - low) / (high - low),
            Transfer::Custom(f) => f(value),
        }
    }
}

/// Colormap interpolating each channel linearly between control
/// points, in the manner of matplotlib's `LinearSegmentedColormap`.
///
/// Built with [`RGBColor::colormap`] or one of the predefined maps
/// such as [`RGBColor::jet`].  See the [`ColorRange`] trait for
/// methods.
#[derive(Clone, Debug)]
pub struct Colormap<Color> {
    red: SegmentSet,
    green: SegmentSet,
    blue: SegmentSet,
    min: Option<f64>,
    max: Option<f64>, // min <= max when both are set
    transfer: Transfer,
    out_of_bounds: RGB<f64>,
    color: PhantomData<Color>,
}

/// White, in \[0, 1\] components.
pub const WHITE: RGB<f64> = RGB { r: 1., g: 1., b: 1. };

impl<Color> Colormap<Color>
where Color: RGBColor {
    /// Colormap over a built-in table, with default options.
    pub(crate) fn trusted(table: &SegmentTable) -> Self {
        Colormap {
            red: SegmentSet::trusted(Channel::Red, table.red.clone()),
            green: SegmentSet::trusted(Channel::Green, table.green.clone()),
            blue: SegmentSet::trusted(Channel::Blue, table.blue.clone()),
            min: None,
            max: None,
            transfer: Transfer::Identity,
            out_of_bounds: WHITE,
            color: PhantomData,
        }
    }

    pub fn red(&self) -> &SegmentSet { &self.red }

    pub fn green(&self) -> &SegmentSet { &self.green }

    pub fn blue(&self) -> &SegmentSet { &self.blue }

    /// Values below this are raised to it before the transfer.
    pub fn min(&self) -> Option<f64> { self.min }

    /// Values above this are lowered to it before the transfer.
    pub fn max(&self) -> Option<f64> { self.max }

    pub fn transfer(&self) -> Transfer { self.transfer }

    /// Per-channel color used when the normalized value falls outside
    /// the control points.
    pub fn out_of_bounds(&self) -> RGB<f64> { self.out_of_bounds }

    fn component(&self, set: &SegmentSet, norm: f64, fallback: f64) -> f64 {
        match set.component(norm) {
            Some(c) => c,
            None => {
                trace!("{} channel: {norm} outside control points, \
                        using {fallback}", set.channel());
                fallback
            }
        }
    }

    /// Color of `value` with components in \[0, 1\], before they are
    /// scaled to `Color`.
    pub fn rgb_unit(&self, value: f64) -> RGB<f64> {
        let mut value = value;
        if let Some(min) = self.min {
            if value < min { value = min }
        }
        if let Some(max) = self.max {
            if value > max { value = max }
        }
        let norm = self.transfer.apply(value);
        RGB {
            r: self.component(&self.red, norm, self.out_of_bounds.r),
            g: self.component(&self.green, norm, self.out_of_bounds.g),
            b: self.component(&self.blue, norm, self.out_of_bounds.b),
        }
    }

    /// Color of the z-score `(value - mean) / stdev`.
    ///
    /// Meant for colormaps built with
    /// [`ColormapBuilder::stdev_bounds`].  A zero `stdev` gives an
    /// infinite or NaN z-score; with a clamp range the infinite ones
    /// land on the bounds, NaN always gives the out-of-bounds color.
    pub fn rgb_with_statistics(&self, value: f64, mean: f64,
                               stdev: f64) -> Color {
        self.rgb((value - mean) / stdev)
    }
}

impl<Color> ColorRange<Color> for Colormap<Color>
where Color: RGBColor {
    /// Clamp `value` to the `min`/`max` range (when set), normalize it
    /// with the transfer function and interpolate each channel.
    fn rgb(&self, value: f64) -> Color {
        Color::from_unit(self.rgb_unit(value))
    }
}


/// Options for a [`Colormap`].
///
/// Created by [`RGBColor::colormap`].
#[derive(Clone, Debug)]
pub struct ColormapBuilder<Color> {
    table: SegmentTable,
    min: Option<f64>,
    max: Option<f64>,
    transfer: Transfer,
    out_of_bounds: RGB<f64>,
    bounds: Option<f64>,
    color: PhantomData<Color>,
}

impl<Color> ColormapBuilder<Color>
where Color: RGBColor {
    pub(crate) fn new(table: SegmentTable) -> Self {
        ColormapBuilder {
            table,
            min: None,
            max: None,
            transfer: Transfer::Identity,
            out_of_bounds: WHITE,
            bounds: None,
            color: PhantomData,
        }
    }

    /// Clamp values below `min` to `min`.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Clamp values above `max` to `max`.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = transfer;
        self
    }

    /// Color (components in \[0, 1\]) used for normalized values
    /// outside the control points.  Defaults to white.
    pub fn out_of_bounds(mut self, c: RGB<f64>) -> Self {
        self.out_of_bounds = c;
        self
    }

    /// Color values by how many standard deviations they are from the
    /// mean: values are clamped to \[-`bounds`, `bounds`\] and that
    /// window is mapped to \[0, 1\].  Overrides [`min`](Self::min),
    /// [`max`](Self::max) and [`transfer`](Self::transfer).
    pub fn stdev_bounds(mut self, bounds: f64) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn build(self) -> Result<Colormap<Color>, Error> {
        let ColormapBuilder { table, mut min, mut max, mut transfer,
                              out_of_bounds, bounds, .. } = self;
        if let Some(b) = bounds {
            if !(b.is_finite() && b > 0.) {
                return Err(Error::InvalidBounds(b))
            }
            min = Some(-b);
            max = Some(b);
            transfer = Transfer::Window { low: -b, high: b };
        }
        for m in [min, max].into_iter().flatten() {
            if m.is_nan() { return Err(Error::NanClamp(m)) }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max { return Err(Error::InvertedClamp { min, max }) }
        }
        if let Transfer::Window { low, high } = transfer {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(Error::InvalidWindow { low, high })
            }
        }
        for c in [out_of_bounds.r, out_of_bounds.g, out_of_bounds.b] {
            if !(0. ..= 1.).contains(&c) {
                return Err(Error::InvalidFallback(c))
            }
        }
        let red = SegmentSet::new(Channel::Red, table.red)?;
        let green = SegmentSet::new(Channel::Green, table.green)?;
        let blue = SegmentSet::new(Channel::Blue, table.blue)?;
        debug!("colormap with {}/{}/{} control points, clamp {:?}..{:?}, \
                transfer {:?}", red.len(), green.len(), blue.len(),
               min, max, transfer);
        Ok(Colormap { red, green, blue, min, max, transfer, out_of_bounds,
                      color: PhantomData })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rgb::RGB8;
    use crate::segments::{JET, SPECTRAL};
    use crate::segments::ty::Segment;

    fn grey_ramp() -> SegmentTable {
        let ch = vec![Segment::flat(0., 0.), Segment::flat(1., 1.)];
        SegmentTable::new(ch.clone(), ch.clone(), ch)
    }

    #[test]
    fn jet_at_control_points() {
        let jet = RGB8::jet();
        // r 0.25, g 0.5, b 1.0
        assert_eq!(jet.rgb(0.), RGB8::new(64, 128, 255));
        // r exact 0.25, g 0.95 (0.125 → 0.375), b 0.9758 (0.34 → 0.65)
        assert_eq!(jet.rgb(0.35), RGB8::new(64, 242, 249));
    }

    #[test]
    fn jet_interpolates_channels() {
        let jet = RGB8::jet();
        let u = jet.rgb_unit(0.5);
        assert_relative_eq!(u.r, 0.25 + (0.15 / 0.31) * 0.75, epsilon = 1e-12);
        // Red: 0.6129 * 255 = 156.29
        assert_eq!(jet.rgb(0.5).r, 156);
    }

    #[test]
    fn out_of_bounds_is_white_by_default() {
        let jet = RGB8::jet();
        assert_eq!(jet.rgb(-0.1), RGB8::new(255, 255, 255));
        assert_eq!(jet.rgb(1.1), RGB8::new(255, 255, 255));
        assert_eq!(jet.rgb(f64::NAN), RGB8::new(255, 255, 255));
        // 1.0 is a control point of every channel.
        assert_eq!(jet.rgb(1.), RGB8::new(191, 64, 64));
    }

    #[test]
    fn fallback_is_per_channel() {
        let table = SegmentTable::new(
            vec![Segment::flat(0., 0.), Segment::flat(1., 0.)],
            vec![Segment::flat(0., 0.), Segment::flat(0.5, 0.)],
            vec![Segment::flat(0., 0.), Segment::flat(1., 0.)]);
        let cmap = RGB8::colormap(table)
            .out_of_bounds(RGB { r: 0.2, g: 0.4, b: 0.6 })
            .build().unwrap();
        assert_eq!(cmap.rgb(0.75), RGB8::new(0, 102, 0));
        assert_eq!(cmap.rgb(2.), RGB8::new(51, 102, 153));
    }

    #[test]
    fn min_max_clamp_before_transfer() {
        let cmap = RGB8::colormap(grey_ramp()).min(0.2).max(0.6)
            .build().unwrap();
        assert_eq!(cmap.rgb(-5.), cmap.rgb(0.2));
        assert_eq!(cmap.rgb(5.), cmap.rgb(0.6));
        assert_eq!(cmap.rgb(0.4), RGB8::new(102, 102, 102));
        // Only one side set.
        let cmap = RGB8::colormap(grey_ramp()).max(0.5).build().unwrap();
        assert_eq!(cmap.rgb(0.9).r, 128);
        assert_eq!(cmap.rgb(-0.1), RGB8::new(255, 255, 255));
    }

    #[test]
    fn custom_transfer() {
        let cmap = RGB8::colormap(grey_ramp())
            .transfer(Transfer::Custom(|v| v / 100.))
            .build().unwrap();
        assert_eq!(cmap.rgb(50.).g, 128);
        assert_eq!(cmap.rgb(100.).g, 255);
    }

    #[test]
    fn stdev_window_maps_bounds_to_unit_interval() {
        let cmap = RGB8::stdev_jet(2.).unwrap();
        assert_eq!(cmap.min(), Some(-2.));
        assert_eq!(cmap.max(), Some(2.));
        assert_eq!(cmap.rgb(-2.), RGB8::jet().rgb(0.));
        assert_eq!(cmap.rgb(0.), RGB8::jet().rgb(0.5));
        assert_eq!(cmap.rgb(2.), RGB8::jet().rgb(1.));
    }

    #[test]
    fn stdev_clamps_before_normalizing() {
        let cmap = RGB8::stdev_jet(2.).unwrap();
        // Without the clamp, -7 would normalize to -1.25 and +7 to
        // 2.25, both giving the white fallback.
        assert_eq!(cmap.rgb(-7.), cmap.rgb(-2.));
        assert_eq!(cmap.rgb(7.), cmap.rgb(2.));
        assert_ne!(cmap.rgb(7.), RGB8::new(255, 255, 255));
    }

    #[test]
    fn rgb_with_statistics_uses_z_score() {
        let cmap = RGB8::stdev_jet(3.).unwrap();
        assert_eq!(cmap.rgb_with_statistics(13., 10., 2.), cmap.rgb(1.5));
        assert_eq!(cmap.rgb_with_statistics(10., 10., 2.), cmap.rgb(0.));
        // Zero spread: infinite z-scores are clamped, NaN falls back.
        assert_eq!(cmap.rgb_with_statistics(11., 10., 0.), cmap.rgb(3.));
        assert_eq!(cmap.rgb_with_statistics(9., 10., 0.), cmap.rgb(-3.));
        assert_eq!(cmap.rgb_with_statistics(10., 10., 0.),
                   RGB8::new(255, 255, 255));
    }

    #[test]
    fn stdev_bounds_override_clamp_and_transfer() {
        let cmap = RGB8::colormap(JET.clone()).min(5.).max(6.)
            .transfer(Transfer::Identity)
            .stdev_bounds(1.)
            .build().unwrap();
        assert_eq!(cmap.min(), Some(-1.));
        assert!(matches!(cmap.transfer(),
                         Transfer::Window { low, high } if low == -1. && high == 1.));
    }

    #[test]
    fn build_rejects_bad_options() {
        let b = || RGB8::colormap(grey_ramp());
        assert_eq!(b().min(1.).max(0.).build().unwrap_err(),
                   Error::InvertedClamp { min: 1., max: 0. });
        assert!(matches!(b().min(f64::NAN).build(), Err(Error::NanClamp(_))));
        assert_eq!(b().stdev_bounds(0.).build().unwrap_err(),
                   Error::InvalidBounds(0.));
        assert!(matches!(b().stdev_bounds(f64::INFINITY).build(),
                         Err(Error::InvalidBounds(_))));
        assert_eq!(b().transfer(Transfer::Window { low: 1., high: 1. })
                   .build().unwrap_err(),
                   Error::InvalidWindow { low: 1., high: 1. });
        assert_eq!(b().out_of_bounds(RGB { r: 1., g: 1.5, b: 1. })
                   .build().unwrap_err(),
                   Error::InvalidFallback(1.5));
        let mut t = grey_ramp();
        t.blue.clear();
        assert_eq!(RGB8::colormap(t).build().unwrap_err(),
                   Error::EmptyChannel(Channel::Blue));
    }

    #[test]
    fn builder_sorts_control_points() {
        let mut t = grey_ramp();
        t.red.reverse();
        let cmap = RGB8::colormap(t).build().unwrap();
        assert_eq!(cmap.red().first().position, 0.);
        assert_eq!(cmap.rgb(0.25).r, 64);
    }

    #[test]
    fn spectral_starts_white() {
        let s = RGB8::spectral();
        assert_eq!(s.rgb(0.), RGB8::new(255, 255, 255));
        assert_eq!(s.rgb(0.5), RGB8::new(0, 187, 0));
        assert_eq!(s.red().len(), SPECTRAL.red.len());
    }

    #[test]
    fn unit_output() {
        let c: RGB<f64> = RGB::<f64>::jet().rgb(0.);
        assert_eq!(c, RGB { r: 0.25, g: 0.5, b: 1. });
    }
}
