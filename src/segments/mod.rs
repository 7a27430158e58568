//! Built-in segment tables.

use lazy_static::lazy_static;
use rgb::RGB;
pub(crate) mod ty;
use ty::*;

const fn flat(position: f64, value: f64) -> Segment {
    Segment::flat(position, value)
}

lazy_static! {
    /// Jet as used to color base-call confidence windows: dark tones
    /// are lifted so text stays readable on top of them.
    pub static ref JET: SegmentTable = SegmentTable {
        red: vec![flat(0.0, 0.25), flat(0.35, 0.25), flat(0.66, 1.0),
                  flat(0.89, 1.0), flat(1.0, 0.75)],
        green: vec![flat(0.0, 0.5), flat(0.125, 0.5), flat(0.375, 1.0),
                    flat(0.64, 1.0), flat(0.91, 0.25), flat(1.0, 0.25)],
        blue: vec![flat(0.0, 1.0), flat(0.11, 1.0), flat(0.34, 1.0),
                   flat(0.65, 0.25), flat(1.0, 0.25)],
    };

    /// Jet variant for count histograms: white at 0, then the usual
    /// blue to red sweep.
    pub static ref HISTOGRAM_JET: SegmentTable = SegmentTable {
        red: vec![flat(0.0, 1.0), flat(0.35, 0.5), flat(0.66, 1.0),
                  flat(0.89, 1.0), flat(1.0, 1.0)],
        green: vec![flat(0.0, 1.0), flat(0.125, 0.25), flat(0.375, 1.0),
                    flat(0.64, 1.0), flat(0.91, 0.0), flat(1.0, 0.0)],
        blue: vec![flat(0.0, 1.0), flat(0.11, 1.0), flat(0.34, 1.0),
                   flat(0.65, 0.0), flat(1.0, 0.75)],
    };

    /// 21-point spectral table (white at 0) used for plate heat maps.
    pub static ref SPECTRAL: SegmentTable = {
        fn steps(values: [f64; 21]) -> Vec<Segment> {
            values.iter().enumerate()
                .map(|(i, &v)| flat(i as f64 / 20., v))
                .collect()
        }
        SegmentTable {
            red: steps([1.0, 0.4667, 0.5333, 0.0, 0.0, 0.0, 0.0, 0.0,
                        0.0, 0.0, 0.0, 0.0, 0.0, 0.7333, 0.9333, 1.0,
                        1.0, 1.0, 0.8667, 0.80, 0.80]),
            green: steps([1.0, 0.0, 0.0, 0.0, 0.0, 0.4667, 0.6000,
                          0.6667, 0.6667, 0.6000, 0.7333, 0.8667, 1.0,
                          1.0, 0.9333, 0.8000, 0.6000, 0.0, 0.0, 0.0,
                          0.50]),
            blue: steps([1.0, 0.5333, 0.6000, 0.6667, 0.8667, 0.8667,
                         0.8667, 0.6667, 0.5333, 0.0, 0.0, 0.0, 0.0,
                         0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.50]),
        }
    };
}

/// Insert the low-count ramp points `(k + 0.99) / lowres`, k = 0, 1,
/// 2, at index `k + 1` when they come before the point already there.
fn low_count_ramp(ch: &mut Vec<Segment>, lowres: f64, values: [f64; 3]) {
    for (k, (&count, &v)) in [0.99, 1.99, 2.99].iter()
        .zip(values.iter()).enumerate() {
        let x = count / lowres;
        if ch.get(k + 1).is_some_and(|s| x < s.position) {
            ch.insert(k + 1, flat(x, v));
        }
    }
}

/// [`struct@HISTOGRAM_JET`] adapted to a histogram with `bins` bins
/// whose largest count is `hmax`.
///
/// The first few counts get their own ramp (light grey to black, with
/// blue going back to full) so that bins holding 1, 2 or 3 events are
/// distinguishable from empty ones.  If given, `background` replaces
/// the color at 0 (components in \[0, 1\]).
pub fn histogram_jet_table(bins: usize, hmax: usize,
                           background: Option<RGB<f64>>) -> SegmentTable {
    let mut t = HISTOGRAM_JET.clone();
    if let Some(bg) = background {
        t.red[0] = flat(0., bg.r);
        t.green[0] = flat(0., bg.g);
        t.blue[0] = flat(0., bg.b);
    }
    let lowres = bins.max(hmax);
    if lowres > 0 {
        let lowres = lowres as f64;
        low_count_ramp(&mut t.red, lowres, [0.6, 0.3, 0.]);
        low_count_ramp(&mut t.green, lowres, [0.6, 0.3, 0.]);
        low_count_ramp(&mut t.blue, lowres, [0.6, 0.3, 1.]);
    }
    t
}

/// Table for per-well event counts on a plate whose largest bin holds
/// `max_bin` events.  Empty wells are white, the lowest counts grey.
pub fn plate_table(max_bin: usize) -> SegmentTable {
    let mut t = SegmentTable {
        red: vec![flat(0.0, 1.0), flat(0.003, 0.1), flat(0.01, 0.0),
                  flat(0.02, 0.0), flat(0.365, 1.0), flat(1.0, 1.0)],
        green: vec![flat(0.0, 1.0), flat(0.003, 0.1), flat(0.01, 0.0),
                    flat(0.02, 0.0), flat(0.3650789, 0.0),
                    flat(0.746, 1.0), flat(1.0, 1.0)],
        blue: vec![flat(0.0, 1.0), flat(0.003, 0.1), flat(0.01, 0.0),
                   flat(0.02, 0.0), flat(0.746, 0.0), flat(1.0, 1.0)],
    };
    let smallest = 1. / (max_bin as f64 + 1.);
    let below_first_step = |x: f64| x > 0. && x < 0.003;
    if below_first_step(0.9 * smallest) {
        t.insert_all(1, flat(0.9 * smallest, 0.5));
    }
    if below_first_step(2.1 * smallest) {
        t.insert_all(2, flat(2.1 * smallest, 0.2));
    }
    t
}
