use std::fmt;
use crate::Error;

/// Color channel a [`SegmentSet`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        })
    }
}

/// A control point of a channel.
///
/// `low` is the value reached when arriving at `position` from the
/// left and `high` the value used when leaving it to the right, so a
/// point with `low != high` is a jump.  This is the `(x, y0, y1)`
/// triple of a matplotlib segment table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Position in \[0, 1\].
    pub position: f64,
    /// Value when entering the point, in \[0, 1\].
    pub low: f64,
    /// Value when leaving the point, in \[0, 1\].
    pub high: f64,
}

impl Segment {
    #[inline]
    pub const fn new(position: f64, low: f64, high: f64) -> Self {
        Segment { position, low, high }
    }

    /// A continuous point: same value on both sides.
    #[inline]
    pub const fn flat(position: f64, value: f64) -> Self {
        Segment { position, low: value, high: value }
    }
}

impl From<(f64, f64, f64)> for Segment {
    fn from((position, low, high): (f64, f64, f64)) -> Self {
        Segment { position, low, high }
    }
}

/// Raw control points of the three channels, not yet validated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentTable {
    pub red: Vec<Segment>,
    pub green: Vec<Segment>,
    pub blue: Vec<Segment>,
}

impl SegmentTable {
    pub fn new(red: Vec<Segment>, green: Vec<Segment>,
               blue: Vec<Segment>) -> Self {
        SegmentTable { red, green, blue }
    }

    /// Insert `seg` into every channel at index `i` (or at the end if
    /// a channel is shorter).
    pub(crate) fn insert_all(&mut self, i: usize, seg: Segment) {
        for ch in [&mut self.red, &mut self.green, &mut self.blue] {
            let i = i.min(ch.len());
            ch.insert(i, seg);
        }
    }
}

/// Validated control points of one channel, sorted by position.
///
/// Invariant: non-empty, every position and value in \[0, 1\].
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentSet {
    channel: Channel,
    segments: Vec<Segment>, // sorted by `position`
}

fn in_unit(x: f64) -> bool { (0. ..= 1.).contains(&x) }

impl SegmentSet {
    /// Validate `segments` and sort them by position.  The sort is
    /// stable: points sharing a position keep their relative order.
    pub fn new(channel: Channel, segments: Vec<Segment>)
               -> Result<Self, Error> {
        if segments.is_empty() {
            return Err(Error::EmptyChannel(channel))
        }
        for s in &segments {
            if !in_unit(s.position) {
                return Err(Error::PositionOutOfRange {
                    channel, position: s.position })
            }
            for value in [s.low, s.high] {
                if !in_unit(value) {
                    return Err(Error::ValueOutOfRange {
                        channel, position: s.position, value })
                }
            }
        }
        Ok(Self::trusted(channel, segments))
    }

    /// Sort without validating; for the built-in tables.
    pub(crate) fn trusted(channel: Channel, mut segments: Vec<Segment>)
                          -> Self {
        segments.sort_by(|a, b| a.position.total_cmp(&b.position));
        SegmentSet { channel, segments }
    }

    pub fn channel(&self) -> Channel { self.channel }

    pub fn segments(&self) -> &[Segment] { &self.segments }

    /// Number of control points (at least 1).
    pub fn len(&self) -> usize { self.segments.len() }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    pub fn first(&self) -> &Segment { &self.segments[0] }

    pub fn last(&self) -> &Segment { &self.segments[self.segments.len() - 1] }

    /// Value of the channel at `norm`, or `None` if `norm` lies before
    /// the first point, at or after the last one (without being equal
    /// to a point), or is NaN.
    ///
    /// A `norm` equal to a point's position returns that point's `low`
    /// value; with duplicate positions the first one wins.  Between
    /// two points the value goes linearly from the `high` of the left
    /// point to the `low` of the right one.
    pub fn component(&self, norm: f64) -> Option<f64> {
        for (i, s) in self.segments.iter().enumerate() {
            if norm == s.position {
                return Some(s.low)
            } else if norm < s.position {
                if i == 0 { return None }
                let prev = &self.segments[i - 1];
                let t = (norm - prev.position) / (s.position - prev.position);
                return Some(t * s.low + (1. - t) * prev.high)
            }
        }
        None
    }
}
