//! Errors raised while building a [`Colormap`](crate::Colormap).

use thiserror::Error;
use crate::segments::ty::Channel;

/// Reasons a segment table or colormap configuration is rejected.
///
/// Evaluating a colormap or a statistic never fails; only
/// construction does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0} channel has no control points")]
    EmptyChannel(Channel),

    #[error("{channel} control point position {position} is not in [0, 1]")]
    PositionOutOfRange { channel: Channel, position: f64 },

    #[error("{channel} control point at {position} has value {value} \
             outside [0, 1]")]
    ValueOutOfRange { channel: Channel, position: f64, value: f64 },

    #[error("clamp range is inverted: min {min} > max {max}")]
    InvertedClamp { min: f64, max: f64 },

    #[error("clamp bound {0} is not a number")]
    NanClamp(f64),

    #[error("transfer window [{low}, {high}] is empty or not finite")]
    InvalidWindow { low: f64, high: f64 },

    #[error("standard deviation bounds must be finite and positive, got {0}")]
    InvalidBounds(f64),

    #[error("out-of-bounds color component {0} is not in [0, 1]")]
    InvalidFallback(f64),
}
