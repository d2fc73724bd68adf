//! Compass bearing classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight cardinal and intercardinal compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    /// Clockwise from north, 45° apart
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a bearing in degrees (0 = north, clockwise) into a compass point.
///
/// Any finite input is accepted: the bearing is first brought into [0, 360).
/// Each point covers a 45° sector centred on its nominal bearing, so 22.5°
/// already counts as NE.
#[must_use]
pub fn classify_bearing(degrees: f64) -> CompassPoint {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360.0, which the modulo folds back to N
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
    CompassPoint::ALL[sector]
}
