use serde::{Deserialize, Serialize};

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// GRS80 ellipsoid.
    pub const GRS80: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257222101,
    };

    /// Creates a new datum. Zero or infinite `inv_flattening` describes a sphere.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semi-major axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Flattening of the ellipsoid.
    pub fn flattening(&self) -> f64 {
        if self.inv_flattening == 0.0 || !self.inv_flattening.is_finite() {
            0.0
        } else {
            1.0 / self.inv_flattening
        }
    }

    /// Semi-minor axis in meters.
    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - self.flattening())
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
