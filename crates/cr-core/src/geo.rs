//! Geographic coordinate type and geodesic distance.
//!
//! `GeoPoint` stores latitude/longitude as `f64`.  City pairs sit close to
//! the 130 km connection threshold, so single precision is not enough to
//! keep edge decisions stable.
//!
//! Two distance models are provided:
//!
//! | Model       | Surface                  | Typical error vs. geodesic |
//! |-------------|--------------------------|----------------------------|
//! | `Vincenty`  | WGS-84 ellipsoid         | < 1 mm                     |
//! | `Haversine` | sphere, R = 6 371.0088 km| up to ~0.5 %               |

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Ellipsoid constants ───────────────────────────────────────────────────────

/// WGS-84 semi-major axis, metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS-84 semi-minor axis, metres.
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Mean Earth radius (IUGG), kilometres.
const MEAN_RADIUS_KM: f64 = 6_371.008_8;

const VINCENTY_MAX_ITER: usize = 200;
const VINCENTY_EPSILON: f64 = 1e-12;

// ── DistanceModel ─────────────────────────────────────────────────────────────

/// Formula used to measure the distance between two points.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceModel {
    /// Vincenty inverse formula on the WGS-84 ellipsoid.
    #[default]
    Vincenty,
    /// Great-circle distance on a sphere of mean Earth radius.
    Haversine,
}

impl DistanceModel {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceModel::Vincenty  => "vincenty",
            DistanceModel::Haversine => "haversine",
        }
    }
}

impl fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vincenty"  => Ok(DistanceModel::Vincenty),
            "haversine" => Ok(DistanceModel::Haversine),
            other => Err(CoreError::Config(format!(
                "unknown distance model {other:?}: expected \"vincenty\" or \"haversine\""
            ))),
        }
    }
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct without validation.  Prefer [`GeoPoint::try_new`] for
    /// values that come from outside the program.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> CoreResult<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Distance in kilometres under the given model.
    pub fn distance_km(self, other: GeoPoint, model: DistanceModel) -> f64 {
        match model {
            DistanceModel::Vincenty  => self.vincenty_km(other),
            DistanceModel::Haversine => self.haversine_km(other),
        }
    }

    /// Ellipsoidal distance in kilometres.
    ///
    /// Falls back to [`haversine_km`](Self::haversine_km) for the
    /// near-antipodal pairs where the Vincenty iteration does not converge.
    pub fn vincenty_km(self, other: GeoPoint) -> f64 {
        match vincenty_inverse_m(self, other) {
            Some(m) => m / 1_000.0,
            None    => self.haversine_km(other),
        }
    }

    /// Great-circle distance in kilometres on a spherical Earth.
    pub fn haversine_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        MEAN_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

// ── Vincenty inverse ──────────────────────────────────────────────────────────

/// Vincenty (1975) inverse solution.  Returns metres, or `None` if the
/// iteration on λ fails to converge.
fn vincenty_inverse_m(p: GeoPoint, q: GeoPoint) -> Option<f64> {
    let l = (q.lon - p.lon).to_radians();
    let u1 = ((1.0 - WGS84_F) * p.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * q.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITER {
        let (sin_l, cos_l) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_l).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_l).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident points.
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_l;
        let sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_l / sin_sigma;
        let cos2_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos²α = 0.
        let cos_2sm = if cos2_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos2_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos2_alpha));
        let prev = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)));

        if (lambda - prev).abs() < VINCENTY_EPSILON {
            let u_sq = cos2_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
            let big_a = 1.0
                + u_sq / 16_384.0 * (4_096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1_024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sm
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)
                            - big_b / 6.0
                                * cos_2sm
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sm * cos_2sm)));
            return Some(WGS84_B * big_a * (sigma - delta_sigma));
        }
    }
    None
}
