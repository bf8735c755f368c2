//! Geographic coordinates and the canonical keys derived from them.
//!
//! Every coordinate passes through this module before it reaches a routing
//! service. Validation is an admission gate (finite values only), while
//! normalisation clamps values into the WGS84 range and reports whether it had
//! to change anything.

use std::fmt;

use geo::Coord;

/// Largest accepted absolute latitude, in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Largest accepted absolute longitude, in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Number of decimal places kept by [`RouteKey::canonical`] (about 1.1 m).
pub const KEY_PRECISION: usize = 5;

/// A WGS84 latitude/longitude pair in degrees.
///
/// # Examples
/// ```
/// use yatra_core::Coordinate;
///
/// let ujjain = Coordinate::new(23.1828, 75.7689);
/// assert!(ujjain.is_valid());
/// assert_eq!(ujjain.normalize(), ujjain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

/// Outcome of [`Coordinate::normalized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// The coordinate after clamping and non-finite replacement.
    pub coordinate: Coordinate,
    /// `true` when normalisation changed at least one field.
    pub adjusted: bool,
}

impl Coordinate {
    /// Construct a coordinate without validating it.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Return `true` when both fields are finite numbers.
    ///
    /// This is the admission gate used before any resolution attempt; range
    /// is not checked because out-of-range values are clamped instead.
    ///
    /// # Examples
    /// ```
    /// use yatra_core::Coordinate;
    ///
    /// assert!(Coordinate::new(95.0, 10.0).is_valid());
    /// assert!(!Coordinate::new(f64::NAN, 10.0).is_valid());
    /// assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Clamp into range and report whether anything changed.
    ///
    /// Latitude is clamped to `[-90, 90]` and longitude to `[-180, 180]`. A
    /// non-finite field becomes `0.0` so it can never reach a provider.
    ///
    /// # Examples
    /// ```
    /// use yatra_core::Coordinate;
    ///
    /// let result = Coordinate::new(91.5, -200.0).normalized();
    /// assert!(result.adjusted);
    /// assert_eq!(result.coordinate, Coordinate::new(90.0, -180.0));
    ///
    /// let untouched = Coordinate::new(23.1769, 75.7889).normalized();
    /// assert!(!untouched.adjusted);
    /// ```
    #[must_use]
    pub fn normalized(self) -> Normalized {
        let coordinate = Self {
            lat: clamp_axis(self.lat, MAX_LATITUDE),
            lng: clamp_axis(self.lng, MAX_LONGITUDE),
        };
        // NaN never compares equal, so a replaced NaN reports as adjusted.
        let adjusted = coordinate != self;
        Normalized {
            coordinate,
            adjusted,
        }
    }

    /// Clamp into range, discarding the adjustment flag.
    #[must_use]
    pub fn normalize(self) -> Self {
        self.normalized().coordinate
    }
}

fn clamp_axis(value: f64, limit: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-limit, limit)
    } else {
        0.0
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Cache and in-flight key for an origin/destination pair.
///
/// Both endpoints are rounded to [`KEY_PRECISION`] decimal places so that
/// floating-point jitter below a metre maps onto the same key.
///
/// # Examples
/// ```
/// use yatra_core::{Coordinate, RouteKey};
///
/// let key = RouteKey::canonical(
///     Coordinate::new(23.1828, 75.7689),
///     Coordinate::new(23.1769, 75.7889),
/// );
/// assert_eq!(key.as_str(), "23.18280,75.76890;23.17690,75.78890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(String);

impl RouteKey {
    /// Build the key for `origin` → `destination`.
    ///
    /// The order matters: the reverse trip has a different key.
    #[must_use]
    pub fn canonical(origin: Coordinate, destination: Coordinate) -> Self {
        Self(format!(
            "{},{};{},{}",
            fixed(origin.lat),
            fixed(origin.lng),
            fixed(destination.lat),
            fixed(destination.lng),
        ))
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn fixed(value: f64) -> String {
    let text = format!("{value:.prec$}", prec = KEY_PRECISION);
    match text.strip_prefix('-') {
        // Values rounding to zero from below would otherwise split the key.
        Some(digits) if digits.bytes().all(|b| b == b'0' || b == b'.') => digits.to_owned(),
        _ => text,
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
