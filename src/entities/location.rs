use serde::{Deserialize, Serialize};

/// A WGS84 point in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_within_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(Coordinates { lat: 11.2588, lng: 75.7804 }.is_within_bounds());
        assert!(Coordinates { lat: -90.0, lng: 180.0 }.is_within_bounds());
        assert!(!Coordinates { lat: 90.5, lng: 0.0 }.is_within_bounds());
        assert!(!Coordinates { lat: 0.0, lng: -180.1 }.is_within_bounds());
        assert!(!Coordinates { lat: 999.0, lng: 999.0 }.is_within_bounds());
    }
}
