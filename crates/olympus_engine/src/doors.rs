//! Variable-geometry intake door schedule.
//!
//! The three intake doors are positioned by airspeed band. The schedule is a
//! step function with inclusive upper edges:
//!
//! | Airspeed (km/h)      | Door 1     | Door 2     | Door 3  |
//! |----------------------|------------|------------|---------|
//! | `0 ..= 455`          | Takeoff    | Takeoff    | Takeoff |
//! | `455 < v <= 1234`    | Subsonic   | Subsonic   | Takeoff |
//! | `1234 < v <= 2436`   | Supersonic | Supersonic | Takeoff |
//!
//! Anything else (negative, above 2436, or NaN) has no band.

use serde::Serialize;

/// Upper edge of the takeoff band, in km/h.
pub const TAKEOFF_SPEED: f64 = 455.0;
/// Upper edge of the subsonic band, in km/h.
pub const SUBSONIC_SPEED: f64 = 1234.0;
/// Upper edge of the supersonic band, in km/h.
pub const SUPERSONIC_SPEED: f64 = 2436.0;

/// Position of a single intake door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorSetting {
    /// Takeoff or landing position.
    Takeoff,
    /// Subsonic cruise position.
    Subsonic,
    /// Supersonic cruise position.
    Supersonic,
}

impl DoorSetting {
    /// Returns the numeric position (1, 2 or 3).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            DoorSetting::Takeoff => 1,
            DoorSetting::Subsonic => 2,
            DoorSetting::Supersonic => 3,
        }
    }
}

/// The positions of all three intake doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorPositions {
    pub door1: DoorSetting,
    pub door2: DoorSetting,
    pub door3: DoorSetting,
}

impl DoorPositions {
    /// Look up the scheduled door positions for an airspeed.
    ///
    /// Returns `None` when the airspeed lies outside every band.
    #[must_use]
    pub fn for_airspeed(airspeed: f64) -> Option<Self> {
        use DoorSetting::*;

        let (door1, door2) = if (0.0..=TAKEOFF_SPEED).contains(&airspeed) {
            (Takeoff, Takeoff)
        } else if airspeed > TAKEOFF_SPEED && airspeed <= SUBSONIC_SPEED {
            (Subsonic, Subsonic)
        } else if airspeed > SUBSONIC_SPEED && airspeed <= SUPERSONIC_SPEED {
            (Supersonic, Supersonic)
        } else {
            return None;
        };

        Some(Self {
            door1,
            door2,
            door3: Takeoff,
        })
    }

    /// Returns the numeric positions as a `(door1, door2, door3)` tuple.
    #[must_use]
    pub const fn indices(&self) -> (u8, u8, u8) {
        (self.door1.index(), self.door2.index(), self.door3.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let idx = |v: f64| DoorPositions::for_airspeed(v).map(|d| d.indices());
        assert_eq!(idx(0.0), Some((1, 1, 1)));
        assert_eq!(idx(455.0), Some((1, 1, 1)));
        assert_eq!(idx(455.5), Some((2, 2, 1)));
        assert_eq!(idx(1234.0), Some((2, 2, 1)));
        assert_eq!(idx(1234.1), Some((3, 3, 1)));
        assert_eq!(idx(2436.0), Some((3, 3, 1)));
    }

    #[test]
    fn test_outside_bands() {
        assert!(DoorPositions::for_airspeed(2437.0).is_none());
        assert!(DoorPositions::for_airspeed(-1.0).is_none());
        assert!(DoorPositions::for_airspeed(f64::NAN).is_none());
    }

    #[test]
    fn test_door_setting_serializes_snake_case() {
        let json = serde_json::to_string(&DoorSetting::Supersonic).unwrap();
        assert_eq!(json, "\"supersonic\"");
    }
}
