use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::geo::haversine_distance_meters;

/// Wire-level check-in outcome codes. The endpoint always answers 200 with
/// one of these so kiosk clients can render the message directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInCode {
    Success,
    TooEarly,
    TooLate,
    WrongLocation,
    LocationRequired,
    InvalidLink,
    ServerError,
}

impl CheckInCode {
    pub fn default_message(self) -> &'static str {
        match self {
            CheckInCode::Success => "Check-in recorded. Welcome!",
            CheckInCode::TooEarly => "Check-in is not open yet. Please come back closer to your interview time.",
            CheckInCode::TooLate => "The check-in window for this interview has closed.",
            CheckInCode::WrongLocation => "You appear to be outside the interview venue.",
            CheckInCode::LocationRequired => "Location access is required to check in.",
            CheckInCode::InvalidLink => "This check-in link is not valid.",
            CheckInCode::ServerError => "Something went wrong. Please ask the front desk for help.",
        }
    }
}

/// Time-window tuning for arrival gating, all relative to the scheduled
/// interview start.
#[derive(Debug, Clone, Copy)]
pub struct CheckinWindow {
    /// Minutes before the start at which check-in opens.
    pub open_before_minutes: i64,
    /// Minutes past the start still counted as on-time ("arrived").
    pub grace_minutes: i64,
    /// Minutes past the grace cutoff still accepted, flagged "late".
    pub late_window_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalVerdict {
    TooEarly,
    OnTime,
    Late,
    TooLate,
}

impl CheckinWindow {
    pub fn classify(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> ArrivalVerdict {
        let opens_at = start - Duration::minutes(self.open_before_minutes);
        let grace_until = start + Duration::minutes(self.grace_minutes);
        let closes_at = grace_until + Duration::minutes(self.late_window_minutes);

        if now < opens_at {
            ArrivalVerdict::TooEarly
        } else if now <= grace_until {
            ArrivalVerdict::OnTime
        } else if now <= closes_at {
            ArrivalVerdict::Late
        } else {
            ArrivalVerdict::TooLate
        }
    }
}

/// Venue geofence: a point plus a tolerance radius.
#[derive(Debug, Clone, Copy)]
pub struct Geofence {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl Geofence {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        haversine_distance_meters(self.latitude, self.longitude, latitude, longitude)
            <= self.radius_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> CheckinWindow {
        CheckinWindow {
            open_before_minutes: 60,
            grace_minutes: 15,
            late_window_minutes: 30,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap()
    }

    #[test]
    fn before_the_window_opens_is_too_early() {
        let now = start() - Duration::minutes(61);
        assert_eq!(window().classify(start(), now), ArrivalVerdict::TooEarly);
    }

    #[test]
    fn the_window_boundaries_are_inclusive() {
        let w = window();
        assert_eq!(
            w.classify(start(), start() - Duration::minutes(60)),
            ArrivalVerdict::OnTime
        );
        assert_eq!(
            w.classify(start(), start() + Duration::minutes(15)),
            ArrivalVerdict::OnTime
        );
        assert_eq!(
            w.classify(start(), start() + Duration::minutes(45)),
            ArrivalVerdict::Late
        );
    }

    #[test]
    fn within_the_grace_sub_window_past_start_is_late_not_rejected() {
        let now = start() + Duration::minutes(20);
        assert_eq!(window().classify(start(), now), ArrivalVerdict::Late);
    }

    #[test]
    fn past_grace_plus_late_window_is_too_late() {
        let now = start() + Duration::minutes(46);
        assert_eq!(window().classify(start(), now), ArrivalVerdict::TooLate);
    }

    #[test]
    fn geofence_accepts_inside_and_rejects_outside() {
        let fence = Geofence {
            latitude: 51.5007,
            longitude: -0.1246,
            radius_meters: 150.0,
        };
        assert!(fence.contains(51.5007, -0.1246));
        // ~111m north: inside a 150m fence.
        assert!(fence.contains(51.5017, -0.1246));
        // ~1.1km north: outside.
        assert!(!fence.contains(51.5107, -0.1246));
    }
}
