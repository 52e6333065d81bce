use crate::{Error, Result};
use ordered_float::OrderedFloat;

/// The type used for the simulation clock, measured in seconds since the desk opened.
///
/// Service times are fractional, so the clock is an [`f64`]. [`f64`] does not implement [`Ord`], which the
/// [`EventQueue`] needs for its binary heap, and so the clock wraps it in [`OrderedFloat`]. The queue refuses to
/// schedule NaN or infinite times, which keeps the total order of [`OrderedFloat`] meaningful.
///
/// [`EventQueue`]: crate::day::EventQueue
pub type SimTime = OrderedFloat<f64>;

pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;
pub(crate) const SECONDS_PER_MINUTE: f64 = 60.0;

/// Smallest accepted mean arrival gap, in seconds. Arrival gaps are Poisson draws, and below this mean a zero draw
/// becomes likely enough that raising it to the one-second minimum gap would skew the arrival rate.
pub(crate) const MIN_ARRIVAL_MEAN_SECONDS: f64 = 10.0;

/// The three scalars that describe a library desk.
///
/// Values are given in the units a librarian would use (hours for the opening horizon, minutes for the mean delays)
/// and converted to seconds internally. Nothing else about the desk is configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskParameters {
    /// How long the desk accepts arrivals, in hours.
    pub horizon_hours: f64,
    /// Mean delay between two consecutive arrivals, in minutes.
    pub arrival_mean_minutes: f64,
    /// Mean time the server spends on one customer, in minutes.
    pub service_mean_minutes: f64,
}

impl DeskParameters {
    pub fn new(horizon_hours: f64, arrival_mean_minutes: f64, service_mean_minutes: f64) -> Self {
        Self {
            horizon_hours,
            arrival_mean_minutes,
            service_mean_minutes,
        }
    }

    /// Check that every parameter describes a usable desk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the horizon is negative or not finite, or if either mean delay is not a
    /// strictly positive finite number. A zero or negative mean delay would otherwise produce zero-length gaps
    /// between events. The mean arrival gap must also be at least ten seconds.
    pub fn validate(&self) -> Result {
        if !self.horizon_hours.is_finite() || self.horizon_hours < 0.0 {
            return Err(Error::InvalidParameter {
                name: "horizon_hours",
                value: self.horizon_hours,
                reason: "must be a finite, non-negative number of hours",
            });
        }
        check_mean_delay("arrival_mean_minutes", self.arrival_mean_minutes)?;
        if self.arrival_mean_seconds() < MIN_ARRIVAL_MEAN_SECONDS {
            return Err(Error::InvalidParameter {
                name: "arrival_mean_minutes",
                value: self.arrival_mean_minutes,
                reason: "mean arrival gap must be at least ten seconds",
            });
        }
        check_mean_delay("service_mean_minutes", self.service_mean_minutes)
    }

    pub fn horizon_seconds(&self) -> f64 {
        self.horizon_hours * SECONDS_PER_HOUR
    }

    pub fn arrival_mean_seconds(&self) -> f64 {
        self.arrival_mean_minutes * SECONDS_PER_MINUTE
    }

    pub fn service_mean_seconds(&self) -> f64 {
        self.service_mean_minutes * SECONDS_PER_MINUTE
    }
}

fn check_mean_delay(name: &'static str, minutes: f64) -> Result {
    if minutes.is_finite() && minutes > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value: minutes,
            reason: "must be a finite, strictly positive number of minutes",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_seconds() {
        let params = DeskParameters::new(8.0, 5.0, 3.5);
        assert_eq!(28_800.0, params.horizon_seconds());
        assert_eq!(300.0, params.arrival_mean_seconds());
        assert_eq!(210.0, params.service_mean_seconds());
    }

    #[test]
    fn accepts_zero_horizon() {
        assert_eq!(Ok(()), DeskParameters::new(0.0, 5.0, 3.0).validate());
    }

    #[test]
    fn rejects_non_positive_delays() {
        let err = DeskParameters::new(8.0, 0.0, 3.0).validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameter { name: "arrival_mean_minutes", .. }),
            "zero arrival delay should be rejected, got {err:?}"
        );

        let err = DeskParameters::new(8.0, 5.0, -2.0).validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameter { name: "service_mean_minutes", .. }),
            "negative service delay should be rejected, got {err:?}"
        );
    }

    #[test]
    fn rejects_sub_ten_second_arrival_gaps() {
        // 0.005 minutes is a 0.3 s mean gap
        for minutes in [0.005, 0.1] {
            let err = DeskParameters::new(1.0, minutes, 3.0).validate().unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { name: "arrival_mean_minutes", .. }),
                "mean gap of {minutes} minutes should be rejected, got {err:?}"
            );
        }
        assert_eq!(Ok(()), DeskParameters::new(1.0, 0.25, 3.0).validate());
    }

    #[test]
    fn rejects_unusable_horizon() {
        for horizon in [-1.0, f64::NAN, f64::INFINITY] {
            let err = DeskParameters::new(horizon, 5.0, 3.0).validate().unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { name: "horizon_hours", .. }),
                "horizon {horizon} should be rejected"
            );
        }
    }
}
