use crate::day::{generate_arrivals, DaySimulation, DayStats};
use crate::{DeskParameters, Error, Result};

use rand::Rng;
use rand_distr::{Exp, Poisson};
use tracing::debug;

/// Number of days averaged when the caller has no preference.
pub const DEFAULT_DAYS: usize = 100;

/// Statistics averaged across independent days.
///
/// Field names match [`DayStats`] so a single day and a multi-day summary read the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// Mean over days of each day's mean waiting time, in seconds.
    pub mean_waiting_time: f64,
    /// Mean over days of each day's time-weighted mean queue length.
    pub mean_queue_length: f64,
    /// Mean number of articles produced per day.
    pub mean_articles: f64,
    /// Number of days averaged.
    pub days: usize,
}

impl Summary {
    /// Average a sequence of days. An empty sequence yields an all-zero summary.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = DayStats>,
    {
        let mut total = Self::default();
        for day in days {
            total.mean_waiting_time += day.mean_waiting_time;
            total.mean_queue_length += day.mean_queue_length;
            total.mean_articles += day.articles as f64;
            total.days += 1;
        }

        if total.days > 0 {
            let count = total.days as f64;
            total.mean_waiting_time /= count;
            total.mean_queue_length /= count;
            total.mean_articles /= count;
        }
        total
    }
}

impl From<DayStats> for Summary {
    fn from(day: DayStats) -> Self {
        Self::from_days([day])
    }
}

/// A library desk ready to be simulated.
///
/// Holds the validated parameters and the two distributions derived from them: Poisson gaps between arrivals and
/// exponential service times. Each call to [`simulate_day()`] is independent; all randomness comes from the generator
/// passed in, so a seeded generator makes every result reproducible.
///
/// [`simulate_day()`]: LibrarySimulation::simulate_day
#[derive(Debug, Clone)]
pub struct LibrarySimulation {
    parameters: DeskParameters,
    arrival_gaps: Poisson<f64>,
    service_times: Exp<f64>,
}

impl LibrarySimulation {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `parameters` fail [`DeskParameters::validate()`].
    pub fn new(parameters: DeskParameters) -> Result<Self> {
        parameters.validate()?;

        let arrival_mean = parameters.arrival_mean_seconds();
        let arrival_gaps = Poisson::new(arrival_mean).map_err(|_| Error::InvalidParameter {
            name: "arrival_mean_minutes",
            value: parameters.arrival_mean_minutes,
            reason: "not usable as a Poisson mean",
        })?;

        let service_mean = parameters.service_mean_seconds();
        let service_times = Exp::new(1.0 / service_mean).map_err(|_| Error::InvalidParameter {
            name: "service_mean_minutes",
            value: parameters.service_mean_minutes,
            reason: "not usable as an exponential mean",
        })?;

        Ok(Self {
            parameters,
            arrival_gaps,
            service_times,
        })
    }

    pub fn parameters(&self) -> &DeskParameters {
        &self.parameters
    }

    /// Set up one day: arrivals generated and loaded, desk open, nothing executed yet.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`generate_arrivals()`], which cannot occur for validated parameters.
    pub fn start_day<'r, R>(&self, rng: &'r mut R) -> Result<DaySimulation<&'r mut R, Exp<f64>>>
    where
        R: Rng + ?Sized,
    {
        let horizon = self.parameters.horizon_seconds();
        let arrivals = generate_arrivals(horizon, &self.arrival_gaps, &mut *rng)?;
        Ok(DaySimulation::new(arrivals, horizon, self.service_times, rng))
    }

    /// Simulate a single day and reduce it to its summary statistics.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while executing the day's events.
    pub fn simulate_day<R>(&self, rng: &mut R) -> Result<DayStats>
    where
        R: Rng + ?Sized,
    {
        let mut day = self.start_day(rng)?;
        day.run()?;
        Ok(day.into_outcome().stats())
    }

    /// Simulate `days` independent days, one after another on the same generator, and average them.
    ///
    /// # Errors
    ///
    /// Stops at the first day that fails and returns its error.
    pub fn simulate<R>(&self, days: usize, rng: &mut R) -> Result<Summary>
    where
        R: Rng + ?Sized,
    {
        let stats = (0..days)
            .map(|_| self.simulate_day(&mut *rng))
            .collect::<Result<Vec<_>>>()?;
        let summary = Summary::from_days(stats);
        debug!(?summary, "simulated days");
        Ok(summary)
    }

    /// Simulate `days` independent days across the rayon thread pool and average them.
    ///
    /// Each day gets its own [`Pcg64`] generator, seeded in order from a master generator built from `seed`, so the
    /// result depends only on `seed` and `days`, never on how days were scheduled onto threads.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing day, if any.
    ///
    /// [`Pcg64`]: rand_pcg::Pcg64
    #[cfg(feature = "parallel")]
    pub fn simulate_parallel(&self, days: usize, seed: u64) -> Result<Summary> {
        use rand::SeedableRng;
        use rand_pcg::Pcg64;
        use rayon::prelude::*;

        let mut master = Pcg64::seed_from_u64(seed);
        let day_seeds: Vec<u64> = (0..days).map(|_| master.random()).collect();

        let stats = day_seeds
            .into_par_iter()
            .map(|day_seed| self.simulate_day(&mut Pcg64::seed_from_u64(day_seed)))
            .collect::<Result<Vec<_>>>()?;
        let summary = Summary::from_days(stats);
        debug!(?summary, seed, "simulated days in parallel");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(mean_waiting_time: f64, mean_queue_length: f64, articles: u64) -> DayStats {
        DayStats {
            mean_waiting_time,
            mean_queue_length,
            articles,
            customers_served: 1,
        }
    }

    #[test]
    fn summary_averages_each_statistic() {
        let summary = Summary::from_days([day(10.0, 1.0, 4), day(30.0, 0.5, 7)]);
        assert_eq!(
            Summary {
                mean_waiting_time: 20.0,
                mean_queue_length: 0.75,
                mean_articles: 5.5,
                days: 2,
            },
            summary
        );
    }

    #[test]
    fn summary_of_no_days_is_zero() {
        assert_eq!(Summary::default(), Summary::from_days(Vec::new()));
    }

    #[test]
    fn invalid_parameters_are_rejected_up_front() {
        let result = LibrarySimulation::new(DeskParameters::new(8.0, 5.0, 0.0));
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "service_mean_minutes",
                ..
            })
        ));
    }
}
