use std::collections::BTreeMap;

/// Cumulative time, in seconds, the desk spent with each number of customers waiting.
///
/// Every interval between two consecutive events is recorded against the number of customers that were waiting
/// during it, so the durations always sum to the elapsed simulated time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueLengthHistogram {
    durations: BTreeMap<usize, f64>,
}

impl QueueLengthHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `duration` seconds to the bucket for `queue_length` waiting customers.
    pub fn record(&mut self, queue_length: usize, duration: f64) {
        *self.durations.entry(queue_length).or_insert(0.0) += duration;
    }

    /// Time recorded against `queue_length`, or zero if that length never occurred.
    pub fn duration_at(&self, queue_length: usize) -> f64 {
        self.durations.get(&queue_length).copied().unwrap_or(0.0)
    }

    /// Sum of every recorded duration.
    pub fn total_time(&self) -> f64 {
        self.durations.values().sum()
    }

    /// Integral of queue length over time, i.e. `Σ(length × duration)`.
    pub fn weighted_sum(&self) -> f64 {
        self.durations
            .iter()
            .map(|(&length, &duration)| length as f64 * duration)
            .sum()
    }

    /// Time-weighted mean queue length over `elapsed` seconds. Zero if no time elapsed.
    pub fn time_weighted_mean(&self, elapsed: f64) -> f64 {
        if elapsed > 0.0 {
            self.weighted_sum() / elapsed
        } else {
            0.0
        }
    }

    /// Iterate over `(queue_length, duration)` buckets in ascending order of length.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.durations.iter().map(|(&length, &duration)| (length, duration))
    }
}

/// Raw accumulators left behind by one simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub histogram: QueueLengthHistogram,
    pub articles: u64,
    pub waiting_times: Vec<f64>,
    /// Final clock time, in seconds: the length of the day.
    pub elapsed: f64,
}

impl DayOutcome {
    pub fn customers_served(&self) -> usize {
        self.waiting_times.len()
    }

    /// Mean waiting time over every customer served. A day without customers has a mean waiting time of zero.
    pub fn mean_waiting_time(&self) -> f64 {
        if self.waiting_times.is_empty() {
            0.0
        } else {
            self.waiting_times.iter().sum::<f64>() / self.waiting_times.len() as f64
        }
    }

    /// Reduce the accumulators to the day's summary statistics.
    pub fn stats(&self) -> DayStats {
        DayStats {
            mean_waiting_time: self.mean_waiting_time(),
            mean_queue_length: self.histogram.time_weighted_mean(self.elapsed),
            articles: self.articles,
            customers_served: self.customers_served(),
        }
    }
}

/// Summary statistics for a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    /// Mean seconds a customer waited before service began, or zero if nobody was served.
    pub mean_waiting_time: f64,
    /// Time-weighted mean number of customers waiting.
    pub mean_queue_length: f64,
    /// Articles produced while the server was idle.
    pub articles: u64,
    /// Customers who began service. When zero, `mean_waiting_time` is zero by convention rather than undefined.
    pub customers_served: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_accumulates_per_length() {
        let mut histogram = QueueLengthHistogram::new();
        histogram.record(0, 30.0);
        histogram.record(2, 10.0);
        histogram.record(0, 20.0);

        assert_eq!(50.0, histogram.duration_at(0));
        assert_eq!(0.0, histogram.duration_at(1));
        assert_eq!(60.0, histogram.total_time());
        assert_eq!(20.0, histogram.weighted_sum());
        assert_eq!(vec![(0, 50.0), (2, 10.0)], histogram.iter().collect::<Vec<_>>());
    }

    #[test]
    fn mean_queue_length_is_time_weighted() {
        let mut histogram = QueueLengthHistogram::new();
        histogram.record(0, 180.0);
        histogram.record(1, 60.0);
        assert_eq!(0.25, histogram.time_weighted_mean(240.0));
    }

    #[test]
    fn no_elapsed_time_means_empty_queue() {
        assert_eq!(0.0, QueueLengthHistogram::new().time_weighted_mean(0.0));
    }

    #[test]
    fn day_without_customers_waits_zero() {
        let outcome = DayOutcome {
            histogram: QueueLengthHistogram::new(),
            articles: 22,
            waiting_times: Vec::new(),
            elapsed: 3600.0,
        };
        let stats = outcome.stats();
        assert_eq!(0, stats.customers_served);
        assert_eq!(0.0, stats.mean_waiting_time);
        assert_eq!(22, stats.articles);
    }

    #[test]
    fn waiting_time_is_arithmetic_mean() {
        let outcome = DayOutcome {
            histogram: QueueLengthHistogram::new(),
            articles: 0,
            waiting_times: vec![0.0, 60.0, 30.0],
            elapsed: 300.0,
        };
        assert_eq!(30.0, outcome.mean_waiting_time());
        assert_eq!(3, outcome.customers_served());
    }
}
