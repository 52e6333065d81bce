use super::{Event, EventQueue};
use crate::{Error, SimTime};

use rand::Rng;
use rand_distr::Distribution;
use tracing::trace;

/// Smallest gap, in seconds, allowed between two consecutive arrivals.
const MIN_ARRIVAL_GAP: f64 = 1.0;

/// Build the day's event queue, pre-loaded with every customer arrival before `horizon` seconds.
///
/// The first customer arrives one gap after the desk opens at time zero, and each following customer one gap after the
/// previous one, where each gap is an independent draw from `gaps`. Generation stops at the first arrival that would
/// land at or after the horizon, so a horizon shorter than the first gap produces an empty queue.
///
/// Draws below one second (including zero, NaN, or negative values from a misbehaving distribution) are raised to one
/// second, so arrival times strictly increase and generation always terminates.
///
/// # Errors
///
/// Returns [`Error::NonFiniteTime`] if `horizon` is NaN or infinite, since generation would never stop.
///
/// [`Error::NonFiniteTime`]: crate::Error::NonFiniteTime
pub fn generate_arrivals<D, R>(horizon: f64, gaps: &D, rng: &mut R) -> crate::Result<EventQueue>
where
    D: Distribution<f64> + ?Sized,
    R: Rng + ?Sized,
{
    if !horizon.is_finite() {
        return Err(Error::NonFiniteTime(horizon));
    }

    let mut arrivals = EventQueue::new(SimTime::from(0.0));
    let mut next_gap = || gaps.sample(&mut *rng).max(MIN_ARRIVAL_GAP);

    let mut arrival_time = next_gap();
    while arrival_time < horizon {
        arrivals.schedule(Event::arrive(arrival_time))?;
        arrival_time += next_gap();
    }

    trace!(arrivals = arrivals.len(), horizon, "generated arrivals");
    Ok(arrivals)
}
