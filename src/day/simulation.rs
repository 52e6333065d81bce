use super::{DayOutcome, Event, EventKind, EventQueue, QueueLengthHistogram};
use crate::parameters::SECONDS_PER_HOUR;
use crate::SimTime;

use rand::Rng;
use rand_distr::Distribution;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

/// Rate at which an idle server produces articles.
pub const ARTICLES_PER_HOUR: u64 = 22;

/// State of the desk during one day: the server, the line in front of it, and the running statistics.
///
/// All clock arithmetic goes through [`advance_to()`], which charges the interval since the previous event to the
/// article counter (if the server was idle) and to the queue-length histogram (at the length the line had during that
/// interval).
///
/// [`advance_to()`]: Desk::advance_to
#[derive(Debug, Clone, Default)]
pub struct Desk {
    clock: SimTime,
    /// Arrival times of customers in line, longest-waiting first.
    waiting: VecDeque<SimTime>,
    server_busy: bool,
    articles: u64,
    histogram: QueueLengthHistogram,
    waiting_times: Vec<f64>,
}

impl Desk {
    /// An open desk at time zero: server idle, nobody in line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the desk's clock forward to `now`, accounting for the time in between.
    ///
    /// Times earlier than the desk's clock are treated as no time passing.
    pub fn advance_to(&mut self, now: SimTime) {
        let elapsed = (now - self.clock).into_inner().max(0.0);
        if !self.server_busy {
            self.articles += articles_for(elapsed);
        }
        self.histogram.record(self.waiting.len(), elapsed);
        self.clock = self.clock.max(now);
    }

    /// A customer arriving now joins the back of the line.
    pub fn enqueue(&mut self) {
        self.waiting.push_back(self.clock);
    }

    /// The server completes its current customer.
    pub fn release(&mut self) {
        self.server_busy = false;
    }

    /// If the server is free and someone is waiting, start serving the head of the line.
    ///
    /// Returns the admitted customer's waiting time, or `None` if the server stays as it was.
    pub fn admit_next(&mut self) -> Option<f64> {
        if self.server_busy {
            return None;
        }
        let arrival = self.waiting.pop_front()?;
        let waited = (self.clock - arrival).into_inner();
        self.waiting_times.push(waited);
        self.server_busy = true;
        Some(waited)
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn queue_length(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_server_busy(&self) -> bool {
        self.server_busy
    }

    pub fn articles(&self) -> u64 {
        self.articles
    }

    pub fn histogram(&self) -> &QueueLengthHistogram {
        &self.histogram
    }

    pub fn waiting_times(&self) -> &[f64] {
        &self.waiting_times
    }

    fn into_outcome(self) -> DayOutcome {
        DayOutcome {
            histogram: self.histogram,
            articles: self.articles,
            waiting_times: self.waiting_times,
            elapsed: self.clock.into_inner(),
        }
    }
}

/// Whole articles produced over `idle_seconds`, truncated.
fn articles_for(idle_seconds: f64) -> u64 {
    (idle_seconds * ARTICLES_PER_HOUR as f64 / SECONDS_PER_HOUR).floor() as u64
}

/// Contains the event queue, the desk, and the random sources belonging to one simulated day.
///
/// The expected workflow for a DaySimulation is:
///
/// 1. Build an [`EventQueue`] pre-loaded with the day's arrivals, usually through [`generate_arrivals()`].
/// 2. Pass it to [`new()`] along with the closing time, a service-time distribution and a random-number generator.
/// 3. Call [`run()`], or drive the day one event at a time with [`step()`]. Handle any error either might return.
/// 4. Call [`into_outcome()`] to close the desk and collect the day's accumulators.
///
/// [`generate_arrivals()`]: crate::day::generate_arrivals
/// [`new()`]: DaySimulation::new
/// [`run()`]: DaySimulation::run
/// [`step()`]: DaySimulation::step
/// [`into_outcome()`]: DaySimulation::into_outcome
#[derive(Debug)]
pub struct DaySimulation<R, S> {
    /// A priority queue of events that have been scheduled to execute, ordered ascending by execution time.
    event_queue: EventQueue,
    desk: Desk,
    closing_time: SimTime,
    service: S,
    rng: R,
}

impl<R, S> DaySimulation<R, S>
where
    R: Rng,
    S: Distribution<f64>,
{
    pub fn new(event_queue: EventQueue, closing_time: f64, service: S, rng: R) -> Self {
        Self {
            event_queue,
            desk: Desk::new(),
            closing_time: SimTime::from(closing_time),
            service,
            rng,
        }
    }

    /// Execute the earliest pending event and return it, or `None` once the event queue is empty.
    ///
    /// The desk first catches up to the event's time, then applies the event: an arrival joins the line, a completion
    /// frees the server. Finally, if the server is free and someone is waiting, the head of the line is admitted and
    /// a completion is scheduled one service time later.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BackInTime`] or [`Error::NonFiniteTime`] if the service distribution draws a negative, NaN
    /// or infinite service time.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    /// [`Error::NonFiniteTime`]: crate::Error::NonFiniteTime
    pub fn step(&mut self) -> crate::Result<Option<Event>> {
        let Some(event) = self.event_queue.next() else {
            return Ok(None);
        };

        self.desk.advance_to(event.time);
        match event.kind {
            EventKind::Arrive => self.desk.enqueue(),
            EventKind::Finish => self.desk.release(),
        }

        if let Some(waited) = self.desk.admit_next() {
            let service_time = self.service.sample(&mut self.rng);
            self.event_queue.schedule_with_delay(EventKind::Finish, service_time)?;
            trace!(time = %event.time, waited, service_time, "admitted customer");
        }

        trace!(
            time = %event.time,
            kind = ?event.kind,
            queue_length = self.desk.queue_length(),
            server_busy = self.desk.is_server_busy(),
            "processed event"
        );
        Ok(Some(event))
    }

    /// Execute events one at a time, in ascending order by execution time, until the event queue is empty.
    ///
    /// # Errors
    ///
    /// Any error from [`step()`] is passed back to the caller unchanged, leaving the remaining events in the queue.
    ///
    /// [`step()`]: DaySimulation::step
    pub fn run(&mut self) -> crate::Result {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Close the desk and hand back the day's accumulators.
    ///
    /// If the last event happened before closing time, the desk is first advanced to closing time so the idle tail of
    /// the day still produces articles and counts towards the histogram. Events still pending are discarded.
    pub fn into_outcome(mut self) -> DayOutcome {
        if self.desk.clock() < self.closing_time {
            self.desk.advance_to(self.closing_time);
        }
        let outcome = self.desk.into_outcome();
        debug!(
            elapsed = outcome.elapsed,
            customers = outcome.customers_served(),
            articles = outcome.articles,
            "closed desk"
        );
        outcome
    }

    /// Get a shared reference to the desk.
    pub fn desk(&self) -> &Desk {
        &self.desk
    }

    /// Get a shared reference to the event queue.
    pub fn event_queue(&self) -> &EventQueue {
        &self.event_queue
    }
}

impl<R, S> Display for DaySimulation<R, S> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "DaySimulation at time {} with {} waiting",
            self.desk.clock(),
            self.desk.queue_length()
        )
    }
}
