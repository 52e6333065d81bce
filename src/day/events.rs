mod event_holder;

use crate::{Error, SimTime};
use event_holder::EventHolder;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

/// What happens at the desk when an [`Event`] fires.
///
/// The derived [`Ord`] places [`Arrive`] before [`Finish`], which is how the [`EventQueue`] breaks ties between events
/// scheduled for the same instant: a customer walking up at the exact moment service completes joins the line before
/// the server looks for the next customer.
///
/// [`Arrive`]: EventKind::Arrive
/// [`Finish`]: EventKind::Finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// A customer joins the waiting queue.
    Arrive,
    /// The server completes the customer it was serving.
    Finish,
}

/// A timestamped occurrence at the desk. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: SimTime, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub fn arrive(seconds: f64) -> Self {
        Self::new(SimTime::from(seconds), EventKind::Arrive)
    }

    pub fn finish(seconds: f64) -> Self {
        Self::new(SimTime::from(seconds), EventKind::Finish)
    }
}

/// Priority queue of scheduled events for one day.
///
/// Events are extracted in ascending order of execution time. Ties are broken first by [`EventKind`] (arrivals before
/// completions) and then by the order in which events were pushed onto the queue, so the observed order of execution is
/// fully determined by the schedule.
///
/// The queue also tracks the current clock time, which advances to each event's execution time as that event is
/// extracted, and keeps a count of pending events per kind.
///
/// # Errors
///
/// Attempting to schedule an event for a time that is already past will result in an [`Error::BackInTime`] without
/// modifying the queue. Attempting to schedule an event at a NaN or infinite time results in an
/// [`Error::NonFiniteTime`]. Either error indicates a logical bug in whatever produced the event's time.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BinaryHeap<Reverse<EventHolder>>,
    last_execution_time: SimTime,
    events_added: usize,
    pending_arrivals: usize,
    pending_finishes: usize,
}

impl EventQueue {
    /// Construct a new [`EventQueue`] with no scheduled events and a clock initialized to the provided time.
    pub fn new(start_time: SimTime) -> Self {
        Self {
            events: BinaryHeap::default(),
            last_execution_time: start_time,
            events_added: 0,
            pending_arrivals: 0,
            pending_finishes: 0,
        }
    }

    /// Schedule the provided event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteTime`] if the event's time is NaN or infinite, and [`Error::BackInTime`] if it is less
    /// than the current clock time. The queue is left unmodified in both cases.
    pub fn schedule(&mut self, event: Event) -> crate::Result {
        if !event.time.is_finite() {
            return Err(Error::NonFiniteTime(event.time.into_inner()));
        }
        if event.time < self.last_execution_time {
            return Err(Error::BackInTime);
        }

        let insertion_sequence = self.increment_event_count();
        match event.kind {
            EventKind::Arrive => self.pending_arrivals += 1,
            EventKind::Finish => self.pending_finishes += 1,
        }
        self.events.push(Reverse(EventHolder {
            event,
            insertion_sequence,
        }));
        Ok(())
    }

    /// Schedule an event of the given kind `delay` seconds after the current clock time.
    ///
    /// # Errors
    ///
    /// As for [`schedule()`]: a negative delay yields [`Error::BackInTime`], a NaN or infinite one
    /// [`Error::NonFiniteTime`].
    ///
    /// [`schedule()`]: EventQueue::schedule
    pub fn schedule_with_delay(&mut self, kind: EventKind, delay: f64) -> crate::Result {
        let time = SimTime::from(self.last_execution_time.into_inner() + delay);
        self.schedule(Event::new(time, kind))
    }

    fn increment_event_count(&mut self) -> usize {
        let count = self.events_added;
        self.events_added += 1;
        count
    }

    /// Pop the earliest event from the queue. Updates the current clock time to match the execution time of the popped
    /// event.
    pub(crate) fn next(&mut self) -> Option<Event> {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.event.time;
        match holder.event.kind {
            EventKind::Arrive => self.pending_arrivals -= 1,
            EventKind::Finish => self.pending_finishes -= 1,
        }
        Some(holder.event)
    }

    /// Get the simulation's current clock time.
    pub fn current_time(&self) -> SimTime {
        self.last_execution_time
    }

    /// Number of events still waiting to execute.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events of the given kind.
    pub fn pending(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Arrive => self.pending_arrivals,
            EventKind::Finish => self.pending_finishes,
        }
    }
}

impl Display for EventQueue {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events at current time {}",
            self.events.len(),
            self.last_execution_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| queue.next()).collect()
    }

    #[test]
    fn events_come_out_in_time_order() {
        let mut queue = EventQueue::default();
        for event in [Event::arrive(30.0), Event::finish(10.0), Event::arrive(20.0)] {
            queue.schedule(event).unwrap();
        }

        let expected = vec![Event::finish(10.0), Event::arrive(20.0), Event::arrive(30.0)];
        assert_eq!(expected, drain(&mut queue), "events did not execute in correct order");
        assert_eq!(SimTime::from(30.0), queue.current_time());
    }

    #[test]
    fn arrivals_win_ties_against_finishes() {
        let mut queue = EventQueue::default();
        queue.schedule(Event::finish(5.0)).unwrap();
        queue.schedule(Event::arrive(5.0)).unwrap();

        assert_eq!(vec![Event::arrive(5.0), Event::finish(5.0)], drain(&mut queue));
    }

    #[test]
    fn equal_events_keep_insertion_order() {
        let mut queue = EventQueue::default();
        for _ in 0..3 {
            queue.schedule(Event::arrive(1.0)).unwrap();
        }

        let sequences: Vec<usize> = std::iter::from_fn(|| queue.events.pop())
            .map(|Reverse(holder)| holder.insertion_sequence)
            .collect();
        assert_eq!(vec![0, 1, 2], sequences, "ties should resolve by insertion order");
    }

    #[test]
    fn scheduling_in_the_past_fails() {
        let mut queue = EventQueue::new(SimTime::from(100.0));
        assert_eq!(Err(Error::BackInTime), queue.schedule(Event::finish(99.0)));
        assert_eq!(
            Err(Error::BackInTime),
            queue.schedule_with_delay(EventKind::Finish, -1.0)
        );
        assert!(queue.is_empty(), "rejected events should not be queued");
    }

    #[test]
    fn scheduling_at_nan_fails() {
        let mut queue = EventQueue::default();
        let result = queue.schedule_with_delay(EventKind::Finish, f64::NAN);
        assert!(
            matches!(result, Err(Error::NonFiniteTime(time)) if time.is_nan()),
            "NaN delay should be rejected"
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn pending_counts_follow_schedule_and_extraction() {
        let mut queue = EventQueue::default();
        queue.schedule(Event::arrive(1.0)).unwrap();
        queue.schedule(Event::arrive(2.0)).unwrap();
        queue.schedule_with_delay(EventKind::Finish, 1.5).unwrap();
        assert_eq!(2, queue.pending(EventKind::Arrive));
        assert_eq!(1, queue.pending(EventKind::Finish));

        queue.next();
        queue.next();
        assert_eq!(1, queue.pending(EventKind::Arrive));
        assert_eq!(0, queue.pending(EventKind::Finish));
        assert_eq!(1, queue.len());
    }

    #[test]
    fn display_reports_size_and_clock() {
        let mut queue = EventQueue::new(SimTime::from(2.5));
        queue.schedule(Event::arrive(4.0)).unwrap();
        assert_eq!(
            "EventQueue with 1 scheduled events at current time 2.5",
            queue.to_string()
        );
    }
}
