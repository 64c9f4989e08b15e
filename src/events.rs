//! Interrupt event queue.
//!
//! Two hardware sources feed the core: the periodic sampling timer and the
//! converter's completion signal.  On target both are produced in interrupt
//! context; the queue carries them to the single context that runs the
//! classifiers, in delivery order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer ISR   │────▶│  EventQueue  │────▶│ EnergyRuntime│
//! │ ADC ISR     │────▶│  (SPSC)      │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::spsc::{Consumer, Producer, Queue};

/// Capacity parameter of the backing queue; holds one less than this.
pub const EVENT_QUEUE_CAP: usize = 8;

/// ISR-side half of a split [`EventQueue`].
pub type EventProducer<'a> = Producer<'a, Event, EVENT_QUEUE_CAP>;
/// Main-side half of a split [`EventQueue`], drained by
/// [`EnergyRuntime::run_pending_from`](crate::runtime::EnergyRuntime::run_pending_from).
pub type EventConsumer<'a> = Consumer<'a, Event, EVENT_QUEUE_CAP>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The sampling period elapsed.
    TimerElapsed,
    /// The converter finished; carries the 8-bit result.
    ConversionComplete(u8),
}

/// Bounded single-producer / single-consumer event queue.
pub struct EventQueue {
    queue: Queue<Event, EVENT_QUEUE_CAP>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self { queue: Queue::new() }
    }

    /// Push an event.  Returns `false` if the queue is full (event dropped).
    pub fn push(&mut self, event: Event) -> bool {
        self.queue.enqueue(event).is_ok()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.queue.dequeue()
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&mut self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Split into ISR-side producer and main-side consumer halves.  With a
    /// `&'static mut` queue both halves live for the whole program.
    pub fn split(&mut self) -> (EventProducer<'_>, EventConsumer<'_>) {
        self.queue.split()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = EventQueue::new();
        assert!(q.push(Event::TimerElapsed));
        assert!(q.push(Event::ConversionComplete(42)));
        assert_eq!(q.pop(), Some(Event::TimerElapsed));
        assert_eq!(q.pop(), Some(Event::ConversionComplete(42)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn full_queue_drops() {
        let mut q = EventQueue::new();
        for _ in 0..EVENT_QUEUE_CAP - 1 {
            assert!(q.push(Event::TimerElapsed));
        }
        assert!(!q.push(Event::ConversionComplete(1)));
        assert_eq!(q.len(), EVENT_QUEUE_CAP - 1);
    }

    #[test]
    fn drain_empties_queue() {
        let mut q = EventQueue::new();
        q.push(Event::TimerElapsed);
        q.push(Event::ConversionComplete(7));
        let mut seen = Vec::new();
        q.drain(|e| seen.push(e));
        assert_eq!(seen, [Event::TimerElapsed, Event::ConversionComplete(7)]);
        assert!(q.is_empty());
    }

    #[test]
    fn split_halves_share_the_buffer() {
        let mut q = EventQueue::new();
        let (mut tx, mut rx) = q.split();
        tx.enqueue(Event::ConversionComplete(9)).unwrap();
        assert_eq!(rx.dequeue(), Some(Event::ConversionComplete(9)));
    }
}
