//! Bounded ring buffer that pairs each incoming element with the one
//! `offset` positions earlier.

use std::mem;
use tracing::trace;

/// Lag buffer holding at most `offset` elements.
///
/// While fewer than `offset` elements have been recorded the window is
/// priming: slots are appended and every call to [`LagWindow::advance`]
/// hands back the default. Afterwards the slot count is fixed at `offset` and
/// each element overwrites the oldest one in place.
///
/// Slots are allocated as elements arrive, so an offset far larger than the
/// source costs nothing up front.
#[derive(Debug, Clone)]
pub(crate) struct LagWindow<L> {
    slots: Vec<L>,
    head: usize,
    countdown: usize,
    default: L,
}

impl<L: Clone> LagWindow<L> {
    /// `offset` must already be validated as positive.
    pub(crate) fn new(offset: usize, default: L) -> Self {
        LagWindow {
            slots: Vec::new(),
            head: 0,
            countdown: offset,
            default,
        }
    }

    /// Records `current` and returns the value lagging it.
    pub(crate) fn advance(&mut self, current: L) -> L {
        if self.countdown > 0 {
            self.countdown -= 1;
            self.slots.push(current);
            if self.countdown == 0 {
                trace!(offset = self.slots.len(), "lag window primed");
            }
            return self.default.clone();
        }

        // Primed: `slots` holds exactly `offset` elements, oldest at `head`.
        let lagged = mem::replace(&mut self.slots[self.head], current);
        self.head += 1;
        if self.head == self.slots.len() {
            self.head = 0;
        }
        lagged
    }

    pub(crate) fn is_primed(&self) -> bool {
        self.countdown == 0
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Drops buffered elements once the session is over.
    pub(crate) fn release(&mut self) {
        self.slots = Vec::new();
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::LagWindow;

    #[test]
    fn priming_returns_default_then_lagged_values() {
        let mut window = LagWindow::new(2, 0);
        assert_eq!(window.advance(10), 0);
        assert!(!window.is_primed());
        assert_eq!(window.advance(20), 0);
        assert!(window.is_primed());
        assert_eq!(window.advance(30), 10);
        assert_eq!(window.advance(40), 20);
        assert_eq!(window.advance(50), 30);
    }

    #[test]
    fn size_stays_at_offset_after_priming() {
        let mut window = LagWindow::new(3, -1);
        for value in 0..10 {
            window.advance(value);
            assert!(window.len() <= 3);
        }
        assert_eq!(window.len(), 3);
        window.release();
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn huge_offset_allocates_only_what_arrives() {
        let mut window = LagWindow::new(usize::MAX, 'x');
        assert_eq!(window.advance('a'), 'x');
        assert_eq!(window.advance('b'), 'x');
        assert_eq!(window.len(), 2);
        assert!(!window.is_primed());
    }

    #[test]
    fn single_slot_window_wraps_every_step() {
        let mut window = LagWindow::new(1, 0);
        let lagged: Vec<_> = (1..=4).map(|value| window.advance(value)).collect();
        assert_eq!(lagged, vec![0, 1, 2, 3]);
    }
}
