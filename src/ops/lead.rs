use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::WindowStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Reading ahead until `offset` elements are pending
    Filling,
    /// Each new source element completes the oldest pending one
    Streaming,
    /// Source exhausted; pending elements pair with the default
    Draining,
    Done,
}

/// Iterator adapter pairing each element with the element `offset`
/// positions later.
///
/// The first request reads up to `offset` elements ahead; nothing is read
/// before that. At most `offset` elements are ever pending.
#[derive(Debug)]
pub struct Lead<I: Iterator, L, F> {
    iter: Option<I>,
    pending: VecDeque<I::Item>,
    offset: usize,
    default: L,
    selector: F,
    phase: Phase,
}

impl<I: Iterator, L, F> Lead<I, L, F> {
    pub(crate) fn new(iter: I, offset: usize, default: L, selector: F) -> Self {
        debug!(offset, "lead session started");
        Lead {
            iter: Some(iter),
            pending: VecDeque::new(),
            offset,
            default,
            selector,
            phase: Phase::Filling,
        }
    }

    fn source_exhausted(&mut self) {
        trace!(pending = self.pending.len(), "lead source exhausted");
        self.iter = None;
        self.phase = Phase::Draining;
    }
}

impl<I, L, F, R> Iterator for Lead<I, L, F>
where
    I: Iterator,
    I::Item: Clone,
    L: From<I::Item> + Clone,
    F: FnMut(I::Item, L) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            match self.phase {
                Phase::Filling => {
                    while self.pending.len() < self.offset {
                        match self.iter.as_mut().and_then(Iterator::next) {
                            Some(item) => self.pending.push_back(item),
                            None => break,
                        }
                    }
                    if self.pending.len() < self.offset {
                        self.source_exhausted();
                    } else {
                        self.phase = Phase::Streaming;
                    }
                }
                Phase::Streaming => match self.iter.as_mut().and_then(Iterator::next) {
                    Some(ahead) => {
                        let current = self.pending.pop_front()?;
                        self.pending.push_back(ahead.clone());
                        return Some((self.selector)(current, L::from(ahead)));
                    }
                    None => self.source_exhausted(),
                },
                Phase::Draining => match self.pending.pop_front() {
                    Some(current) => {
                        return Some((self.selector)(current, self.default.clone()));
                    }
                    None => {
                        trace!("lead session drained");
                        self.pending = VecDeque::new();
                        self.phase = Phase::Done;
                    }
                },
                Phase::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.pending.len();
        match &self.iter {
            Some(iter) => {
                let (lower, upper) = iter.size_hint();
                (
                    lower.saturating_add(pending),
                    upper.and_then(|upper| upper.checked_add(pending)),
                )
            }
            None => (pending, Some(pending)),
        }
    }
}

impl<I, L, F, R> FusedIterator for Lead<I, L, F>
where
    I: Iterator,
    I::Item: Clone,
    L: From<I::Item> + Clone,
    F: FnMut(I::Item, L) -> R,
{
}

impl<I: Iterator, L, F> WindowStrategy for Lead<I, L, F> {
    fn burn_in(&self) -> usize {
        self.offset
    }
}
