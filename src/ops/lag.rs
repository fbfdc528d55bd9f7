use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::window::LagWindow;
use super::WindowStrategy;

/// Iterator adapter pairing each element with the element `offset`
/// positions earlier.
///
/// Created by [`LagExt::lag`](super::LagExt::lag) and
/// [`LagExt::lag_or_none`](super::LagExt::lag_or_none). The lag slot has type
/// `L`: either the element type itself (explicit default) or `Option<T>`
/// (absent until a real predecessor exists).
///
/// The source cursor is released as soon as it reports exhaustion, and on
/// drop for early termination.
#[derive(Debug)]
pub struct Lag<I, L, F> {
    iter: Option<I>,
    window: LagWindow<L>,
    offset: usize,
    selector: F,
}

impl<I, L, F> Lag<I, L, F>
where
    L: Clone,
{
    /// Builds the adapter without touching `iter`. `offset` must be positive.
    pub(crate) fn new(iter: I, offset: usize, default: L, selector: F) -> Self {
        debug!(offset, "lag session started");
        Lag {
            iter: Some(iter),
            window: LagWindow::new(offset, default),
            offset,
            selector,
        }
    }

    /// True once the first `offset` outputs have been produced.
    pub fn is_primed(&self) -> bool {
        self.window.is_primed()
    }

    fn finish(&mut self) {
        trace!(offset = self.offset, primed = self.window.is_primed(), "lag session exhausted");
        self.iter = None;
        self.window.release();
    }
}

impl<I, L, F, R> Iterator for Lag<I, L, F>
where
    I: Iterator,
    I::Item: Clone,
    L: From<I::Item> + Clone,
    F: FnMut(I::Item, L) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let current = match self.iter.as_mut()?.next() {
            Some(current) => current,
            None => {
                self.finish();
                return None;
            }
        };

        let lagged = self.window.advance(L::from(current.clone()));
        Some((self.selector)(current, lagged))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<I, L, F, R> ExactSizeIterator for Lag<I, L, F>
where
    I: ExactSizeIterator,
    I::Item: Clone,
    L: From<I::Item> + Clone,
    F: FnMut(I::Item, L) -> R,
{
}

impl<I, L, F, R> FusedIterator for Lag<I, L, F>
where
    I: Iterator,
    I::Item: Clone,
    L: From<I::Item> + Clone,
    F: FnMut(I::Item, L) -> R,
{
}

impl<I, L, F> WindowStrategy for Lag<I, L, F> {
    fn burn_in(&self) -> usize {
        self.offset
    }
}
