use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::window::LagWindow;
use super::WindowStrategy;

/// Fallible counterpart of [`Lag`](super::Lag) over a source of `Result`s.
///
/// The first error, whether it comes from the source or from the selector,
/// is yielded unchanged at the position where it happened. After that the
/// adapter is terminated and the source is released.
#[derive(Debug)]
pub struct TryLag<I, L, F> {
    iter: Option<I>,
    window: LagWindow<L>,
    offset: usize,
    selector: F,
}

impl<I, L, F> TryLag<I, L, F>
where
    L: Clone,
{
    pub(crate) fn new(iter: I, offset: usize, default: L, selector: F) -> Self {
        debug!(offset, "fallible lag session started");
        TryLag {
            iter: Some(iter),
            window: LagWindow::new(offset, default),
            offset,
            selector,
        }
    }

    fn terminate(&mut self, reason: &'static str) {
        trace!(offset = self.offset, reason, "fallible lag session ended");
        self.iter = None;
        self.window.release();
    }
}

impl<I, T, E, L, F, R> Iterator for TryLag<I, L, F>
where
    I: Iterator<Item = Result<T, E>>,
    T: Clone,
    L: From<T> + Clone,
    F: FnMut(T, L) -> Result<R, E>,
{
    type Item = Result<R, E>;

    fn next(&mut self) -> Option<Result<R, E>> {
        let current = match self.iter.as_mut()?.next() {
            Some(Ok(current)) => current,
            Some(Err(err)) => {
                self.terminate("source error");
                return Some(Err(err));
            }
            None => {
                self.terminate("exhausted");
                return None;
            }
        };

        let lagged = self.window.advance(L::from(current.clone()));
        let result = (self.selector)(current, lagged);
        if result.is_err() {
            self.terminate("selector error");
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            Some(iter) => (0, iter.size_hint().1),
            None => (0, Some(0)),
        }
    }
}

impl<I, T, E, L, F, R> FusedIterator for TryLag<I, L, F>
where
    I: Iterator<Item = Result<T, E>>,
    T: Clone,
    L: From<T> + Clone,
    F: FnMut(T, L) -> Result<R, E>,
{
}

impl<I, L, F> WindowStrategy for TryLag<I, L, F> {
    fn burn_in(&self) -> usize {
        self.offset
    }
}
