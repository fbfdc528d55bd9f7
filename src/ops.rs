//! Iterator-level windowing operators.
//!
//! Every operator validates its arguments when called and returns an adapter
//! that has not yet touched the source. Work happens one element at a time as
//! the adapter is advanced.

mod lag;
mod lead;
mod pad;
mod try_lag;
pub(crate) mod window;

pub use lag::Lag;
pub use lead::Lead;
pub use pad::{DefaultFill, FillWith, Filler, Pad, Padding};
pub use try_lag::TryLag;

use crate::args::require_offset;
use crate::error::ArgumentError;

/// Reports how far a windowing adapter (or its deferred sequence) reaches
/// away from the current element.
pub trait WindowStrategy {
    /// Outputs at the start (lag) or end (lead) of a session that get the
    /// default because no element exists `offset` positions away.
    fn burn_in(&self) -> usize;
}

/// Windowing operators for anything that can be turned into an iterator.
pub trait LagExt: IntoIterator + Sized {
    /// Pairs each element with the one `offset` positions earlier, using
    /// `default` for the first `offset` elements.
    ///
    /// # Errors
    /// [`ArgumentError::OutOfRange`] for `offset == 0`.
    ///
    /// # Examples
    /// ```
    /// use lagseq::LagExt;
    ///
    /// let pairs: Vec<_> = vec![10, 20, 30]
    ///     .lag(1, 0, |current, lagged| current - lagged)
    ///     .unwrap()
    ///     .collect();
    /// assert_eq!(pairs, vec![10, 10, 10]);
    /// ```
    fn lag<F, R>(
        self,
        offset: usize,
        default: Self::Item,
        selector: F,
    ) -> Result<Lag<Self::IntoIter, Self::Item, F>, ArgumentError>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        let offset = require_offset(offset)?;
        Ok(Lag::new(self.into_iter(), offset, default, selector))
    }

    /// Like [`LagExt::lag`], but the lagged value is `None` until a real
    /// predecessor exists.
    fn lag_or_none<F, R>(
        self,
        offset: usize,
        selector: F,
    ) -> Result<Lag<Self::IntoIter, Option<Self::Item>, F>, ArgumentError>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Option<Self::Item>) -> R,
    {
        let offset = require_offset(offset)?;
        Ok(Lag::new(self.into_iter(), offset, None, selector))
    }

    /// Lag over a source of `Result`s with a fallible selector.
    ///
    /// `default` may be the element type or `Option` of it.
    fn try_lag<T, E, L, F, R>(
        self,
        offset: usize,
        default: L,
        selector: F,
    ) -> Result<TryLag<Self::IntoIter, L, F>, ArgumentError>
    where
        Self: IntoIterator<Item = Result<T, E>>,
        T: Clone,
        L: From<T> + Clone,
        F: FnMut(T, L) -> Result<R, E>,
    {
        let offset = require_offset(offset)?;
        Ok(TryLag::new(self.into_iter(), offset, default, selector))
    }

    /// Pairs each element with the one `offset` positions later, using
    /// `default` for the last `offset` elements.
    fn lead<F, R>(
        self,
        offset: usize,
        default: Self::Item,
        selector: F,
    ) -> Result<Lead<Self::IntoIter, Self::Item, F>, ArgumentError>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        let offset = require_offset(offset)?;
        Ok(Lead::new(self.into_iter(), offset, default, selector))
    }

    fn lead_or_none<F, R>(
        self,
        offset: usize,
        selector: F,
    ) -> Result<Lead<Self::IntoIter, Option<Self::Item>, F>, ArgumentError>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Option<Self::Item>) -> R,
    {
        let offset = require_offset(offset)?;
        Ok(Lead::new(self.into_iter(), offset, None, selector))
    }

    /// Pads the sequence with `Default::default()` up to `width` elements.
    fn pad(self, width: usize) -> Pad<Self::IntoIter, DefaultFill>
    where
        Self::Item: Default,
    {
        Pad::new(self.into_iter(), width, DefaultFill)
    }

    fn pad_with(self, width: usize, filler: Self::Item) -> Pad<Self::IntoIter, Filler<Self::Item>>
    where
        Self::Item: Clone,
    {
        Pad::new(self.into_iter(), width, Filler(filler))
    }

    /// Pads using `fill(index)`, where `index` is the output position.
    fn pad_using<F>(self, width: usize, fill: F) -> Pad<Self::IntoIter, FillWith<F>>
    where
        F: FnMut(usize) -> Self::Item,
    {
        Pad::new(self.into_iter(), width, FillWith(fill))
    }
}

impl<S: IntoIterator> LagExt for S {}
