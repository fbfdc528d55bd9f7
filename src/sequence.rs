//! Re-iterable sequences and the deferred operators built on them.
//!
//! A [`Sequence`] hands out a fresh cursor for every iteration session.
//! Calling an operator here only validates its arguments and stores them; the
//! source is first touched when a cursor of the result is advanced. Iterating
//! the result again starts a new, independent session.
//!
//! Whether a second session sees the same elements is a property of the
//! source: [`reiterable`] and [`from_fn`] sources restart, a [`once`] source
//! is empty after its first session.
//!
//! # Examples
//! ```
//! use lagseq::sequence::{self, Sequence};
//!
//! let lagged = sequence::lag(vec![10, 20, 30, 40, 50], 2, 0, |c, l| (c, l)).unwrap();
//! let first: Vec<_> = lagged.cursor().collect();
//! let second: Vec<_> = lagged.cursor().collect();
//! assert_eq!(first, vec![(10, 0), (20, 0), (30, 10), (40, 20), (50, 30)]);
//! assert_eq!(first, second);
//! ```

use std::cell::RefCell;

use tracing::debug;

use crate::args::require_offset;
use crate::error::ArgumentError;
use crate::ops::{DefaultFill, FillWith, Filler, Lag, Lead, Pad, Padding, WindowStrategy};

/// A producer that can be iterated from the start any number of times.
///
/// Sessions over one sequence are independent; a single cursor is not meant
/// to be shared between consumers.
pub trait Sequence {
    type Item;
    type Cursor<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// Starts a new iteration session.
    fn cursor(&self) -> Self::Cursor<'_>;
}

impl<T: Clone> Sequence for Vec<T> {
    type Item = T;
    type Cursor<'a> = std::iter::Cloned<std::slice::Iter<'a, T>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.iter().cloned()
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor<'a> = S::Cursor<'a> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

/// Sequence backed by a factory called once per session.
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Creates a sequence whose sessions are produced by `factory`.
pub fn from_fn<F, I>(factory: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FromFn(factory)
}

impl<F, I> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor<'a> = I::IntoIter where Self: 'a;

    fn cursor(&self) -> I::IntoIter {
        (self.0)().into_iter()
    }
}

/// Sequence that clones a cheap `IntoIterator` (a range, a slice iterator,
/// a borrowed collection) for each session.
#[derive(Debug, Clone)]
pub struct Reiterable<C>(C);

pub fn reiterable<C>(source: C) -> Reiterable<C>
where
    C: IntoIterator + Clone,
{
    Reiterable(source)
}

impl<C> Sequence for Reiterable<C>
where
    C: IntoIterator + Clone,
{
    type Item = C::Item;
    type Cursor<'a> = C::IntoIter where Self: 'a;

    fn cursor(&self) -> C::IntoIter {
        self.0.clone().into_iter()
    }
}

/// Single-pass sequence over a one-shot iterator.
///
/// The first session takes the iterator; every later session is empty.
/// Not `Sync`: concurrent sessions are not supported.
#[derive(Debug)]
pub struct Once<I>(RefCell<Option<I>>);

pub fn once<I: IntoIterator>(source: I) -> Once<I::IntoIter> {
    Once(RefCell::new(Some(source.into_iter())))
}

impl<I: Iterator> Sequence for Once<I> {
    type Item = I::Item;
    type Cursor<'a> = std::iter::Flatten<std::option::IntoIter<I>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        let taken = self.0.borrow_mut().take();
        if taken.is_none() {
            debug!("single-pass source already consumed; session is empty");
        }
        taken.into_iter().flatten()
    }
}

/// Deferred [`Lag`] over a [`Sequence`].
#[derive(Debug, Clone)]
pub struct LagSequence<S, L, F> {
    source: S,
    offset: usize,
    default: L,
    selector: F,
}

impl<S, L, F> LagSequence<S, L, F> {
    pub(crate) fn new(source: S, offset: usize, default: L, selector: F) -> Self {
        LagSequence {
            source,
            offset,
            default,
            selector,
        }
    }
}

/// Pairs each element of `source` with the one `offset` positions earlier.
///
/// Fails immediately for `offset == 0`; otherwise nothing is read until the
/// result is iterated.
pub fn lag<S, F, R>(
    source: S,
    offset: usize,
    default: S::Item,
    selector: F,
) -> Result<LagSequence<S, S::Item, F>, ArgumentError>
where
    S: Sequence,
    S::Item: Clone,
    F: Fn(S::Item, S::Item) -> R,
{
    let offset = require_offset(offset)?;
    Ok(LagSequence::new(source, offset, default, selector))
}

/// Like [`lag`], with `None` as the lagged value during priming.
pub fn lag_or_none<S, F, R>(
    source: S,
    offset: usize,
    selector: F,
) -> Result<LagSequence<S, Option<S::Item>, F>, ArgumentError>
where
    S: Sequence,
    S::Item: Clone,
    F: Fn(S::Item, Option<S::Item>) -> R,
{
    let offset = require_offset(offset)?;
    Ok(LagSequence::new(source, offset, None, selector))
}

impl<S, L, F, R> Sequence for LagSequence<S, L, F>
where
    S: Sequence,
    S::Item: Clone,
    L: From<S::Item> + Clone,
    F: Fn(S::Item, L) -> R,
{
    type Item = R;
    type Cursor<'a> = Lag<S::Cursor<'a>, L, &'a F> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        Lag::new(
            self.source.cursor(),
            self.offset,
            self.default.clone(),
            &self.selector,
        )
    }
}

impl<'a, S, L, F, R> IntoIterator for &'a LagSequence<S, L, F>
where
    S: Sequence,
    S::Item: Clone,
    L: From<S::Item> + Clone,
    F: Fn(S::Item, L) -> R,
{
    type Item = R;
    type IntoIter = Lag<S::Cursor<'a>, L, &'a F>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<S, L, F> WindowStrategy for LagSequence<S, L, F> {
    fn burn_in(&self) -> usize {
        self.offset
    }
}

/// Deferred [`Lead`] over a [`Sequence`].
#[derive(Debug, Clone)]
pub struct LeadSequence<S, L, F> {
    source: S,
    offset: usize,
    default: L,
    selector: F,
}

/// Pairs each element of `source` with the one `offset` positions later.
pub fn lead<S, F, R>(
    source: S,
    offset: usize,
    default: S::Item,
    selector: F,
) -> Result<LeadSequence<S, S::Item, F>, ArgumentError>
where
    S: Sequence,
    S::Item: Clone,
    F: Fn(S::Item, S::Item) -> R,
{
    let offset = require_offset(offset)?;
    Ok(LeadSequence {
        source,
        offset,
        default,
        selector,
    })
}

pub fn lead_or_none<S, F, R>(
    source: S,
    offset: usize,
    selector: F,
) -> Result<LeadSequence<S, Option<S::Item>, F>, ArgumentError>
where
    S: Sequence,
    S::Item: Clone,
    F: Fn(S::Item, Option<S::Item>) -> R,
{
    let offset = require_offset(offset)?;
    Ok(LeadSequence {
        source,
        offset,
        default: None,
        selector,
    })
}

impl<S, L, F, R> Sequence for LeadSequence<S, L, F>
where
    S: Sequence,
    S::Item: Clone,
    L: From<S::Item> + Clone,
    F: Fn(S::Item, L) -> R,
{
    type Item = R;
    type Cursor<'a> = Lead<S::Cursor<'a>, L, &'a F> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        Lead::new(
            self.source.cursor(),
            self.offset,
            self.default.clone(),
            &self.selector,
        )
    }
}

impl<'a, S, L, F, R> IntoIterator for &'a LeadSequence<S, L, F>
where
    S: Sequence,
    S::Item: Clone,
    L: From<S::Item> + Clone,
    F: Fn(S::Item, L) -> R,
{
    type Item = R;
    type IntoIter = Lead<S::Cursor<'a>, L, &'a F>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<S, L, F> WindowStrategy for LeadSequence<S, L, F> {
    fn burn_in(&self) -> usize {
        self.offset
    }
}

/// Deferred [`Pad`] over a [`Sequence`]. The padding strategy is cloned
/// into each session.
#[derive(Debug, Clone)]
pub struct PadSequence<S, P> {
    source: S,
    width: usize,
    padding: P,
}

pub fn pad<S>(source: S, width: usize) -> PadSequence<S, DefaultFill>
where
    S: Sequence,
    S::Item: Default,
{
    PadSequence {
        source,
        width,
        padding: DefaultFill,
    }
}

pub fn pad_with<S>(source: S, width: usize, filler: S::Item) -> PadSequence<S, Filler<S::Item>>
where
    S: Sequence,
    S::Item: Clone,
{
    PadSequence {
        source,
        width,
        padding: Filler(filler),
    }
}

pub fn pad_using<S, F>(source: S, width: usize, fill: F) -> PadSequence<S, FillWith<F>>
where
    S: Sequence,
    F: Fn(usize) -> S::Item + Clone,
{
    PadSequence {
        source,
        width,
        padding: FillWith(fill),
    }
}

impl<S, P> Sequence for PadSequence<S, P>
where
    S: Sequence,
    P: Padding<S::Item> + Clone,
{
    type Item = S::Item;
    type Cursor<'a> = Pad<S::Cursor<'a>, P> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        Pad::new(self.source.cursor(), self.width, self.padding.clone())
    }
}

impl<'a, S, P> IntoIterator for &'a PadSequence<S, P>
where
    S: Sequence,
    P: Padding<S::Item> + Clone,
{
    type Item = S::Item;
    type IntoIter = Pad<S::Cursor<'a>, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn nothing_is_read_until_iterated() {
        let sessions = Cell::new(0);
        let source = from_fn(|| {
            sessions.set(sessions.get() + 1);
            vec![1, 2, 3]
        });

        let lagged = lag(&source, 1, 0, |c, l| c + l).unwrap();
        assert_eq!(sessions.get(), 0);

        let values: Vec<_> = lagged.cursor().collect();
        assert_eq!(values, vec![1, 3, 5]);
        assert_eq!(sessions.get(), 1);
    }

    #[test]
    fn each_iteration_is_a_new_session() {
        let lagged = lag(reiterable(1..=4), 3, 0, |c, l| (c, l)).unwrap();
        let first: Vec<_> = (&lagged).into_iter().collect();
        let second: Vec<_> = lagged.cursor().collect();
        assert_eq!(first, vec![(1, 0), (2, 0), (3, 0), (4, 1)]);
        assert_eq!(first, second);
    }

    #[test]
    fn single_pass_source_is_empty_on_second_session() {
        let lagged = lag_or_none(once(vec!['x', 'y']), 1, |c, l| (c, l)).unwrap();
        let first: Vec<_> = lagged.cursor().collect();
        let second: Vec<_> = lagged.cursor().collect();
        assert_eq!(first, vec![('x', None), ('y', Some('x'))]);
        assert!(second.is_empty());
    }

    #[test]
    fn zero_offset_fails_before_returning() {
        let err = lead(vec![1], 0, 0, |c, l| c + l).err().unwrap();
        assert_eq!(err.param(), "offset");
    }

    #[test]
    fn pad_sequence_restarts_with_fresh_padding_state() {
        let padded = pad_using(vec![1, 2], 4, |i| i as i32 * 10);
        let first: Vec<_> = padded.cursor().collect();
        let second: Vec<_> = (&padded).into_iter().collect();
        assert_eq!(first, vec![1, 2, 20, 30]);
        assert_eq!(first, second);
    }
}
