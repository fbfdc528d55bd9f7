#![allow(dead_code)]

use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use lagseq::Sequence;

/// Sequence that panics as soon as a session is started.
pub struct BreakingSequence<T>(PhantomData<T>);

impl<T> BreakingSequence<T> {
    pub fn new() -> Self {
        BreakingSequence(PhantomData)
    }
}

impl<T> Sequence for BreakingSequence<T> {
    type Item = T;
    type Cursor<'a> = std::iter::Empty<T> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        panic!("BreakingSequence was iterated");
    }
}

/// Iterator that panics when advanced.
pub struct BreakingIter<T>(PhantomData<T>);

impl<T> BreakingIter<T> {
    pub fn new() -> Self {
        BreakingIter(PhantomData)
    }
}

impl<T> Iterator for BreakingIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        panic!("BreakingIter was advanced");
    }
}

/// Iterator wrapper that records when it is dropped.
pub struct DropTracked<I> {
    inner: I,
    dropped: Rc<Cell<bool>>,
}

impl<I> DropTracked<I> {
    pub fn new(inner: I) -> (Self, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        (
            DropTracked {
                inner,
                dropped: Rc::clone(&dropped),
            },
            dropped,
        )
    }
}

impl<I: Iterator> Iterator for DropTracked<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }
}

impl<I> Drop for DropTracked<I> {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

/// Source of `Result`s that fails at `position`.
pub fn failing_at(values: &[i32], position: usize) -> Vec<Result<i32, String>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i == position {
                Err(format!("source failed at {}", i))
            } else {
                Ok(value)
            }
        })
        .collect()
}
