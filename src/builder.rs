//! Builder for lag sequences assembled from optional parts.
//!
//! Configuration layers (the CLI, deserialized settings) often hold the
//! pieces of an operator call separately. The builder reports whichever piece
//! is absent as [`ArgumentError::Missing`] naming it.

use crate::args::{require_offset, require_present};
use crate::error::ArgumentError;
use crate::sequence::{LagSequence, Sequence};

#[derive(Debug, Clone)]
pub struct LagBuilder<S, L, F> {
    source: Option<S>,
    offset: Option<usize>,
    default: Option<L>,
    selector: Option<F>,
}

impl<S, L, F> Default for LagBuilder<S, L, F> {
    fn default() -> Self {
        LagBuilder {
            source: None,
            offset: None,
            default: None,
            selector: None,
        }
    }
}

impl<S, L, F> LagBuilder<S, L, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Value used as the lagged value for the first `offset` outputs.
    pub fn default_value(mut self, default: L) -> Self {
        self.default = Some(default);
        self
    }

    pub fn selector(mut self, selector: F) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Validates every part and returns the deferred sequence.
    ///
    /// Parts are checked in call order of the operator: source, selector,
    /// offset, then default.
    pub fn build<R>(self) -> Result<LagSequence<S, L, F>, ArgumentError>
    where
        S: Sequence,
        S::Item: Clone,
        L: From<S::Item> + Clone,
        F: Fn(S::Item, L) -> R,
    {
        let source = require_present("source", self.source)?;
        let selector = require_present("selector", self.selector)?;
        let offset = require_offset(require_present("offset", self.offset)?)?;
        let default = require_present("default_value", self.default)?;
        Ok(LagSequence::new(source, offset, default, selector))
    }
}

impl<S, T, F> LagBuilder<S, Option<T>, F> {
    /// Builder whose lagged value is `None` until a predecessor exists.
    pub fn or_none() -> Self {
        LagBuilder {
            default: Some(None),
            ..Self::default()
        }
    }
}
