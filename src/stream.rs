//! Lag over asynchronous streams.
//!
//! Same pairing as [`LagExt::lag`](crate::LagExt::lag): arguments are checked
//! when the function is called, the source is first polled when the returned
//! stream is.

use async_stream::stream;
use futures::stream::{Stream, StreamExt};
use tracing::debug;

use crate::args::require_offset;
use crate::error::ArgumentError;
use crate::ops::window::LagWindow;

/// Pairs each item of `source` with the one `offset` positions earlier.
///
/// # Examples
/// ```
/// use futures::{executor::block_on, stream, StreamExt};
/// use lagseq::stream::lag_stream;
///
/// let lagged = lag_stream(stream::iter(vec![1, 2, 3]), 1, 0, |c, l| c - l).unwrap();
/// let values: Vec<i32> = block_on(lagged.collect());
/// assert_eq!(values, vec![1, 1, 1]);
/// ```
pub fn lag_stream<S, F, R>(
    source: S,
    offset: usize,
    default: S::Item,
    selector: F,
) -> Result<impl Stream<Item = R>, ArgumentError>
where
    S: Stream,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R,
{
    let offset = require_offset(offset)?;
    Ok(lag_session(source, offset, default, selector))
}

/// Like [`lag_stream`], with `None` as the lagged value during priming.
pub fn lag_stream_or_none<S, F, R>(
    source: S,
    offset: usize,
    selector: F,
) -> Result<impl Stream<Item = R>, ArgumentError>
where
    S: Stream,
    S::Item: Clone,
    F: FnMut(S::Item, Option<S::Item>) -> R,
{
    let offset = require_offset(offset)?;
    Ok(lag_session(source, offset, None, selector))
}

fn lag_session<S, L, F, R>(
    source: S,
    offset: usize,
    default: L,
    mut selector: F,
) -> impl Stream<Item = R>
where
    S: Stream,
    S::Item: Clone,
    L: From<S::Item> + Clone,
    F: FnMut(S::Item, L) -> R,
{
    stream! {
        debug!(offset, "lag stream session started");
        let mut source = Box::pin(source);
        let mut window = LagWindow::new(offset, default);
        while let Some(current) = source.next().await {
            let lagged = window.advance(L::from(current.clone()));
            yield selector(current, lagged);
        }
        window.release();
    }
}
