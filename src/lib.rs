//! Lazily evaluated lookbehind/lookahead operators.
//!
//! [`LagExt`] adds `lag`, `lead` and `pad` to anything iterable. The
//! [`sequence`] module offers the same operators over re-iterable
//! [`Sequence`]s, where each iteration of the result is an independent
//! session. [`stream`] covers asynchronous sources.
//!
//! Every operator checks its arguments when it is called and returns
//! immediately; the source is read only as results are requested.

mod args;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod ops;
pub mod projection;
pub mod sequence;
pub mod stream;

pub use args::parse_count;
pub use builder::LagBuilder;
pub use config::{LagConfig, OutputFormat};
pub use error::ArgumentError;
pub use ops::{Lag, LagExt, Lead, Pad, TryLag, WindowStrategy};
pub use projection::Projection;
pub use sequence::{LagSequence, LeadSequence, PadSequence, Sequence};
