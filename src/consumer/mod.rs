//! Consumers: per-reader cursors over a shared log.
//!
//! - [`Consumer`]: blocking [`Iterator`], one per thread;
//! - [`AsyncConsumer`]: async reader and [`Stream`](futures::Stream) adapter (feature `async`).

mod blocking;
#[cfg(feature = "async")]
mod stream;

pub use blocking::Consumer;
#[cfg(feature = "async")]
pub use stream::AsyncConsumer;
