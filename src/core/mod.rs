//! Log core: storage, cursors and the public handle.
//!
//! The only public API from this module is [`CastLog`] and its [`LogConfig`].
//!
//! Internal modules:
//! - [`store`]: append-only items plus the completion flag under one lock;
//! - [`cursor`]: consumer-private read position;
//! - [`log`]: the producer handle and consumer factory;
//! - [`config`]: construction-time settings.

mod config;
mod cursor;
mod log;
mod store;

pub use config::LogConfig;
pub use log::CastLog;

pub(crate) use cursor::Cursor;
pub(crate) use log::Shared;
pub(crate) use store::Slot;
