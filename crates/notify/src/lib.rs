//! Report delivery
//!
//! The pipeline hands this crate pre-chunked message text; delivery is one
//! HTTP call per chunk through the [`Messenger`] seam. [`Telegram`] is the
//! production implementation; tests swap in recording stubs.

mod error;
mod messenger;
mod telegram;

pub use error::NotifyError;
pub use messenger::Messenger;
pub use telegram::Telegram;
