//! Messenger trait definition

use std::future::Future;

use crate::error::NotifyError;

/// Trait for delivering a report chunk to its destination
///
/// One `deliver` call sends one chunk. Chunk splitting happens upstream;
/// implementations treat the text as opaque apart from the markup the
/// destination expects.
pub trait Messenger: Send + Sync {
    /// Returns the messenger name (e.g., "telegram")
    fn name(&self) -> &'static str;

    /// Deliver one message
    fn deliver(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
